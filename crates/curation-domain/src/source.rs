//! Identification source of a stub

use serde::{Deserialize, Serialize};

/// Where a stub was identified (a database search, a manual upload, ...)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Source {
    pub id: String,
    pub label: String,
}

impl Source {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
