//! Tag representation for labeling and excluding stubs

use serde::{Deserialize, Serialize};

/// Id of the reserved tag marking a stub as a detected duplicate
pub const DUPLICATE_TAG_ID: &str = "duplicate_exclusion_id";

/// A label attached to a stub
///
/// Exclusion tags remove a stub from active curation; other tags are
/// free-form (e.g. the name of the import a stub came from).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_exclusion_tag: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_assignable: Option<bool>,
}

impl Tag {
    /// Create a new free-form tag
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            label: label.into(),
            is_exclusion_tag: None,
            is_assignable: None,
        }
    }

    /// Create an exclusion tag with a fixed id
    pub fn exclusion(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            is_exclusion_tag: Some(true),
            is_assignable: Some(true),
        }
    }

    /// The well-known duplicate tag
    pub fn duplicate() -> Self {
        Self {
            id: DUPLICATE_TAG_ID.to_string(),
            label: "Duplicate".to_string(),
            is_exclusion_tag: Some(true),
            is_assignable: Some(false),
        }
    }

    pub fn is_exclusion(&self) -> bool {
        self.is_exclusion_tag.unwrap_or(false)
    }

    /// Whether a reviewer may pick this tag by hand
    pub fn is_assignable(&self) -> bool {
        self.is_assignable.unwrap_or(true)
    }
}
