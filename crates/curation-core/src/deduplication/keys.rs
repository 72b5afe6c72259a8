//! Duplicate key derivation

use std::fmt;

use curation_domain::StudyStub;
use serde::{Deserialize, Serialize};

/// A key two stubs must share to be considered probable duplicates
///
/// Variants are ordered by lookup priority: DOI, then PMID, then title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DuplicateKey {
    /// DOI, verbatim (DOIs are compared case-sensitively)
    Doi(String),
    /// PMID, verbatim
    Pmid(String),
    /// Lower-cased, trimmed title
    Title(String),
}

impl DuplicateKey {
    pub fn as_str(&self) -> &str {
        match self {
            DuplicateKey::Doi(value) | DuplicateKey::Pmid(value) | DuplicateKey::Title(value) => {
                value
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DuplicateKey::Doi(_) => "doi",
            DuplicateKey::Pmid(_) => "pmid",
            DuplicateKey::Title(_) => "title",
        }
    }
}

impl fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.as_str())
    }
}

/// Normalize a title for key comparison
///
/// Returns `None` for titles that are empty after trimming.
pub fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn identifier(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Derive every duplicate key a stub carries, in lookup priority order
///
/// A stub with no DOI, PMID or title yields no keys and never groups with
/// anything.
pub fn derive_keys(stub: &StudyStub) -> Vec<DuplicateKey> {
    let mut keys = Vec::with_capacity(3);

    if let Some(doi) = identifier(&stub.doi) {
        keys.push(DuplicateKey::Doi(doi.to_string()));
    }
    if let Some(pmid) = identifier(&stub.pmid) {
        keys.push(DuplicateKey::Pmid(pmid.to_string()));
    }
    if let Some(title) = normalize_title(&stub.title) {
        keys.push(DuplicateKey::Title(title));
    }

    keys
}
