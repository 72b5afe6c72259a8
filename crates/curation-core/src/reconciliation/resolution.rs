//! Per-stub duplicate resolution

use std::fmt;

use curation_domain::{StudyStub, Tag};
use serde::{Deserialize, Serialize};

/// What a reviewer decided about a stub in a duplicate cluster or case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Resolution {
    /// Not decided yet
    #[default]
    #[serde(rename = "unresolved")]
    Unresolved,
    /// Kept: not a duplicate
    #[serde(rename = "not-duplicate")]
    Keep,
    /// Excluded as a duplicate
    #[serde(rename = "duplicate")]
    Duplicate,
    /// Already excluded for an unrelated reason; shown but not toggleable
    #[serde(rename = "resolved")]
    Excluded,
}

impl Resolution {
    /// Annotation for a stub already in the project
    pub fn infer(stub: &StudyStub, duplicate_tag_id: &str) -> Self {
        match &stub.exclusion_tag {
            None => Resolution::Unresolved,
            Some(tag) if tag.id == duplicate_tag_id => Resolution::Duplicate,
            Some(_) => Resolution::Excluded,
        }
    }

    /// Whether a reviewer may set this resolution
    pub fn is_assignable(&self) -> bool {
        matches!(self, Resolution::Keep | Resolution::Duplicate)
    }

    /// Whether the stub no longer blocks completion
    pub fn is_settled(&self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }

    /// Whether a reviewer may change this stub
    pub fn is_toggleable(&self) -> bool {
        !matches!(self, Resolution::Excluded)
    }

    /// Apply an assignable resolution to a stub's exclusion tag
    ///
    /// `Duplicate` sets the duplicate tag, `Keep` clears any exclusion.
    pub(crate) fn apply(&self, stub: &mut StudyStub, duplicate_tag: &Tag) {
        match self {
            Resolution::Duplicate => stub.exclusion_tag = Some(duplicate_tag.clone()),
            Resolution::Keep => stub.exclusion_tag = None,
            Resolution::Unresolved | Resolution::Excluded => {}
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Unresolved => write!(f, "unresolved"),
            Resolution::Keep => write!(f, "not-duplicate"),
            Resolution::Duplicate => write!(f, "duplicate"),
            Resolution::Excluded => write!(f, "resolved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curation_domain::DUPLICATE_TAG_ID;

    #[test]
    fn test_infer_from_exclusion_tag() {
        let active = StudyStub::new("A");
        let duplicate = StudyStub::new("B").with_exclusion(Some(Tag::duplicate()));
        let excluded = StudyStub::new("C").with_exclusion(Some(Tag::exclusion("x", "Off topic")));

        assert_eq!(Resolution::infer(&active, DUPLICATE_TAG_ID), Resolution::Unresolved);
        assert_eq!(Resolution::infer(&duplicate, DUPLICATE_TAG_ID), Resolution::Duplicate);
        assert_eq!(Resolution::infer(&excluded, DUPLICATE_TAG_ID), Resolution::Excluded);
    }

    #[test]
    fn test_apply() {
        let tag = Tag::duplicate();
        let mut stub = StudyStub::new("A");

        Resolution::Duplicate.apply(&mut stub, &tag);
        assert_eq!(stub.exclusion_tag, Some(tag.clone()));

        Resolution::Keep.apply(&mut stub, &tag);
        assert_eq!(stub.exclusion_tag, None);
    }

    #[test]
    fn test_flags() {
        assert!(!Resolution::Unresolved.is_settled());
        assert!(Resolution::Excluded.is_settled());
        assert!(!Resolution::Excluded.is_toggleable());
        assert!(!Resolution::Excluded.is_assignable());
        assert!(!Resolution::Unresolved.is_assignable());
        assert!(Resolution::Keep.is_assignable());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Resolution::Keep).unwrap(), "\"not-duplicate\"");
        let parsed: Resolution = serde_json::from_str("\"resolved\"").unwrap();
        assert_eq!(parsed, Resolution::Excluded);
        assert_eq!(Resolution::Duplicate.to_string(), "duplicate");
    }
}
