//! Curation pipeline columns

use super::StudyStub;
use serde::{Deserialize, Serialize};

/// An ordered curation stage
///
/// Column 0 is intake; the last column holds included stubs.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stub_studies: Vec<StudyStub>,
}

impl Column {
    /// Create an empty column
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            stub_studies: Vec::new(),
        }
    }

    /// Builder method to seed the column with stubs
    pub fn with_stubs(mut self, stubs: Vec<StudyStub>) -> Self {
        self.stub_studies = stubs;
        self
    }

    /// Position of the stub with the given id
    pub fn position_of(&self, id: &str) -> Option<usize> {
        if id.is_empty() {
            return None;
        }
        self.stub_studies.iter().position(|s| s.id == id)
    }

    /// Whether the stub at `index` has the given id
    pub fn holds_at(&self, index: usize, id: &str) -> bool {
        !id.is_empty()
            && self
                .stub_studies
                .get(index)
                .map(|s| s.id == id)
                .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.stub_studies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stub_studies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_of() {
        let col = Column::new("Screening").with_stubs(vec![
            StudyStub::new("A").with_id("a"),
            StudyStub::new("B").with_id("b"),
        ]);
        assert_eq!(col.position_of("b"), Some(1));
        assert_eq!(col.position_of("z"), None);
        assert_eq!(col.position_of(""), None);
        assert_eq!(col.len(), 2);
    }

    #[test]
    fn test_holds_at() {
        let col = Column::new("Included").with_stubs(vec![StudyStub::new("A").with_id("a")]);
        assert!(col.holds_at(0, "a"));
        assert!(!col.holds_at(0, "b"));
        assert!(!col.holds_at(3, "a"));
    }

    #[test]
    fn test_wire_shape() {
        let col: Column = serde_json::from_str(
            r#"{"id":"c0","name":"Identification","stubStudies":[{"id":"s1","title":"T"}]}"#,
        )
        .unwrap();
        assert_eq!(col.stub_studies.len(), 1);
        let json = serde_json::to_value(&col).unwrap();
        assert!(json.get("stubStudies").is_some());
    }
}
