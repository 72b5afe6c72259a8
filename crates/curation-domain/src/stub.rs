//! Study stub domain model

use super::{Source, Tag};
use serde::{Deserialize, Serialize};

/// A candidate bibliographic record under curation
///
/// The `id` is assigned once at creation and never changes. A stub whose
/// `exclusion_tag` is set has been excluded from further curation but stays
/// addressable by id.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct StudyStub {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub keywords: String,
    pub pmid: String,
    pub doi: String,
    pub article_year: Option<String>,
    pub abstract_text: String,
    pub journal: String,
    pub article_link: String,
    pub exclusion_tag: Option<Tag>,
    pub tags: Vec<Tag>,
    pub identification_source: Option<Source>,
}

impl StudyStub {
    /// Create a new stub with a fresh id
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = doi.into();
        self
    }

    pub fn with_pmid(mut self, pmid: impl Into<String>) -> Self {
        self.pmid = pmid.into();
        self
    }

    pub fn with_authors(mut self, authors: impl Into<String>) -> Self {
        self.authors = authors.into();
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.article_year = Some(year.into());
        self
    }

    pub fn with_exclusion(mut self, tag: Option<Tag>) -> Self {
        self.exclusion_tag = tag;
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.identification_source = Some(source);
        self
    }

    /// Whether the stub carries any exclusion tag
    pub fn is_excluded(&self) -> bool {
        self.exclusion_tag.is_some()
    }

    /// Whether the stub is excluded with the given tag id
    pub fn is_excluded_by(&self, tag_id: &str) -> bool {
        self.exclusion_tag
            .as_ref()
            .map(|tag| tag.id == tag_id)
            .unwrap_or(false)
    }

    /// Stubs without an id cannot be matched back during a merge
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

impl AsRef<StudyStub> for StudyStub {
    fn as_ref(&self) -> &StudyStub {
        self
    }
}
