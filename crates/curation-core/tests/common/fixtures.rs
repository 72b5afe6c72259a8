//! Shared stubs and columns for integration tests

use curation_domain::{Column, Source, StudyStub, Tag};

/// A stub with a fixed id and optional identifiers
pub fn stub(id: &str, title: &str, doi: &str, pmid: &str) -> StudyStub {
    StudyStub::new(title)
        .with_id(id)
        .with_doi(doi)
        .with_pmid(pmid)
        .with_source(Source::new("pubmed", "PubMed"))
}

/// Ids of a column's stubs, in order
#[allow(dead_code)]
pub fn column_ids(column: &Column) -> Vec<&str> {
    column.stub_studies.iter().map(|s| s.id.as_str()).collect()
}

/// Three-stage project: identification, screening, included
#[allow(dead_code)]
pub fn project_columns() -> Vec<Column> {
    vec![
        Column::new("Identification").with_stubs(vec![
            stub("p-intake", "Amygdala Reactivity to Faces", "10.1/faces", ""),
        ]),
        Column::new("Screening").with_stubs(vec![
            stub("p-screen-1", "Working Memory Load", "", "3001"),
            stub("p-screen-2", "Emotion Regulation", "", ""),
        ]),
        Column::new("Included").with_stubs(vec![
            stub("p-incl-1", "Pain Anticipation", "10.1/pain", "4001"),
            stub("p-incl-2", "Reward Prediction Error", "10.1/reward", ""),
            stub("p-incl-3", "Insula and Interoception", "", "4003")
                .with_exclusion(Some(Tag::exclusion("excl-review", "Review article"))),
        ]),
    ]
}
