//! Duplicate reconciliation workflows
//!
//! Two sessions share the grouping primitive:
//! - [`BatchReconciliation`] resolves duplicates inside one import batch
//! - [`ProjectReconciliation`] resolves an import batch against the stubs
//!   already in a project's columns and merges it in

mod batch;
mod merge;
mod project;
mod resolution;

pub use batch::{find_intra_batch_duplicates, BatchReconciliation, ResolvedStub};
pub use merge::MergeOutcome;
pub use project::{
    find_project_duplicates, flatten_columns, CaseMember, DuplicateCase, ImportedCandidate,
    ProjectCandidate, ProjectReconciliation,
};
pub use resolution::Resolution;
