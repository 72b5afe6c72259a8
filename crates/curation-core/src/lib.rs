//! Curation Core - duplicate detection and import reconciliation
//!
//! This crate holds the logic behind importing bibliographic stubs into a
//! curation project:
//!
//! - **Deduplication**: derive DOI / PMID / title keys from a stub and group
//!   stubs sharing a key into duplicate clusters
//! - **Batch reconciliation**: let a reviewer resolve duplicates inside a
//!   single import batch
//! - **Project reconciliation**: pair imported stubs with matching stubs
//!   already in the project's columns, auto-resolve the rest of a case once
//!   one member is kept, and merge the batch into the columns
//! - **Intake**: prepend a batch to the intake column
//! - **Config**: the duplicate tag and keeper policy
//!
//! # Workflow
//!
//! ```text
//! import batch ─► BatchReconciliation ─► ProjectReconciliation ─► columns
//!                  (within the batch)      (batch vs. project)
//! ```
//!
//! Sessions are plain values: every `resolve` returns a new session and
//! nothing is written until `commit` succeeds.

pub mod config;
pub mod deduplication;
pub mod error;
pub mod intake;
pub mod reconciliation;

pub use config::ReconcileConfig;
pub use deduplication::{
    derive_keys, group_by_duplicate_key, normalize_title, DuplicateGroups, DuplicateKey,
};
pub use error::{ConfigError, CurationError, ReconcileError, Result};
pub use intake::prepend_to_intake;
pub use reconciliation::{
    find_intra_batch_duplicates, find_project_duplicates, BatchReconciliation, CaseMember,
    DuplicateCase, ImportedCandidate, MergeOutcome, ProjectCandidate, ProjectReconciliation,
    ResolvedStub, Resolution,
};
