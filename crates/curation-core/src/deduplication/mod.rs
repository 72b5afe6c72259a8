//! Duplicate detection for study stubs
//!
//! Stubs are keyed by DOI, PMID and normalized title; stubs sharing any key
//! land in the same bucket.

mod grouping;
mod keys;

pub use grouping::{group_by_duplicate_key, DuplicateGroups};
pub use keys::{derive_keys, normalize_title, DuplicateKey};
