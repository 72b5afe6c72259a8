//! Domain types for curating neuroimaging studies
//!
//! This crate provides the records a curation project is made of:
//! - StudyStub: a lightweight bibliographic record under curation
//! - Tag: free-form and exclusion labels, including the well-known duplicate tag
//! - Source: where a stub was identified (PubMed, Scopus, a manual import, ...)
//! - Column: an ordered pipeline stage holding stubs
//!
//! All types serialize with the camelCase field names used on the wire.

pub mod column;
pub mod source;
pub mod stub;
pub mod tag;

pub use column::*;
pub use source::*;
pub use stub::*;
pub use tag::*;
