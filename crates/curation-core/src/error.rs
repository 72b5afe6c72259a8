//! Error types for curation-core

use thiserror::Error;

use crate::reconciliation::Resolution;

/// Result type alias for curation operations
pub type Result<T> = std::result::Result<T, CurationError>;

/// Main error type for curation operations
#[derive(Error, Debug)]
pub enum CurationError {
    /// Reconciliation workflow errors
    #[error("Reconciliation error: {0}")]
    Reconcile(#[from] ReconcileError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Reconciliation-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Commit attempted while stubs are still unresolved
    #[error("Resolution incomplete: {unresolved} stub(s) still unresolved")]
    IncompleteResolution { unresolved: usize },

    /// Every member of a cluster was marked duplicate while a keeper is required
    #[error("No stub kept in duplicate cluster {cluster}")]
    NoStubKept { cluster: usize },

    /// Resolution that a reviewer cannot assign
    #[error("Invalid resolution: {0} cannot be assigned")]
    InvalidResolution(Resolution),

    /// The project has no column to import into
    #[error("Project has no intake column")]
    MissingIntakeColumn,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    Toml(String),

    #[error("JSON parse error: {0}")]
    Json(String),

    /// Duplicate tag unusable for marking duplicates
    #[error("Invalid duplicate tag: {0}")]
    InvalidDuplicateTag(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Toml(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err.to_string())
    }
}

impl From<serde_json::Error> for CurationError {
    fn from(err: serde_json::Error) -> Self {
        CurationError::Serialization(err.to_string())
    }
}
