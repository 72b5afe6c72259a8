//! Configuration for reconciliation
//!
//! Loaded from TOML or JSON:
//!
//! ```toml
//! requireKeeper = false
//!
//! [duplicateTag]
//! id = "duplicate_exclusion_id"
//! label = "Duplicate"
//! isExclusionTag = true
//! isAssignable = false
//! ```

use std::path::Path;

use curation_domain::Tag;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Reconciliation settings
///
/// Keys are camelCase like the rest of the wire format; unknown keys are
/// rejected rather than ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReconcileConfig {
    /// Tag written onto stubs resolved as duplicates
    #[serde(default = "Tag::duplicate")]
    pub duplicate_tag: Tag,
    /// Refuse batch clusters in which every stub is marked duplicate
    #[serde(default)]
    pub require_keeper: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            duplicate_tag: Tag::duplicate(),
            require_keeper: false,
        }
    }
}

impl ReconcileConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_require_keeper(mut self, require_keeper: bool) -> Self {
        self.require_keeper = require_keeper;
        self
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a file, picking the format by extension (`.json`, else TOML)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json(&contents)
        } else {
            Self::from_toml(&contents)
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duplicate_tag.id.trim().is_empty() {
            return Err(ConfigError::InvalidDuplicateTag(
                "duplicate tag id must not be empty".to_string(),
            ));
        }

        if !self.duplicate_tag.is_exclusion() {
            return Err(ConfigError::InvalidDuplicateTag(format!(
                "tag '{}' is not an exclusion tag",
                self.duplicate_tag.id
            )));
        }

        Ok(())
    }
}
