use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_IMAGE_PREFIX: &str = "registry.developers.crunchydata.com/crunchydata";
const DEFAULT_IMAGE_TAG: &str = "latest";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid operator config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid operator config: {0}")]
    Invalid(String),
}

/// Operator-wide defaults consumed when building worker jobs.
///
/// Immutable once loaded; callers pass it explicitly to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperatorConfig {
    /// Registry prefix used when a cluster does not override it.
    pub image_prefix: String,
    /// Tag of operator-provided images. Clusters cannot override it.
    pub image_tag: String,
    /// Full image references keyed by logical image name, e.g. `pgo-rmdata`.
    pub image_overrides: BTreeMap<String, String>,
    /// Skip the database filesystem group in worker security contexts.
    pub disable_fs_group: bool,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            image_prefix: DEFAULT_IMAGE_PREFIX.to_string(),
            image_tag: DEFAULT_IMAGE_TAG.to_string(),
            image_overrides: BTreeMap::new(),
            disable_fs_group: false,
        }
    }
}

impl OperatorConfig {
    /// Parse and validate a JSON document; absent fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("imagePrefix is empty".into()));
        }
        if self.image_tag.trim().is_empty() {
            return Err(ConfigError::Invalid("imageTag is empty".into()));
        }
        Ok(())
    }

    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_prefix = prefix.into();
        self
    }

    pub fn with_image_tag(mut self, tag: impl Into<String>) -> Self {
        self.image_tag = tag.into();
        self
    }

    pub fn with_image_override(mut self, image: impl Into<String>, reference: impl Into<String>) -> Self {
        self.image_overrides.insert(image.into(), reference.into());
        self
    }

    /// Override for a logical image name. Empty entries count as absent.
    pub fn image_override(&self, image: &str) -> Option<&str> {
        self.image_overrides
            .get(image)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = OperatorConfig::from_json(r#"{"imageTag": "v1"}"#).unwrap();

        assert_eq!(cfg.image_tag, "v1");
        assert_eq!(cfg.image_prefix, DEFAULT_IMAGE_PREFIX);
        assert!(cfg.image_overrides.is_empty());
        assert!(!cfg.disable_fs_group);
    }

    #[test]
    fn empty_tag_is_rejected() {
        let err = OperatorConfig::from_json(r#"{"imageTag": " "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = OperatorConfig::from_json("{").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn empty_override_counts_as_absent() {
        let cfg = OperatorConfig::default()
            .with_image_override("pgo-rmdata", "")
            .with_image_override("pgo-backrest", "example.com/backrest:1");

        assert_eq!(cfg.image_override("pgo-rmdata"), None);
        assert_eq!(cfg.image_override("pgo-backrest"), Some("example.com/backrest:1"));
    }
}
