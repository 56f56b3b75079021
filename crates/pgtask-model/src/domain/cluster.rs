use serde::{Deserialize, Serialize};

use crate::ObjectMeta;

/// Declarative specification of a managed database cluster.
///
/// Owned by the cluster subsystem and read-only here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ClusterSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Per-cluster image prefix override. Empty means "use the operator default".
    #[serde(default)]
    pub image_prefix: String,
    /// Image tag of the database containers. Worker jobs never use it.
    #[serde(default)]
    pub image_tag: String,
    #[serde(default)]
    pub storage: StorageSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supplemental_groups: Vec<i64>,
}

impl Cluster {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            metadata: ObjectMeta::new(name, namespace),
            spec: ClusterSpec::default(),
        }
    }

    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.spec.image_prefix = prefix.into();
        self
    }

    pub fn with_supplemental_groups(mut self, groups: Vec<i64>) -> Self {
        self.spec.storage.supplemental_groups = groups;
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}
