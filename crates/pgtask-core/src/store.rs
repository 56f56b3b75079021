use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Resource kinds the orchestrator reads or patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Task,
    Cluster,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Task => "pgtask",
            ResourceKind::Cluster => "pgcluster",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} {namespace}/{name} not found")]
    NotFound {
        kind: ResourceKind,
        namespace: String,
        name: String,
    },
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed object: {0}")]
    Malformed(String),
}

/// Declarative resource store holding tasks and clusters.
///
/// Objects travel as JSON documents. `patch` takes an RFC 7386 merge patch and applies it
/// server-side with last-writer-wins semantics per field.
#[async_trait]
pub trait ResourceStore: Send + Sync + 'static {
    async fn get(&self, kind: ResourceKind, namespace: &str, name: &str)
    -> Result<Value, StoreError>;

    async fn patch(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
        merge_patch: &Value,
    ) -> Result<(), StoreError>;
}
