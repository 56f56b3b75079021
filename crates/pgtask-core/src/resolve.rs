use std::sync::Arc;

use pgtask_model::Cluster;
use tracing::debug;

use crate::{
    error::RmdataError,
    store::{ResourceKind, ResourceStore, StoreError},
};

/// Looks up cluster descriptors in the resource store.
#[derive(Clone)]
pub struct ClusterResolver {
    store: Arc<dyn ResourceStore>,
}

impl ClusterResolver {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    /// Fetch cluster `name` from `namespace` on behalf of `task`.
    pub async fn resolve(
        &self,
        task: &str,
        namespace: &str,
        name: &str,
    ) -> Result<Cluster, RmdataError> {
        let raw = match self.store.get(ResourceKind::Cluster, namespace, name).await {
            Ok(raw) => raw,
            Err(StoreError::NotFound { .. }) => {
                return Err(RmdataError::NotFound {
                    task: task.to_string(),
                    cluster: name.to_string(),
                });
            }
            Err(source) => {
                return Err(RmdataError::Lookup {
                    task: task.to_string(),
                    cluster: name.to_string(),
                    source,
                });
            }
        };

        let cluster: Cluster = serde_json::from_value(raw).map_err(|e| RmdataError::Lookup {
            task: task.to_string(),
            cluster: name.to_string(),
            source: StoreError::Malformed(e.to_string()),
        })?;

        debug!(cluster = name, namespace, "cluster resolved");
        Ok(cluster)
    }
}
