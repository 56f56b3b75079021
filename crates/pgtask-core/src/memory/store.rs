use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use async_trait::async_trait;
use pgtask_model::{Cluster, Task};
use serde_json::Value;
use tracing::trace;

use crate::{
    patch::apply_merge_patch,
    store::{ResourceKind, ResourceStore, StoreError},
};

type Key = (ResourceKind, String, String);

/// In-memory resource store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryStoreInner>>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Objects indexed by (kind, namespace, name).
    objects: HashMap<Key, Value>,
    /// Every merge patch accepted, in arrival order.
    patches: Vec<(Key, Value)>,
    fail_get: Option<StoreError>,
    fail_patch: Option<StoreError>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw object, replacing any previous one.
    pub fn insert(&self, kind: ResourceKind, namespace: &str, name: &str, object: Value) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner
            .objects
            .insert((kind, namespace.to_string(), name.to_string()), object);
    }

    pub fn insert_task(&self, task: &Task) -> Result<(), StoreError> {
        let object =
            serde_json::to_value(task).map_err(|e| StoreError::Malformed(e.to_string()))?;
        self.insert(ResourceKind::Task, task.namespace(), task.name(), object);
        Ok(())
    }

    pub fn insert_cluster(&self, cluster: &Cluster) -> Result<(), StoreError> {
        let object =
            serde_json::to_value(cluster).map_err(|e| StoreError::Malformed(e.to_string()))?;
        self.insert(
            ResourceKind::Cluster,
            &cluster.metadata.namespace,
            cluster.name(),
            object,
        );
        Ok(())
    }

    /// Current task as stored, decoded.
    pub fn task(&self, namespace: &str, name: &str) -> Option<Task> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .objects
            .get(&(ResourceKind::Task, namespace.to_string(), name.to_string()))
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Merge patches accepted so far, in arrival order.
    pub fn patches(&self) -> Vec<Value> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.patches.iter().map(|(_, p)| p.clone()).collect()
    }

    /// Make every subsequent `get` fail with `err`.
    pub fn fail_gets_with(&self, err: StoreError) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail_get = Some(err);
    }

    /// Make every subsequent `patch` fail with `err`.
    pub fn fail_patches_with(&self, err: StoreError) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail_patch = Some(err);
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn get(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<Value, StoreError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(err) = &inner.fail_get {
            return Err(err.clone());
        }
        inner
            .objects
            .get(&(kind, namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                kind,
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }

    async fn patch(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
        merge_patch: &Value,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(err) = &inner.fail_patch {
            return Err(err.clone());
        }

        let key = (kind, namespace.to_string(), name.to_string());
        let Some(object) = inner.objects.get_mut(&key) else {
            return Err(StoreError::NotFound {
                kind,
                namespace: namespace.to_string(),
                name: name.to_string(),
            });
        };
        apply_merge_patch(object, merge_patch);
        inner.patches.push((key, merge_patch.clone()));

        trace!(%kind, namespace, name, "merge patch applied");
        Ok(())
    }
}
