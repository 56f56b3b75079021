use std::sync::Arc;

use pgtask_model::Task;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::debug;

use crate::{
    error::RmdataError,
    patch::{create_merge_patch, is_noop},
    store::{ResourceKind, ResourceStore, StoreError},
};

/// Records operation markers on task status through merge patches.
#[derive(Clone)]
pub struct StatusMarker {
    store: Arc<dyn ResourceStore>,
}

impl StatusMarker {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    /// Set `marker` on the status of `task` to `now` (RFC 3339, whole seconds) and return the written value.
    ///
    /// The patch sent is the diff between the task as given and the marked copy,
    /// so status fields changed elsewhere in the meantime are left alone.
    /// When the task already carries the same value nothing is sent.
    /// `cluster` is only used to give errors context.
    pub async fn mark(
        &self,
        task: &Task,
        cluster: &str,
        marker: &str,
        now: OffsetDateTime,
    ) -> Result<String, RmdataError> {
        let fail = |source: StoreError| RmdataError::Patch {
            task: task.name().to_string(),
            cluster: cluster.to_string(),
            marker: marker.to_string(),
            source,
        };

        let before = serde_json::to_value(task).map_err(|e| fail(StoreError::Malformed(e.to_string())))?;

        let stamp = now
            .replace_nanosecond(0)
            .unwrap_or(now)
            .format(&Rfc3339)
            .map_err(|e| fail(StoreError::Malformed(format!("timestamp: {e}"))))?;

        let mut marked = task.clone();
        marked.set_marker(marker, stamp.clone());
        let after = serde_json::to_value(&marked).map_err(|e| fail(StoreError::Malformed(e.to_string())))?;

        let patch = create_merge_patch(&before, &after);
        if is_noop(&patch) {
            debug!(task = task.name(), marker, "marker already set");
            return Ok(stamp);
        }
        debug!(task = task.name(), %patch, "status marker patch");

        self.store
            .patch(ResourceKind::Task, task.namespace(), task.name(), &patch)
            .await
            .map_err(fail)?;
        Ok(stamp)
    }
}
