use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ObjectMeta;

/// A declarative request describing a maintenance operation against a cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub metadata: ObjectMeta,
    pub spec: TaskSpec,
    #[serde(default)]
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpec {
    /// Task name as recorded by the creator; jobs carry it for traceability.
    pub name: String,
    /// Flat operation parameters, see the `PARAM_*` constants.
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

/// Mutable part of a task: free-form timestamps keyed by marker name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub markers: BTreeMap<String, String>,
}

impl Task {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            metadata: ObjectMeta::new(name.clone(), namespace),
            spec: TaskSpec {
                name,
                parameters: BTreeMap::new(),
            },
            status: TaskStatus::default(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.labels.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }

    /// Parameter value, or an empty string when the key is absent.
    pub fn param(&self, key: &str) -> &str {
        self.spec
            .parameters
            .get(key)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn marker(&self, key: &str) -> Option<&str> {
        self.status.markers.get(key).map(String::as_str)
    }

    pub fn set_marker(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.status.markers.insert(key.into(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PARAM_CLUSTER, PARAM_DELETE_DATA};

    #[test]
    fn missing_param_reads_as_empty() {
        let task = Task::new("t1", "pgo").with_param(PARAM_CLUSTER, "hippo");

        assert_eq!(task.param(PARAM_CLUSTER), "hippo");
        assert_eq!(task.param(PARAM_DELETE_DATA), "");
    }

    #[test]
    fn status_without_markers_is_omitted_from_json() {
        let task = Task::new("t1", "pgo");
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["status"], serde_json::json!({}));
        assert_eq!(json["spec"]["name"], "t1");
        assert_eq!(json["metadata"]["namespace"], "pgo");
    }

    #[test]
    fn decodes_task_without_status() {
        let raw = r#"{
            "metadata": {"name": "t1", "namespace": "pgo"},
            "spec": {"name": "t1", "parameters": {"cluster": "hippo"}}
        }"#;

        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.param(PARAM_CLUSTER), "hippo");
        assert!(task.status.markers.is_empty());
    }

    #[test]
    fn set_marker_overwrites() {
        let mut task = Task::new("t1", "pgo");
        task.set_marker("deleteDataStarted", "a");
        task.set_marker("deleteDataStarted", "b");

        assert_eq!(task.marker("deleteDataStarted"), Some("b"));
        assert_eq!(task.status.markers.len(), 1);
    }
}
