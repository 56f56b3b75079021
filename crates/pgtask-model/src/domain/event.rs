use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::EVENT_TOPIC_CLUSTER;

/// Kind tag of a published event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    DeleteCluster,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHeader {
    pub namespace: String,
    /// User on whose behalf the operation runs.
    pub username: String,
    pub topics: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub event_type: EventType,
}

/// Immutable notification record. Delivery is fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub header: EventHeader,
    pub cluster_name: String,
    /// Stable identifier of the cluster, taken from the task's `pg-cluster-id` label.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cluster_identifier: String,
}

impl Event {
    /// Build a cluster-deletion event addressed to the cluster topic.
    pub fn delete_cluster(
        namespace: impl Into<String>,
        username: impl Into<String>,
        cluster_name: impl Into<String>,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            header: EventHeader {
                namespace: namespace.into(),
                username: username.into(),
                topics: vec![EVENT_TOPIC_CLUSTER.to_string()],
                timestamp,
                event_type: EventType::DeleteCluster,
            },
            cluster_name: cluster_name.into(),
            cluster_identifier: String::new(),
        }
    }

    pub fn with_cluster_identifier(mut self, id: impl Into<String>) -> Self {
        self.cluster_identifier = id.into();
        self
    }

    pub fn event_type(&self) -> EventType {
        self.header.event_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_cluster_targets_cluster_topic() {
        let ev = Event::delete_cluster("pgo", "admin", "hippo", OffsetDateTime::UNIX_EPOCH);

        assert_eq!(ev.header.topics, vec![EVENT_TOPIC_CLUSTER.to_string()]);
        assert_eq!(ev.event_type(), EventType::DeleteCluster);

        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["header"]["eventType"], "DeleteCluster");
        assert_eq!(json["header"]["timestamp"], "1970-01-01T00:00:00Z");
        assert_eq!(json["clusterName"], "hippo");
        assert!(json.get("clusterIdentifier").is_none());
    }

    #[test]
    fn cluster_identifier_is_serialized_when_set() {
        let ev = Event::delete_cluster("pgo", "admin", "hippo", OffsetDateTime::UNIX_EPOCH)
            .with_cluster_identifier("id-42");

        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["clusterIdentifier"], "id-42");

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, ev);
    }
}
