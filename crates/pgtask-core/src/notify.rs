use std::sync::Arc;

use pgtask_model::{Event, LABEL_CLUSTER_IDENTIFIER, LABEL_PGOUSER, Task};
use time::OffsetDateTime;
use tracing::{debug, error};

use crate::{bus::EventBus, error::NotificationError};

/// Result of the best-effort notification step.
#[derive(Debug)]
pub enum Notification {
    Delivered,
    Failed(NotificationError),
}

impl Notification {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Notification::Delivered)
    }
}

/// Publishes cluster lifecycle events.
#[derive(Clone)]
pub struct Notifier {
    bus: Arc<dyn EventBus>,
}

impl Notifier {
    pub fn new(bus: Arc<dyn EventBus>) -> Self {
        Self { bus }
    }

    /// Announce that `cluster` is being deleted.
    ///
    /// Failures are logged and returned as [`Notification::Failed`]; they never abort the caller.
    pub async fn notify(&self, task: &Task, cluster: &str, namespace: &str) -> Notification {
        let event = Event::delete_cluster(
            namespace,
            task.metadata.label(LABEL_PGOUSER),
            cluster,
            OffsetDateTime::now_utc(),
        )
        .with_cluster_identifier(task.metadata.label(LABEL_CLUSTER_IDENTIFIER));

        match self.bus.publish(&event).await {
            Ok(()) => {
                debug!(cluster, namespace, "delete cluster event published");
                Notification::Delivered
            }
            Err(source) => {
                let err = NotificationError {
                    event: "DeleteCluster",
                    cluster: cluster.to_string(),
                    source,
                };
                error!(task = task.name(), "{err}");
                Notification::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BusError, memory::MemoryBus};
    use pgtask_model::{EVENT_TOPIC_CLUSTER, EventType};

    #[tokio::test]
    async fn event_carries_user_and_cluster() {
        let bus = MemoryBus::new();
        let notifier = Notifier::new(Arc::new(bus.clone()));
        let task = Task::new("t1", "pgo")
            .with_label(LABEL_PGOUSER, "admin")
            .with_label(LABEL_CLUSTER_IDENTIFIER, "id-42");

        let res = notifier.notify(&task, "hippo", "pgo").await;
        assert!(res.is_delivered());

        let events = bus.on_topic(EVENT_TOPIC_CLUSTER);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].cluster_name, "hippo");
        assert_eq!(events[0].header.username, "admin");
        assert_eq!(events[0].cluster_identifier, "id-42");
        assert_eq!(events[0].header.namespace, "pgo");
        assert_eq!(events[0].event_type(), EventType::DeleteCluster);
    }

    #[tokio::test]
    async fn bus_failure_is_reported_not_raised() {
        let bus = MemoryBus::new();
        bus.fail_with(BusError::Transport("refused".into()));
        let notifier = Notifier::new(Arc::new(bus));

        let res = notifier.notify(&Task::new("t1", "pgo"), "hippo", "pgo").await;
        match res {
            Notification::Failed(err) => assert_eq!(err.cluster, "hippo"),
            Notification::Delivered => panic!("expected failure"),
        }
    }
}
