use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use pgtask_model::Event;

use crate::bus::{BusError, EventBus};

/// Event bus that keeps published events in memory.
#[derive(Clone, Default)]
pub struct MemoryBus {
    inner: Arc<RwLock<MemoryBusInner>>,
}

#[derive(Default)]
struct MemoryBusInner {
    events: Vec<Event>,
    fail: Option<BusError>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.events.clone()
    }

    /// Events published on `topic`.
    pub fn on_topic(&self, topic: &str) -> Vec<Event> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .events
            .iter()
            .filter(|e| e.header.topics.iter().any(|t| t == topic))
            .cloned()
            .collect()
    }

    pub fn fail_with(&self, err: BusError) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail = Some(err);
    }
}

#[async_trait]
impl EventBus for MemoryBus {
    async fn publish(&self, event: &Event) -> Result<(), BusError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(err) = &inner.fail {
            return Err(err.clone());
        }
        inner.events.push(event.clone());
        Ok(())
    }
}
