use async_trait::async_trait;
use pgtask_model::Event;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BusError {
    #[error("transport error: {0}")]
    Transport(String),
}

/// Topic-addressed event bus with at-most-once delivery.
#[async_trait]
pub trait EventBus: Send + Sync + 'static {
    async fn publish(&self, event: &Event) -> Result<(), BusError>;
}
