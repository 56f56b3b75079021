use async_trait::async_trait;
use pgtask_model::{JobId, JobSpec};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecError {
    #[error("job {0} already exists")]
    AlreadyExists(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Execution environment that runs one-shot worker jobs.
#[async_trait]
pub trait JobExecutor: Send + Sync + 'static {
    /// Submit a job under `namespace`, returning the identity assigned on acceptance.
    async fn submit(&self, namespace: &str, job: &JobSpec) -> Result<JobId, ExecError>;
}
