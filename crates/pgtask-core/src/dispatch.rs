use std::sync::Arc;

use pgtask_model::{JobId, JobSpec};
use tracing::debug;

use crate::{error::RmdataError, exec::JobExecutor};

/// Hands built jobs to the execution environment. Never retries.
#[derive(Clone)]
pub struct Dispatcher {
    jobs: Arc<dyn JobExecutor>,
}

impl Dispatcher {
    pub fn new(jobs: Arc<dyn JobExecutor>) -> Self {
        Self { jobs }
    }

    pub async fn dispatch(
        &self,
        task: &str,
        namespace: &str,
        job: &JobSpec,
    ) -> Result<JobId, RmdataError> {
        let id = self
            .jobs
            .submit(namespace, job)
            .await
            .map_err(|source| RmdataError::Submission {
                task: task.to_string(),
                cluster: job.cluster_name.clone(),
                job: job.name.clone(),
                source,
            })?;

        debug!(job = %job.name, %id, "rmdata job created");
        Ok(id)
    }
}
