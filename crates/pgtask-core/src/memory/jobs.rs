use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use pgtask_model::{JobId, JobSpec};
use tracing::trace;

use crate::exec::{ExecError, JobExecutor};

/// Job executor that only records submissions.
#[derive(Clone, Default)]
pub struct MemoryJobs {
    inner: Arc<RwLock<MemoryJobsInner>>,
}

#[derive(Default)]
struct MemoryJobsInner {
    submitted: Vec<(String, JobSpec)>,
    fail: Option<ExecError>,
}

impl MemoryJobs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted jobs with their namespace, in submission order.
    pub fn submitted(&self) -> Vec<(String, JobSpec)> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.submitted.clone()
    }

    pub fn count(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.submitted.len()
    }

    /// Make every subsequent submission fail with `err`.
    pub fn fail_with(&self, err: ExecError) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail = Some(err);
    }
}

#[async_trait]
impl JobExecutor for MemoryJobs {
    async fn submit(&self, namespace: &str, job: &JobSpec) -> Result<JobId, ExecError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(err) = &inner.fail {
            return Err(err.clone());
        }
        if inner
            .submitted
            .iter()
            .any(|(ns, j)| ns == namespace && j.name == job.name)
        {
            return Err(ExecError::AlreadyExists(job.name.clone()));
        }

        inner.submitted.push((namespace.to_string(), job.clone()));
        let id = JobId::from(uuid::Uuid::new_v4().to_string());
        trace!(job = %job.name, %id, "job accepted");
        Ok(id)
    }
}
