use thiserror::Error;

use crate::{BusError, ExecError, StoreError};

/// Progress of a single removal invocation.
///
/// Every invocation moves forward only; there is no retry or rollback transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    MarkedStarted,
    ClusterResolved,
    JobBuilt,
    JobDispatched,
    Notified,
    NotifyFailed,
    Done,
}

/// Fatal errors of a removal invocation.
///
/// Each variant names the task and cluster so the invoking control loop can diagnose
/// and decide whether to retry.
#[derive(Debug, Error)]
pub enum RmdataError {
    #[error("task {task}: invalid parameters: {reason}")]
    Validation { task: String, reason: String },

    #[error("task {task}: cluster {cluster} not found")]
    NotFound { task: String, cluster: String },

    #[error("task {task}: lookup of cluster {cluster} failed: {source}")]
    Lookup {
        task: String,
        cluster: String,
        #[source]
        source: StoreError,
    },

    #[error("task {task}: could not set {marker} marker for cluster {cluster}: {source}")]
    Patch {
        task: String,
        cluster: String,
        marker: String,
        #[source]
        source: StoreError,
    },

    #[error("task {task}: submission of job {job} for cluster {cluster} failed: {source}")]
    Submission {
        task: String,
        cluster: String,
        job: String,
        #[source]
        source: ExecError,
    },
}

impl RmdataError {
    /// Last stage reached before the failure.
    pub fn stage(&self) -> Stage {
        match self {
            RmdataError::Validation { .. } | RmdataError::Patch { .. } => Stage::Start,
            RmdataError::NotFound { .. } | RmdataError::Lookup { .. } => Stage::MarkedStarted,
            RmdataError::Submission { .. } => Stage::JobBuilt,
        }
    }

    /// Whether the status marker was durably written before the failure.
    pub fn marker_recorded(&self) -> bool {
        self.stage() != Stage::Start
    }

    pub fn task(&self) -> &str {
        match self {
            RmdataError::Validation { task, .. }
            | RmdataError::NotFound { task, .. }
            | RmdataError::Lookup { task, .. }
            | RmdataError::Patch { task, .. }
            | RmdataError::Submission { task, .. } => task,
        }
    }
}

/// Failed delivery of a notification. Logged, never propagated as a failure.
#[derive(Debug, Error)]
#[error("publishing {event} for cluster {cluster} failed: {source}")]
pub struct NotificationError {
    pub event: &'static str,
    pub cluster: String,
    #[source]
    pub source: BusError,
}
