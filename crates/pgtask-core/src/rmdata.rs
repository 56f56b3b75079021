use std::sync::Arc;

use pgtask_model::{JobId, MARKER_DELETE_DATA_STARTED, OperatorConfig, Task};
use time::OffsetDateTime;
use tracing::{error, info, instrument, trace};

use crate::{
    builder::{JobNamer, JobSpecBuilder},
    bus::EventBus,
    dispatch::Dispatcher,
    error::{RmdataError, Stage},
    exec::JobExecutor,
    marker::StatusMarker,
    notify::{Notification, Notifier},
    params::extract,
    resolve::ClusterResolver,
    store::ResourceStore,
};

/// How much the pipeline reports about the job it builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    #[default]
    Normal,
    /// Also emit the full job specification as JSON before dispatch.
    Dump,
}

#[derive(Debug, Clone, Default)]
pub struct RemoveDataOptions {
    pub verbosity: Verbosity,
}

/// Successful removal invocation.
#[derive(Debug)]
pub struct RemoveDataOutcome {
    pub job_id: JobId,
    pub job_name: String,
    pub cluster: String,
    /// Value written to the `deleteDataStarted` marker.
    pub started_at: String,
    pub notification: Notification,
}

impl RemoveDataOutcome {
    /// Stage the notifier left the invocation in.
    pub fn notify_stage(&self) -> Stage {
        if self.notification.is_delivered() {
            Stage::Notified
        } else {
            Stage::NotifyFailed
        }
    }
}

/// Data-removal orchestrator.
///
/// One call to [`RemoveData::run`] is one forward pass over a task:
/// validate, mark started, resolve cluster, build job, dispatch, notify.
/// The marker is written before any job exists; a failed notification does not fail the run.
pub struct RemoveData {
    marker: StatusMarker,
    resolver: ClusterResolver,
    builder: JobSpecBuilder,
    dispatcher: Dispatcher,
    notifier: Notifier,
    options: RemoveDataOptions,
}

impl RemoveData {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        jobs: Arc<dyn JobExecutor>,
        bus: Arc<dyn EventBus>,
        config: Arc<OperatorConfig>,
    ) -> Self {
        Self {
            marker: StatusMarker::new(Arc::clone(&store)),
            resolver: ClusterResolver::new(store),
            builder: JobSpecBuilder::new(config),
            dispatcher: Dispatcher::new(jobs),
            notifier: Notifier::new(bus),
            options: RemoveDataOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RemoveDataOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_namer(mut self, namer: JobNamer) -> Self {
        self.builder = self.builder.with_namer(namer);
        self
    }

    #[instrument(level = "debug", skip(self, task), fields(task = %task.name(), namespace = %task.namespace()))]
    pub async fn run(&self, task: &Task) -> Result<RemoveDataOutcome, RmdataError> {
        let res = self.run_stages(task).await;
        if let Err(e) = &res {
            error!(
                task = e.task(),
                cluster = task.param(pgtask_model::PARAM_CLUSTER),
                stage = ?e.stage(),
                marker_recorded = e.marker_recorded(),
                "data removal failed: {e}"
            );
        }
        res
    }

    async fn run_stages(&self, task: &Task) -> Result<RemoveDataOutcome, RmdataError> {
        let params = extract(task)?;
        let namespace = task.namespace();

        let started_at = self
            .marker
            .mark(
                task,
                &params.cluster,
                MARKER_DELETE_DATA_STARTED,
                OffsetDateTime::now_utc(),
            )
            .await?;
        trace!(stage = ?Stage::MarkedStarted, %started_at, "deletion marker recorded");

        let cluster = self
            .resolver
            .resolve(task.name(), namespace, &params.cluster)
            .await?;
        trace!(stage = ?Stage::ClusterResolved, cluster = cluster.name(), "cluster resolved");

        let job = self.builder.build(&params, task, &cluster);
        trace!(stage = ?Stage::JobBuilt, job = %job.name, "job built");
        if self.options.verbosity == Verbosity::Dump {
            match serde_json::to_string_pretty(&job) {
                Ok(doc) => info!(target: "pgtask.rmdata.dump", job = %job.name, "{doc}"),
                Err(e) => error!(job = %job.name, "cannot render job: {e}"),
            }
        }

        let job_id = self.dispatcher.dispatch(task.name(), namespace, &job).await?;
        trace!(stage = ?Stage::JobDispatched, %job_id, "job dispatched");

        let notification = self.notifier.notify(task, &params.cluster, namespace).await;

        let outcome = RemoveDataOutcome {
            job_id,
            job_name: job.name,
            cluster: params.cluster,
            started_at,
            notification,
        };
        info!(
            job = %outcome.job_name,
            cluster = %outcome.cluster,
            stage = ?Stage::Done,
            notified = outcome.notification.is_delivered(),
            "rmdata job dispatched"
        );
        Ok(outcome)
    }
}
