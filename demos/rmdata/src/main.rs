use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use pgtask_core::{
    Notification, RemoveData, RemoveDataOptions, Verbosity,
    memory::{MemoryBus, MemoryJobs, MemoryStore},
};
use pgtask_model::{
    Cluster, LABEL_PGOUSER, MARKER_DELETE_DATA_STARTED, OperatorConfig, PARAM_CLUSTER,
    PARAM_DELETE_BACKUPS, PARAM_DELETE_DATA, Task,
};
use pgtask_observe::{LoggerConfig, logger_init};

const NAMESPACE: &str = "pgo";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Logger
    logger_init(&LoggerConfig::from_env()?)?;

    // 2) Operator config
    let config = match std::env::var("PGTASK_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading operator config {path}"))?;
            OperatorConfig::from_json(&raw)?
        }
        Err(_) => OperatorConfig::default(),
    };
    info!(prefix = %config.image_prefix, tag = %config.image_tag, "operator config loaded");

    // 3) Collaborators, seeded with one cluster and one removal task
    let store = MemoryStore::new();
    let jobs = MemoryJobs::new();
    let bus = MemoryBus::new();

    let task = Task::new("hippo-rmdata", NAMESPACE)
        .with_param(PARAM_CLUSTER, "hippo")
        .with_param(PARAM_DELETE_DATA, "true")
        .with_param(PARAM_DELETE_BACKUPS, "false")
        .with_label(LABEL_PGOUSER, "admin");
    store.insert_task(&task)?;
    store.insert_cluster(&Cluster::new("hippo", NAMESPACE).with_supplemental_groups(vec![65534]))?;

    // 4) Run
    let verbosity = if std::env::var_os("PGTASK_DUMP").is_some() {
        Verbosity::Dump
    } else {
        Verbosity::Normal
    };
    let rmdata = RemoveData::new(
        Arc::new(store.clone()),
        Arc::new(jobs.clone()),
        Arc::new(bus.clone()),
        Arc::new(config),
    )
    .with_options(RemoveDataOptions { verbosity });

    let outcome = rmdata.run(&task).await?;
    if let Notification::Failed(e) = &outcome.notification {
        warn!("cluster deletion was not announced: {e}");
    }

    let marker = store
        .task(NAMESPACE, task.name())
        .and_then(|t| t.marker(MARKER_DELETE_DATA_STARTED).map(str::to_string));
    info!(
        job = %outcome.job_name,
        job_id = %outcome.job_id,
        marker = ?marker,
        events = bus.events().len(),
        submitted = jobs.count(),
        "done"
    );
    Ok(())
}
