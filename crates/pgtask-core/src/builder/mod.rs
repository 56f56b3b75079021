//! Worker job construction.

mod name;
pub use name::JobNamer;

use std::{collections::BTreeMap, sync::Arc};

use pgtask_model::{
    CONTAINER_IMAGE_RMDATA, Cluster, ContainerSpec, JobEnv, JobSpec, LABEL_PG_CLUSTER,
    LABEL_RMDATA, LABEL_VENDOR, LABEL_VENDOR_VALUE, OperatorConfig, PG_FS_GROUP, RestartPolicy,
    SecurityContext, Task,
};
use tracing::debug;

use crate::params::RmdataParams;

const CONTAINER_NAME: &str = "rmdata";
const SERVICE_ACCOUNT: &str = "pgo-target";
const IMAGE_PULL_POLICY: &str = "IfNotPresent";

/// Maps task parameters and cluster defaults to a removal job.
pub struct JobSpecBuilder {
    config: Arc<OperatorConfig>,
    namer: JobNamer,
}

impl JobSpecBuilder {
    pub fn new(config: Arc<OperatorConfig>) -> Self {
        Self {
            config,
            namer: JobNamer::new(),
        }
    }

    pub fn with_namer(mut self, namer: JobNamer) -> Self {
        self.namer = namer;
        self
    }

    /// Build a job under a freshly generated name.
    pub fn build(&self, params: &RmdataParams, task: &Task, cluster: &Cluster) -> JobSpec {
        let name = self.namer.job_name(&params.cluster);
        self.build_named(name, params, task, cluster)
    }

    /// Build a job under `name`. Pure: the same inputs always yield the same job.
    pub fn build_named(
        &self,
        name: String,
        params: &RmdataParams,
        task: &Task,
        cluster: &Cluster,
    ) -> JobSpec {
        let image = self.image(cluster);
        let flags = params.flags();

        let env = JobEnv::new()
            .with("PG_CLUSTER", params.cluster.as_str())
            .with("PGHA_SCOPE", params.ha_scope.as_str())
            .with("REPLICA_NAME", params.replica_name.as_str())
            .with("REMOVE_DATA", flags.remove_data.as_str())
            .with("REMOVE_BACKUP", flags.remove_backup.as_str())
            .with("IS_BACKUP", flags.is_backup.as_str())
            .with("IS_REPLICA", flags.is_replica.as_str());

        let labels = BTreeMap::from([
            (LABEL_VENDOR.to_string(), LABEL_VENDOR_VALUE.to_string()),
            (LABEL_RMDATA.to_string(), "true".to_string()),
            (LABEL_PG_CLUSTER.to_string(), params.cluster.clone()),
        ]);

        debug!(job = %name, task = %task.spec.name, %image, "rmdata job built");

        JobSpec {
            name,
            labels,
            task_name: task.spec.name.clone(),
            cluster_name: params.cluster.clone(),
            ha_scope: params.ha_scope.clone(),
            replica_name: params.replica_name.clone(),
            flags,
            security_context: security_context(
                &cluster.spec.storage.supplemental_groups,
                &self.config,
            ),
            service_account: SERVICE_ACCOUNT.to_string(),
            backoff_limit: 0,
            restart_policy: RestartPolicy::Never,
            container: ContainerSpec {
                name: CONTAINER_NAME.to_string(),
                image,
                image_pull_policy: IMAGE_PULL_POLICY.to_string(),
                env,
            },
        }
    }

    /// Worker image: `<prefix>/pgo-rmdata:<tag>`, unless the override table names one.
    fn image(&self, cluster: &Cluster) -> String {
        if let Some(image) = self.config.image_override(CONTAINER_IMAGE_RMDATA) {
            debug!(image, "using container image override");
            return image.to_string();
        }

        let prefix = if cluster.spec.image_prefix.is_empty() {
            self.config.image_prefix.as_str()
        } else {
            cluster.spec.image_prefix.as_str()
        };
        format!(
            "{}/{}:{}",
            prefix.trim_end_matches('/'),
            CONTAINER_IMAGE_RMDATA,
            self.config.image_tag
        )
    }
}

/// Pod security context for worker jobs.
///
/// Never runs as root; the database filesystem group is added unless disabled in config.
pub fn security_context(supplemental_groups: &[i64], config: &OperatorConfig) -> SecurityContext {
    SecurityContext {
        run_as_non_root: true,
        supplemental_groups: supplemental_groups.to_vec(),
        fs_group: (!config.disable_fs_group).then_some(PG_FS_GROUP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::extract;
    use pgtask_model::{
        JobFlags, PARAM_CLUSTER, PARAM_DELETE_BACKUPS, PARAM_DELETE_DATA, PARAM_IS_REPLICA,
    };

    fn task() -> Task {
        Task::new("t1", "pgo")
            .with_param(PARAM_CLUSTER, "hippo")
            .with_param(PARAM_DELETE_DATA, "true")
            .with_param(PARAM_DELETE_BACKUPS, "false")
            .with_param(PARAM_IS_REPLICA, "false")
    }

    fn builder(config: OperatorConfig) -> JobSpecBuilder {
        JobSpecBuilder::new(Arc::new(config)).with_namer(JobNamer::with_seed(1))
    }

    fn default_config() -> OperatorConfig {
        OperatorConfig::default()
            .with_image_prefix("crunchydata/")
            .with_image_tag("v1")
    }

    #[test]
    fn empty_cluster_prefix_falls_back_to_default() {
        let task = task();
        let params = extract(&task).unwrap();
        let job = builder(default_config()).build(&params, &task, &Cluster::new("hippo", "pgo"));

        assert_eq!(job.image(), "crunchydata/pgo-rmdata:v1");
    }

    #[test]
    fn cluster_prefix_wins_but_tag_does_not() {
        let task = task();
        let params = extract(&task).unwrap();
        let mut cluster = Cluster::new("hippo", "pgo").with_image_prefix("registry.local/pg");
        cluster.spec.image_tag = "cluster-tag".into();

        let job = builder(default_config()).build(&params, &task, &cluster);
        assert_eq!(job.image(), "registry.local/pg/pgo-rmdata:v1");
    }

    #[test]
    fn override_table_replaces_image() {
        let task = task();
        let params = extract(&task).unwrap();
        let cfg = default_config().with_image_override(CONTAINER_IMAGE_RMDATA, "mirror/rmdata@sha256:ab");
        let cluster = Cluster::new("hippo", "pgo").with_image_prefix("registry.local/pg");

        let job = builder(cfg).build(&params, &task, &cluster);
        assert_eq!(job.image(), "mirror/rmdata@sha256:ab");
    }

    #[test]
    fn flags_and_env_are_copied_verbatim() {
        let task = task();
        let params = extract(&task).unwrap();
        let job = builder(default_config()).build(&params, &task, &Cluster::new("hippo", "pgo"));

        assert_eq!(
            job.flags,
            JobFlags {
                remove_data: "true".into(),
                remove_backup: "false".into(),
                is_replica: "false".into(),
                is_backup: "".into(),
            }
        );
        assert_eq!(job.container.env.get("REMOVE_DATA"), Some("true"));
        assert_eq!(job.container.env.get("REMOVE_BACKUP"), Some("false"));
        assert_eq!(job.container.env.get("PG_CLUSTER"), Some("hippo"));
        assert_eq!(job.labels.get(LABEL_PG_CLUSTER).map(String::as_str), Some("hippo"));
        assert_eq!(job.task_name, "t1");
        assert_eq!(job.backoff_limit, 0);
        assert_eq!(job.restart_policy, RestartPolicy::Never);
    }

    #[test]
    fn build_named_is_deterministic() {
        let task = task();
        let params = extract(&task).unwrap();
        let cluster = Cluster::new("hippo", "pgo").with_supplemental_groups(vec![65534]);
        let b = builder(default_config());

        let a = b.build_named("hippo-rmdata-abcd".into(), &params, &task, &cluster);
        let c = b.build_named("hippo-rmdata-abcd".into(), &params, &task, &cluster);
        assert_eq!(a, c);
    }

    #[test]
    fn generated_name_uses_cluster() {
        let task = task();
        let params = extract(&task).unwrap();
        let job = builder(default_config()).build(&params, &task, &Cluster::new("hippo", "pgo"));

        assert!(job.name.starts_with("hippo-rmdata-"));
        assert_eq!(job.name.len(), "hippo-rmdata-".len() + 4);
    }

    #[test]
    fn security_context_honours_fs_group_switch() {
        let groups = [1000, 2000];

        let ctx = security_context(&groups, &OperatorConfig::default());
        assert!(ctx.run_as_non_root);
        assert_eq!(ctx.supplemental_groups, vec![1000, 2000]);
        assert_eq!(ctx.fs_group, Some(PG_FS_GROUP));

        let cfg = OperatorConfig {
            disable_fs_group: true,
            ..OperatorConfig::default()
        };
        assert_eq!(security_context(&groups, &cfg).fs_group, None);
    }
}
