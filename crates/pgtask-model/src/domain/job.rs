use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::JobEnv;

/// Identity assigned to a job by the execution environment once it accepts the submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One-shot worker execution that removes cluster data.
///
/// Constructed once per task invocation, submitted once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    /// `<cluster>-rmdata-<suffix>`; unique per invocation.
    pub name: String,
    pub labels: BTreeMap<String, String>,
    /// Name of the task that requested the removal.
    pub task_name: String,
    pub cluster_name: String,
    pub ha_scope: String,
    pub replica_name: String,
    pub flags: JobFlags,
    pub security_context: SecurityContext,
    pub service_account: String,
    /// Number of retries the execution environment may attempt. Removal jobs never retry.
    pub backoff_limit: u32,
    pub restart_policy: RestartPolicy,
    pub container: ContainerSpec,
}

impl JobSpec {
    /// Full image reference of the worker container.
    pub fn image(&self) -> &str {
        &self.container.image
    }
}

/// Behaviour switches consumed by the worker process.
///
/// Values are copied verbatim from the task parameters; the worker does its own parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFlags {
    pub remove_data: String,
    pub remove_backup: String,
    pub is_replica: String,
    pub is_backup: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityContext {
    pub run_as_non_root: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supplemental_groups: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fs_group: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestartPolicy {
    #[default]
    Never,
    OnFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub image_pull_policy: String,
    #[serde(default, skip_serializing_if = "JobEnv::is_empty")]
    pub env: JobEnv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_id_is_transparent_in_json() {
        let id = JobId::from("uid-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""uid-1""#);
        assert_eq!(id.to_string(), "uid-1");
    }

    #[test]
    fn security_context_omits_unset_fields() {
        let ctx = SecurityContext {
            run_as_non_root: true,
            supplemental_groups: vec![],
            fs_group: None,
        };

        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json, serde_json::json!({"runAsNonRoot": true}));
    }
}
