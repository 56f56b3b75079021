use pgtask_model::{
    JobFlags, PARAM_CLUSTER, PARAM_DELETE_BACKUPS, PARAM_DELETE_DATA, PARAM_HA_SCOPE,
    PARAM_IS_BACKUP, PARAM_IS_REPLICA, PARAM_REPLICA_NAME, Task,
};

use crate::error::RmdataError;

/// Parameters of a data-removal task.
///
/// Flag values stay strings: they are forwarded to the worker exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RmdataParams {
    pub cluster: String,
    pub ha_scope: String,
    pub replica_name: String,
    pub is_replica: String,
    pub is_backup: String,
    pub delete_data: String,
    pub delete_backups: String,
}

impl RmdataParams {
    pub fn flags(&self) -> JobFlags {
        JobFlags {
            remove_data: self.delete_data.clone(),
            remove_backup: self.delete_backups.clone(),
            is_replica: self.is_replica.clone(),
            is_backup: self.is_backup.clone(),
        }
    }
}

/// Read removal parameters out of `task`.
///
/// Absent keys read as empty strings. A blank cluster name is the only validation failure;
/// otherwise the name is kept exactly as given.
pub fn extract(task: &Task) -> Result<RmdataParams, RmdataError> {
    let cluster = task.param(PARAM_CLUSTER);
    if cluster.trim().is_empty() {
        return Err(RmdataError::Validation {
            task: task.name().to_string(),
            reason: "cluster name is empty".into(),
        });
    }

    Ok(RmdataParams {
        cluster: cluster.to_string(),
        ha_scope: task.param(PARAM_HA_SCOPE).to_string(),
        replica_name: task.param(PARAM_REPLICA_NAME).to_string(),
        is_replica: task.param(PARAM_IS_REPLICA).to_string(),
        is_backup: task.param(PARAM_IS_BACKUP).to_string(),
        delete_data: task.param(PARAM_DELETE_DATA).to_string(),
        delete_backups: task.param(PARAM_DELETE_BACKUPS).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_parameters() {
        let task = Task::new("t1", "pgo")
            .with_param(PARAM_CLUSTER, "hippo")
            .with_param(PARAM_HA_SCOPE, "hippo-scope")
            .with_param(PARAM_REPLICA_NAME, "hippo-abcd")
            .with_param(PARAM_IS_REPLICA, "true")
            .with_param(PARAM_IS_BACKUP, "false")
            .with_param(PARAM_DELETE_DATA, "true")
            .with_param(PARAM_DELETE_BACKUPS, "yes");

        let params = extract(&task).unwrap();
        assert_eq!(params.cluster, "hippo");
        assert_eq!(params.ha_scope, "hippo-scope");
        assert_eq!(params.replica_name, "hippo-abcd");
        assert_eq!(
            params.flags(),
            JobFlags {
                remove_data: "true".into(),
                remove_backup: "yes".into(),
                is_replica: "true".into(),
                is_backup: "false".into(),
            }
        );
    }

    #[test]
    fn missing_flags_are_empty() {
        let task = Task::new("t1", "pgo").with_param(PARAM_CLUSTER, "hippo");
        let params = extract(&task).unwrap();

        assert_eq!(params.flags(), JobFlags::default());
        assert!(params.replica_name.is_empty());
    }

    #[test]
    fn cluster_name_is_not_normalised() {
        let task = Task::new("t1", "pgo").with_param(PARAM_CLUSTER, " hippo ");
        assert_eq!(extract(&task).unwrap().cluster, " hippo ");
    }

    #[test]
    fn empty_cluster_is_rejected() {
        for task in [
            Task::new("t1", "pgo"),
            Task::new("t1", "pgo").with_param(PARAM_CLUSTER, ""),
            Task::new("t1", "pgo").with_param(PARAM_CLUSTER, "  "),
        ] {
            let err = extract(&task).unwrap_err();
            assert!(matches!(err, RmdataError::Validation { ref task, .. } if task == "t1"));
        }
    }
}
