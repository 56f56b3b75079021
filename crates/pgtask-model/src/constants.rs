//! Well-known keys and names shared by the model and the orchestrator.
//!
//! Keeping them here avoids scattering magic strings throughout the codebase.

/// Task parameter: name of the target cluster. Required.
pub const PARAM_CLUSTER: &str = "cluster";
/// Task parameter: HA scope of the cluster.
pub const PARAM_HA_SCOPE: &str = "haScope";
/// Task parameter: replica name when a single replica is removed.
pub const PARAM_REPLICA_NAME: &str = "replicaName";
/// Task parameter: `"true"` when the target is a replica.
pub const PARAM_IS_REPLICA: &str = "isReplica";
/// Task parameter: `"true"` when the target is a backup.
pub const PARAM_IS_BACKUP: &str = "isBackup";
/// Task parameter: `"true"` to remove data volumes.
pub const PARAM_DELETE_DATA: &str = "deleteData";
/// Task parameter: `"true"` to remove backups.
pub const PARAM_DELETE_BACKUPS: &str = "deleteBackup";

/// Status marker written before the removal job is dispatched.
pub const MARKER_DELETE_DATA_STARTED: &str = "deleteDataStarted";

/// Task label carrying the acting user.
pub const LABEL_PGOUSER: &str = "pgouser";
/// Task label carrying the cluster identifier.
pub const LABEL_CLUSTER_IDENTIFIER: &str = "pg-cluster-id";
/// Job label carrying the cluster name.
pub const LABEL_PG_CLUSTER: &str = "pg-cluster";
/// Job label marking removal jobs.
pub const LABEL_RMDATA: &str = "pgrmdata";
/// Job label carrying the vendor.
pub const LABEL_VENDOR: &str = "vendor";
/// Value of [`LABEL_VENDOR`].
pub const LABEL_VENDOR_VALUE: &str = "crunchydata";

/// Logical image name of the removal worker, also the key of the image-override table.
pub const CONTAINER_IMAGE_RMDATA: &str = "pgo-rmdata";

/// Topic for cluster lifecycle events.
pub const EVENT_TOPIC_CLUSTER: &str = "clustertopic";

/// Filesystem group of the database user applied to worker pods.
pub const PG_FS_GROUP: i64 = 26;
