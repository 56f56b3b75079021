mod meta;
pub use meta::ObjectMeta;

mod kv;
pub use kv::KeyValue;

mod job_env;
pub use job_env::JobEnv;

mod task;
pub use task::{Task, TaskSpec, TaskStatus};

mod cluster;
pub use cluster::{Cluster, ClusterSpec, StorageSpec};

mod job;
pub use job::{ContainerSpec, JobFlags, JobId, JobSpec, RestartPolicy, SecurityContext};

mod event;
pub use event::{Event, EventHeader, EventType};

/// Name of a resource inside its namespace.
pub type Name = String;

/// Namespace a resource lives in.
pub type Namespace = String;
