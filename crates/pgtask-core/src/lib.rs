//! Orchestration of data-removal tasks.
//!
//! A removal runs as a single forward pass:
//! validate parameters, record the `deleteDataStarted` marker on the task, resolve the cluster,
//! build the worker job, dispatch it and finally publish a best-effort cluster-deletion event.
//!
//! The resource store, job execution environment and event bus are reached through the
//! [`ResourceStore`], [`JobExecutor`] and [`EventBus`] traits; in-memory implementations
//! live in [`memory`].

pub mod error;
pub use error::{NotificationError, RmdataError, Stage};

pub mod patch;

pub mod store;
pub use store::{ResourceKind, ResourceStore, StoreError};

pub mod exec;
pub use exec::{ExecError, JobExecutor};

pub mod bus;
pub use bus::{BusError, EventBus};

pub mod memory;

mod params;
pub use params::{RmdataParams, extract};

mod resolve;
pub use resolve::ClusterResolver;

mod marker;
pub use marker::StatusMarker;

pub mod builder;
pub use builder::{JobNamer, JobSpecBuilder};

mod dispatch;
pub use dispatch::Dispatcher;

mod notify;
pub use notify::{Notification, Notifier};

mod rmdata;
pub use rmdata::{RemoveData, RemoveDataOptions, RemoveDataOutcome, Verbosity};
