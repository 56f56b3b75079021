//! Data model for pgtask: tasks, clusters, worker jobs, events and operator configuration.
//!
//! Types mirror the JSON representation held by the resource store, so every
//! struct here serializes with `camelCase` field names.

mod constants;
pub use constants::*;

mod domain;
pub use domain::*;

mod config;
pub use config::{ConfigError, OperatorConfig};
