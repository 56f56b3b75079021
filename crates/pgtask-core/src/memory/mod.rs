//! In-memory collaborators.
//!
//! Handy for tests and local runs: each records what it received and can be told to fail
//! so every branch of the removal pipeline can be exercised without a cluster.

mod store;
pub use store::MemoryStore;

mod jobs;
pub use jobs::MemoryJobs;

mod bus;
pub use bus::MemoryBus;
