//! Logging bootstrap for pgtask binaries.

mod logger;
pub use logger::*;
