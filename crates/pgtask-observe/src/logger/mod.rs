mod config;
mod error;
mod format;
mod log;

pub use config::{ENV_LOG, ENV_LOG_FORMAT, LoggerConfig};
pub use error::LoggerError;
pub use format::LoggerFormat;

/// Install the process-wide `tracing` subscriber described by `cfg`.
///
/// Fails with [`LoggerError::AlreadyInitialized`] when a subscriber is already set.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    log::install(cfg)
}
