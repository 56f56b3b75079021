use std::io::IsTerminal;

use crate::logger::{error::LoggerError, format::LoggerFormat};

/// Filter directive or bare level, e.g. `debug` or `pgtask_core=trace,info`.
pub const ENV_LOG: &str = "PGTASK_LOG";
/// One of `text`, `json`, `journald`.
pub const ENV_LOG_FORMAT: &str = "PGTASK_LOG_FORMAT";

/// How the process-wide `tracing` subscriber is built.
///
/// Verbosity is chosen here by the caller instead of through a global debug switch.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `info` or `pgtask_core=debug,info`.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::default(),
            level: "info".to_string(),
            with_targets: true,
            use_color,
        }
    }
}

impl LoggerConfig {
    /// Defaults overridden by `PGTASK_LOG` and `PGTASK_LOG_FORMAT` when set.
    pub fn from_env() -> Result<Self, LoggerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoggerError> {
        let mut cfg = Self::default();
        if let Some(level) = lookup(ENV_LOG) {
            cfg.level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            cfg.format = format.parse()?;
        }
        Ok(cfg)
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LoggerFormat) -> Self {
        self.format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_defaults() {
        let cfg = LoggerConfig::from_lookup(|key| match key {
            ENV_LOG => Some("debug".into()),
            ENV_LOG_FORMAT => Some("json".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(cfg.level, "debug");
        assert_eq!(cfg.format, LoggerFormat::Json);
    }

    #[test]
    fn unset_env_keeps_defaults() {
        let cfg = LoggerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.level, "info");
        assert_eq!(cfg.format, LoggerFormat::Text);
    }

    #[test]
    fn bad_format_is_rejected() {
        let err = LoggerConfig::from_lookup(|key| (key == ENV_LOG_FORMAT).then(|| "xml".into()))
            .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidFormat(_)));
    }
}
