use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, fmt::time::OffsetTime, layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::logger::{config::LoggerConfig, error::LoggerError, format::LoggerFormat};

/// Target prefixes owned by this workspace. Matches `pgtask_*` crates and `pgtask.*` custom targets.
const OWN_TARGETS: &[&str] = &["pgtask", "rmdata"];

type Output = Box<dyn Layer<Registry> + Send + Sync>;

/// Build the subscriber described by `cfg` and install it globally.
pub(crate) fn install(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = mk_filter(&cfg.level)?;
    let output = match cfg.format {
        LoggerFormat::Text => text_output(cfg),
        LoggerFormat::Json => json_output(cfg),
        LoggerFormat::Journald => journald_output()?,
    };

    tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .try_init()
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("already") {
                LoggerError::AlreadyInitialized
            } else {
                LoggerError::InitializationFailed(msg)
            }
        })
}

fn text_output(cfg: &LoggerConfig) -> Output {
    fmt::layer()
        .with_ansi(cfg.use_color)
        .with_target(cfg.with_targets)
        .with_timer(local_rfc3339())
        .boxed()
}

/// One JSON object per line; event and current span fields sit at the top level.
fn json_output(cfg: &LoggerConfig) -> Output {
    fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_ansi(false)
        .with_target(cfg.with_targets)
        .with_timer(local_rfc3339())
        .boxed()
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn journald_output() -> Result<Output, LoggerError> {
    tracing_journald::layer()
        .map(|layer| layer.boxed())
        .map_err(|e| LoggerError::InitializationFailed(format!("journald: {e}")))
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn journald_output() -> Result<Output, LoggerError> {
    Err(LoggerError::JournaldNotSupported)
}

/// Parse the filter directive.
///
/// A bare level more verbose than `warn` applies to pgtask targets only; everything else stays at `warn`.
/// Full directives are used unchanged.
fn mk_filter(level: &str) -> Result<EnvFilter, LoggerError> {
    let directive = match level.trim().parse::<LevelFilter>() {
        Ok(bare) if bare > LevelFilter::WARN => OWN_TARGETS
            .iter()
            .fold(String::from("warn"), |acc, t| format!("{acc},{t}={bare}")),
        _ => level.to_string(),
    };
    EnvFilter::try_new(&directive).map_err(|_| LoggerError::InvalidLogLevel(level.to_string()))
}

/// RFC 3339 timestamps in the local offset, UTC when the offset cannot be determined.
fn local_rfc3339() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_is_scoped_to_own_targets() {
        let filter = mk_filter("debug").unwrap().to_string().to_lowercase();
        assert!(filter.contains("pgtask=debug"), "{filter}");
        assert!(filter.contains("rmdata=debug"), "{filter}");
        assert!(filter.contains("warn"), "{filter}");
    }

    #[test]
    fn quiet_levels_and_directives_pass_through() {
        assert_eq!(mk_filter("error").unwrap().to_string().to_lowercase(), "error");
        let filter = mk_filter("pgtask_core=trace,info").unwrap().to_string().to_lowercase();
        assert!(filter.contains("pgtask_core=trace"), "{filter}");
        assert!(!filter.contains("rmdata"), "{filter}");
    }

    #[test]
    fn filter_rejects_unknown_level() {
        let err = mk_filter("pgtask_core=loud").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLogLevel(ref l) if l == "pgtask_core=loud"));
    }

    #[test]
    fn double_init_is_reported() {
        let cfg = LoggerConfig::default().with_level("warn");
        let first = install(&cfg);
        let second = install(&cfg.clone().with_format(LoggerFormat::Json));

        assert!(first.is_ok());
        assert!(second.is_err());
    }
}
