//! Setup logging subsystem.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::{Log, LogFormat};
use crate::error::ConfigurationError;

/// Crates whose events are logged at the configured level when no filtering directive is given.
const WORKSPACE_CRATES: [&str; 5] = [
    "gateway",
    "external_services",
    "connector_integration",
    "domain_types",
    "interfaces",
];

/// Installs the global subscriber described by `config`.
///
/// `RUST_LOG`, when set, takes precedence over the configured directive.
pub fn setup(config: &Log) -> Result<(), ConfigurationError> {
    let console = &config.console;
    let directive = console
        .filtering_directive
        .clone()
        .unwrap_or_else(|| default_directive(console.level.into_level()));
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directive)?,
    };

    let subscriber = tracing_subscriber::registry().with(env_filter);
    if !console.enabled {
        subscriber.try_init()?;
        return Ok(());
    }

    match console.log_format {
        LogFormat::Default => subscriber
            .with(fmt::layer().pretty().with_target(true))
            .try_init()?,
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init()?,
    }

    tracing::debug!(format = ?console.log_format, "logger initialized");
    Ok(())
}

fn default_directive(level: tracing::Level) -> String {
    let level = level.as_str().to_lowercase();
    std::iter::once("warn".to_string())
        .chain(
            WORKSPACE_CRATES
                .iter()
                .map(|krate| format!("{krate}={level}")),
        )
        .collect::<Vec<_>>()
        .join(",")
}
