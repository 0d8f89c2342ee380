#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("error while loading configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),
    #[error("invalid log filtering directive: {0}")]
    InvalidLogDirective(#[from] tracing_subscriber::filter::ParseError),
    #[error("unable to install the log subscriber: {0}")]
    LoggerInit(#[from] tracing_subscriber::util::TryInitError),
}
