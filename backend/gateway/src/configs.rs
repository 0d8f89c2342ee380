use std::path::PathBuf;

use domain_types::types::{Connectors, Proxy};

use crate::{error::ConfigurationError, logger::config::Log, payments::GatewayConfig};

/// Prefix of environment variables that override file configuration, e.g.
/// `PAYGATE__GATEWAY__TEST_MODE=true`.
pub const ENV_PREFIX: &str = "PAYGATE";

const CONFIG_DIRECTORY: &str = "config";
const CONFIG_FILE_NAME: &str = "development.toml";

#[derive(Clone, serde::Deserialize, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub log: Log,
    pub proxy: Proxy,
    pub connectors: Connectors,
    pub gateway: GatewayConfig,
}

impl Config {
    /// Function to build the configuration by picking it from default locations
    pub fn new() -> Result<Self, ConfigurationError> {
        Self::new_with_config_path(None)
    }

    /// Function to build the configuration by picking it from default locations
    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, ConfigurationError> {
        let config_path = Self::config_path(explicit_config_path);
        let builder = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(environment());
        Self::deserialize_from(builder)
    }

    /// Builds the configuration from TOML text, still letting the environment override it.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigurationError> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .add_source(environment());
        Self::deserialize_from(builder)
    }

    fn deserialize_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigurationError> {
        let config = builder.build()?;

        #[allow(clippy::print_stderr)]
        let config: Self = serde_path_to_error::deserialize(config).map_err(|error| {
            eprintln!("Unable to deserialize application configuration: {error}");
            error.into_inner()
        })?;

        Ok(config)
    }

    /// Config path.
    pub fn config_path(explicit_config_path: Option<PathBuf>) -> PathBuf {
        let mut config_path = PathBuf::new();
        if let Some(explicit_config_path_val) = explicit_config_path {
            config_path.push(explicit_config_path_val);
        } else {
            config_path.push(workspace_path());
            config_path.push(CONFIG_DIRECTORY);
            config_path.push(CONFIG_FILE_NAME);
        }
        config_path
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .try_parsing(true)
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("proxy.bypass_proxy_urls")
}

pub fn workspace_path() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let mut path = PathBuf::from(manifest_dir);
        path.pop();
        path.pop();
        path
    } else {
        PathBuf::from(".")
    }
}
