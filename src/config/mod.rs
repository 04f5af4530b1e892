use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::logging::LogFormat;

pub const ENV_PREFIX: &str = "TIERED_STORE";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Human,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON document merged into the store at construction.
    pub seed: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Record field checked by batch validation.
    pub batch_field: String,
    pub batch_rules: Vec<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            batch_field: "email".to_string(),
            batch_rules: vec!["email".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub store: StoreConfig,
    pub validator: ValidatorConfig,
}

/// Load settings from `path` (optional, format by extension), then from
/// `TIERED_STORE__SECTION__KEY` environment variables.
///
/// `validator.batch_rules` is read from the environment as a comma-separated
/// list.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, config::ConfigError> {
    load_with_prefix(path.as_ref(), ENV_PREFIX)
}

fn load_with_prefix(path: &Path, prefix: &str) -> Result<AppConfig, config::ConfigError> {
    Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix(prefix)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("validator.batch_rules"),
        )
        .build()?
        .try_deserialize()
}
