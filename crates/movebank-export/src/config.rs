use config::{Config, ConfigError, Environment};
use movebank_client::DIRECT_READ_URL;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Direct-read endpoint of the Movebank REST API
    #[serde(default = "default_direct_read_url")]
    pub direct_read_url: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_direct_read_url() -> String {
    DIRECT_READ_URL.to_string()
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("MOVEBANK"))
            .build()?
            .try_deserialize()
    }
}
