use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::extractors::DEFAULT_DIAGNOSTIC_PATH;

/// Runtime settings for the fetch and extraction layers
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the recipe site (overridable so tests can point at a
    /// local server)
    pub base_url: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Where raw script fragments are dumped when payload parsing fails
    pub diagnostic_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: "https://www.marmiton.org".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            timeout_secs: 30,
            diagnostic_path: DEFAULT_DIAGNOSTIC_PATH.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables with MARMITON__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MARMITON__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_settings()
    }
}

pub fn load_settings() -> Result<Settings, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Environment variables with MARMITON prefix
        .add_source(
            Environment::with_prefix("MARMITON")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
