//! # tt-config
//!
//! Layered settings for the TripTogether binary:
//! built-in defaults, then `trip-together.toml` (optional), then `TT__*`
//! environment variables (`TT__STORE__BASE_URL`, `TT__SERVER__PORT`, ...).
//! A `.env` file is loaded into the environment first.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

pub const CONFIG_FILE: &str = "trip-together";
pub const ENV_PREFIX: &str = "TT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub session: SessionSettings,
    pub seed: SeedSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct StoreSettings {
    /// Root of the document store's REST interface
    pub base_url: String,
    pub api_key: Option<SecretString>,
    pub timeout_secs: u64,
    pub collection: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionSettings {
    /// JSON file holding the persisted session keys
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct SeedSettings {
    /// Whether the built-in sample trips are merged into the feed
    pub enabled: bool,
}

impl Settings {
    /// Loads `.env`, the optional config file, and the environment.
    pub fn load() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env loaded: {e}");
        }
        let builder = defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must not be 0".into()));
        }
        if self.store.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("store.base_url must be set".into()));
        }
        if self.store.timeout_secs == 0 {
            return Err(ConfigError::Invalid("store.timeout_secs must be positive".into()));
        }
        if self.store.collection.trim().is_empty() {
            return Err(ConfigError::Invalid("store.collection must be set".into()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    Ok(Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("store.base_url", "http://127.0.0.1:8081/v1")?
        .set_default("store.timeout_secs", 10)?
        .set_default("store.collection", "trips")?
        .set_default("session.path", "./data/session.json")?
        .set_default("seed.enabled", true)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use secrecy::ExposeSecret;

    fn with_toml(toml: &str) -> Result<Settings> {
        Settings::from_builder(defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::from_builder(defaults().unwrap()).unwrap();
        assert_eq!(settings.bind_addr(), ("127.0.0.1".to_string(), 8080));
        assert_eq!(settings.store.collection, "trips");
        assert!(settings.store.api_key.is_none());
        assert!(settings.seed.enabled);
    }

    #[test]
    fn file_values_override_defaults() {
        let settings = with_toml(
            r#"
            [store]
            base_url = "https://docs.example.test/v1/projects/tt"
            api_key = "s3cret"
            timeout_secs = 3

            [seed]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(settings.store.timeout_secs, 3);
        assert_eq!(
            settings.store.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("s3cret".to_string())
        );
        assert!(!settings.seed.enabled);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = with_toml("[store]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let settings = with_toml("[store]\napi_key = \"hunter2\"\n").unwrap();
        assert!(!format!("{settings:?}").contains("hunter2"));
    }
}
