use anyhow::Result;
use chrono::{DateTime, Utc};
use config::Config;
use serde::Deserialize;

use crate::constants::{CONFIG_FILE, DEFAULT_LOG_LEVEL, ENV_PREFIX};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    /// Calendar file read when no path is given on the command line.
    pub path: Option<String>,
}

/// Time window occurrences are expanded in. `None` bounds are unlimited.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WindowConfig {
    pub begin: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl WindowConfig {
    /// ## Summary
    /// Returns the `(begin, end)` bounds of the window.
    ///
    /// ## Errors
    /// Returns [`CoreError::ValidationError`] if both bounds are set and `end` precedes `begin`.
    pub fn bounds(&self) -> CoreResult<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
        if let (Some(begin), Some(end)) = (self.begin, self.end)
            && end < begin
        {
            return Err(CoreError::ValidationError(format!(
                "window end {end} precedes begin {begin}"
            )));
        }
        Ok((self.begin, self.end))
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional `almanac.toml`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        tracing::debug!(file = CONFIG_FILE, prefix = ENV_PREFIX, "Loading configuration");
        Ok(Self::defaults()?
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Builds settings from TOML text layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the text is not valid TOML or does not match `Settings`.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder().set_default("logging.level", DEFAULT_LOG_LEVEL)?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
