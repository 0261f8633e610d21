//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default, so a missing file still
//! produces a usable configuration.

pub mod logging;
pub mod plugin;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::plugin::PluginConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Plugin declarations.
    #[serde(default)]
    pub plugins: PluginConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional. Environment variables prefixed with `HOOKHUB_`
    /// (nested keys separated by `__`) are layered on top.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("HOOKHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from an in-memory TOML string.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check plugin declarations for empty or duplicate names.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut seen = HashSet::new();

        for plugin in &self.plugins.plugins {
            if plugin.name.trim().is_empty() {
                return Err(AppError::validation("Plugin name must not be empty"));
            }
            if !seen.insert(plugin.name.as_str()) {
                return Err(AppError::validation(format!(
                    "Plugin '{}' is declared more than once",
                    plugin.name
                )));
            }
            for hook in &plugin.hooks {
                if hook.endpoint.trim().is_empty() {
                    return Err(AppError::validation(format!(
                        "Plugin '{}' declares a hook with an empty endpoint",
                        plugin.name
                    )));
                }
            }
        }

        Ok(())
    }
}
