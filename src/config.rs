use crate::models::{EnvelopeDefaults, DEFAULT_SENDER_COLOR, DEFAULT_SENDER_NAME};
use serde::Deserialize;
use std::env;
use std::path::Path;
use config; // Explicitly import the config crate

#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub web: WebConfig,
    pub allowed_origins: String,
    pub log_level: String,
    pub default_sender_name: String,
    pub default_sender_color: String,
}

impl Config {
    pub fn from_env(env_path: &Path) -> Result<Self, config::ConfigError> {
        dotenvy::from_path(env_path)
            .map_err(|e| config::ConfigError::Message(format!(
                "FATAL: Failed to load .env file from '{}'. Error: {}", env_path.display(), e
            )))?;

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, which resolves environment-style keys.
    /// `[web]` settings come from `config/default.toml` when that file exists.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, config::ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = lookup("ALLOWED_ORIGINS").unwrap_or_default();
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let default_sender_name = lookup("DEFAULT_SENDER_NAME")
            .unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string());
        if default_sender_name.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "FATAL: 'DEFAULT_SENDER_NAME' must not be empty.".to_string()
            ));
        }

        // The default color is rendered by clients, so only a plain #rrggbb is accepted.
        let default_sender_color = lookup("DEFAULT_SENDER_COLOR")
            .unwrap_or_else(|| DEFAULT_SENDER_COLOR.to_string());
        if !is_hex_color(&default_sender_color) {
            return Err(config::ConfigError::Message(format!(
                "FATAL: 'DEFAULT_SENDER_COLOR' must look like '#1a2b3c', got '{}'.",
                default_sender_color
            )));
        }

        let builder = config::Config::builder()
            .set_default("web.host", "127.0.0.1")?
            .set_default("web.port", 8080_i64)?
            .add_source(config::File::new("config/default.toml", config::FileFormat::Toml).required(false))
            .set_override("allowed_origins", allowed_origins)?
            .set_override("log_level", log_level)?
            .set_override("default_sender_name", default_sender_name)?
            .set_override("default_sender_color", default_sender_color)?
            .build()?;

        builder.try_deserialize()
    }

    pub fn envelope_defaults(&self) -> EnvelopeDefaults {
        EnvelopeDefaults {
            name: self.default_sender_name.clone(),
            color: self.default_sender_color.clone(),
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
