//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::calculate::SelectorTuning;
use crate::models::GameRules;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Sampling settings for the local selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_hot_threshold")]
    pub hot_threshold: f64,

    #[serde(default = "default_cold_threshold")]
    pub cold_threshold: f64,

    #[serde(default = "default_confidence_min")]
    pub confidence_min: u8,

    #[serde(default = "default_confidence_max")]
    pub confidence_max: u8,

    /// Fixed RNG seed; unset means fresh entropy per request.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_hot_threshold() -> f64 {
    SelectorTuning::default().hot_threshold
}

fn default_cold_threshold() -> f64 {
    SelectorTuning::default().cold_threshold
}

fn default_confidence_min() -> u8 {
    SelectorTuning::default().confidence_min
}

fn default_confidence_max() -> u8 {
    SelectorTuning::default().confidence_max
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            hot_threshold: default_hot_threshold(),
            cold_threshold: default_cold_threshold(),
            confidence_min: default_confidence_min(),
            confidence_max: default_confidence_max(),
            seed: None,
        }
    }
}

impl SelectorConfig {
    pub fn tuning(&self) -> SelectorTuning {
        SelectorTuning {
            hot_threshold: self.hot_threshold,
            cold_threshold: self.cold_threshold,
            confidence_min: self.confidence_min,
            confidence_max: self.confidence_max,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub selector: SelectorConfig,

    /// Rules used for the custom game when a request gives none.
    #[serde(default)]
    pub custom_game: Option<GameRules>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            selector: SelectorConfig::default(),
            custom_game: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.selector;

        for (name, value) in [
            ("hot_threshold", s.hot_threshold),
            ("cold_threshold", s.cold_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "selector.{} must be between 0 and 1",
                    name
                )));
            }
        }

        if s.hot_threshold > s.cold_threshold {
            return Err(ConfigError::ValidationError(
                "selector.hot_threshold must not exceed cold_threshold".to_string(),
            ));
        }

        if s.confidence_min > s.confidence_max || s.confidence_max > 100 {
            return Err(ConfigError::ValidationError(
                "selector confidence band must satisfy min <= max <= 100".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
