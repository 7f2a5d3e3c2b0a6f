use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::models::ScoringWeights;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scoring weights must be non-negative and sum to 1.0 (got {sum})")]
    InvalidWeights { sum: f64 },

    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub sessions: SessionSettings,
    #[serde(default)]
    pub audit: AuditSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

/// Where to read the catalogs from; the built-in catalog when unset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_archetype_coverage_weight")]
    pub archetype_coverage: f64,
    #[serde(default = "default_selection_coverage_weight")]
    pub selection_coverage: f64,
    #[serde(default = "default_base_potential_weight")]
    pub base_potential: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            archetype_coverage: default_archetype_coverage_weight(),
            selection_coverage: default_selection_coverage_weight(),
            base_potential: default_base_potential_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            archetype_coverage: config.archetype_coverage,
            selection_coverage: config.selection_coverage,
            base_potential: config.base_potential,
        }
    }
}

fn default_archetype_coverage_weight() -> f64 { 0.4 }
fn default_selection_coverage_weight() -> f64 { 0.4 }
fn default_base_potential_weight() -> f64 { 0.2 }

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

fn default_max_sessions() -> u64 { 10_000 }
fn default_idle_timeout_secs() -> u64 { 1800 }

#[derive(Debug, Clone, Deserialize)]
pub struct AuditSettings {
    #[serde(default = "default_audit_capacity")]
    pub capacity: usize,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            capacity: default_audit_capacity(),
        }
    }
}

fn default_audit_capacity() -> usize { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with LOCATOR__)
    pub fn load() -> Result<Self, SettingsError> {
        let settings: Settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., LOCATOR__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let weights = self.scoring_weights();
        if !weights.is_normalized() {
            return Err(SettingsError::InvalidWeights { sum: weights.sum() });
        }
        if self.sessions.max_sessions == 0 {
            return Err(SettingsError::ZeroLimit("sessions.max_sessions"));
        }
        if self.sessions.idle_timeout_secs == 0 {
            return Err(SettingsError::ZeroLimit("sessions.idle_timeout_secs"));
        }
        if self.audit.capacity == 0 {
            return Err(SettingsError::ZeroLimit("audit.capacity"));
        }
        Ok(())
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("LOCATOR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
