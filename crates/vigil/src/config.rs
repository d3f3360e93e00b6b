//! Session configuration loaded from `vigil.yaml`.

use serde::{Deserialize, Serialize};
use std::fmt;
use vigil_sync::ReconnectPolicy;

/// Error loading or validating a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// YAML parsing error
    Yaml(serde_yaml_ng::Error),
    /// Invalid value
    Invalid {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml(e) => write!(f, "YAML error: {e}"),
            Self::Invalid { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Yaml(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_yaml_ng::Error> for ConfigError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        Self::Yaml(e)
    }
}

/// Backend connection settings.
///
/// Absence of this whole section means no transport collaborator is
/// configured: the dashboard runs with LOCAL-only capability and a
/// mode toggle is refused with a warning instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// REST base URL, e.g. `http://localhost:5000`
    pub base_url: String,
    /// Push-channel URL (defaults to the REST host)
    #[serde(default)]
    pub feed_url: Option<String>,
    /// Maximum push-channel reconnect attempts
    #[serde(default = "default_reconnect_attempts")]
    pub reconnect_attempts: u32,
}

fn default_reconnect_attempts() -> u32 {
    5
}

impl BackendConfig {
    /// Reconnect policy derived from this configuration.
    #[must_use]
    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy {
            max_attempts: self.reconnect_attempts,
            ..ReconnectPolicy::default()
        }
    }
}

/// Dashboard session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Monitored subject identifier
    pub subject_id: String,
    /// Simulator tick period in milliseconds
    pub tick_interval_ms: u64,
    /// Simulator seed (runs are reproducible for a given seed)
    pub sim_seed: u64,
    /// Backend settings; omit for LOCAL-only capability
    pub backend: Option<BackendConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            subject_id: "SOL-7842-ALPHA".to_string(),
            tick_interval_ms: 3000,
            sim_seed: 0x5eed,
            backend: None,
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subject_id.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "subject_id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.tick_interval_ms < 250 {
            return Err(ConfigError::Invalid {
                field: "tick_interval_ms".to_string(),
                message: "must be at least 250".to_string(),
            });
        }
        if let Some(backend) = &self.backend {
            if backend.base_url.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: "backend.base_url".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
