//! Simulator configuration

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

const REDACTED: &str = "<redacted>";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Simulator configuration
///
/// Every field has a default, so `{}` is a valid config file.
///
/// # Example
/// ```
/// use event_simulator_core_rs::SimulatorConfig;
///
/// let config: SimulatorConfig = serde_json::from_str(r#"{ "auto_start": true }"#).unwrap();
/// assert!(config.auto_start);
/// assert!(config.log_payloads);
/// assert_eq!(config.redact_fields, vec!["password".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Call `start()` as part of construction
    pub auto_start: bool,

    /// Include event payloads in the per-event log line
    pub log_payloads: bool,

    /// Payload keys (at any depth) masked in the per-event log line
    pub redact_fields: Vec<String>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            auto_start: false,
            log_payloads: true,
            redact_fields: vec!["password".to_string()],
        }
    }
}

impl SimulatorConfig {
    /// Load and validate a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(blank) = self.redact_fields.iter().find(|f| f.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "redact_fields contains a blank entry ({:?})",
                blank
            )));
        }
        Ok(())
    }

    /// Copy of `payload` with configured fields masked
    pub fn redact(&self, payload: &Value) -> Value {
        let mut copy = payload.clone();
        if !self.redact_fields.is_empty() {
            redact_in_place(&mut copy, &self.redact_fields);
        }
        copy
    }
}

fn redact_in_place(value: &mut Value, fields: &[String]) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map.iter_mut() {
                if fields.iter().any(|f| f == key) {
                    *inner = Value::String(REDACTED.to_string());
                } else {
                    redact_in_place(inner, fields);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                redact_in_place(item, fields);
            }
        }
        _ => {}
    }
}
