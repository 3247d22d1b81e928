//! Configuration loading and management

use crate::core::error::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted attachment, 2 MiB
pub const MAX_ATTACHMENT_BYTES: u64 = 2 * 1024 * 1024;

/// Bounds applied by the record validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    /// Minimum patient name length, in characters
    pub patient_name_min: usize,

    /// Maximum patient name length, in characters
    pub patient_name_max: usize,

    /// Maximum lens description length, in characters
    pub lenses_max: usize,

    /// Maximum attachment size in bytes
    pub attachment_max_bytes: u64,

    /// Accepted attachment MIME types (compared case-insensitively)
    pub allowed_mime_types: Vec<String>,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            patient_name_min: 2,
            patient_name_max: 50,
            lenses_max: 50,
            attachment_max_bytes: MAX_ATTACHMENT_BYTES,
            allowed_mime_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
        }
    }
}

impl ValidationLimits {
    /// Reject limits no input could ever satisfy
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.patient_name_min > self.patient_name_max {
            return Err(ConfigError::InvalidValue {
                field: "validation.patient_name_min".to_string(),
                message: format!(
                    "minimum {} exceeds maximum {}",
                    self.patient_name_min, self.patient_name_max
                ),
            });
        }
        if self.attachment_max_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "validation.attachment_max_bytes".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.allowed_mime_types.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "validation.allowed_mime_types".to_string(),
                message: "at least one MIME type is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Listen address of the REST exposure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for `TcpListener::bind`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Complete configuration of the records service
///
/// Every section is optional in YAML; missing ones take their defaults.
///
/// ```yaml
/// validation:
///   patient_name_max: 60
///   allowed_mime_types: [image/jpeg, image/png]
/// server:
///   port: 8080
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    pub validation: ValidationLimits,
    pub server: ServerConfig,
}

impl RecordsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.validation.validate()
    }
}
