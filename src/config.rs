//! Configuration System
//!
//! Field names and the override permission are configuration rather than
//! constants, so one gate works across differently named host schemas.
//! Values are layered with the `config` crate and validated before use.

use crate::clock::{Clock, SystemClock};
use crate::error::ConfigError;
use crate::gate::{ReleaseGate, DEFAULT_OVERRIDE_PERMISSION};
use crate::logging::LoggingConfig;
use crate::window::FieldNames;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Permission that bypasses release windows
    #[serde(default = "default_override_permission")]
    pub override_permission: String,

    /// Schema field names carrying the release window
    #[serde(default)]
    pub fields: FieldNames,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_override_permission() -> String {
    DEFAULT_OVERRIDE_PERMISSION.to_string()
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            override_permission: default_override_permission(),
            fields: FieldNames::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Field(String, String),
    Permission(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Field(name, msg) => write!(f, "Field '{}': {}", name, msg),
            ValidationError::Permission(msg) => write!(f, "Permission: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl GateConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let mut seen: HashMap<&str, &str> = HashMap::new();
        for (label, name) in self.fields.labelled() {
            if name.trim().is_empty() {
                errors.push(ValidationError::Field(
                    label.to_string(),
                    "name cannot be empty".to_string(),
                ));
                continue;
            }
            if let Some(existing) = seen.insert(name, label) {
                errors.push(ValidationError::Field(
                    label.to_string(),
                    format!("name '{}' is already used by '{}'", name, existing),
                ));
            }
        }

        if self.override_permission.trim().is_empty() {
            errors.push(ValidationError::Permission(
                "override permission name cannot be empty".to_string(),
            ));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all problems into one error.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ConfigError::Invalid(msgs.join("\n"))
        })?;
        Ok(self)
    }
}

/// Holds the active gate and swaps it on configuration reload.
///
/// Readers take a cheap `Arc` snapshot and evaluate without holding the lock.
pub struct GateManager {
    gate: RwLock<Arc<ReleaseGate>>,
    config: RwLock<GateConfig>,
    clock: Arc<dyn Clock>,
}

impl GateManager {
    /// Create a manager from an already loaded configuration.
    pub fn new(config: GateConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: GateConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let gate = ReleaseGate::from_config(&config).with_clock(Arc::clone(&clock));
        Ok(Self {
            gate: RwLock::new(Arc::new(gate)),
            config: RwLock::new(config),
            clock,
        })
    }

    /// Current gate snapshot.
    pub fn gate(&self) -> Arc<ReleaseGate> {
        self.gate.read().clone()
    }

    /// Current configuration (read-only copy)
    pub fn config(&self) -> GateConfig {
        self.config.read().clone()
    }

    /// Replace the configuration. The old gate stays active if validation fails.
    pub fn replace(&self, config: GateConfig) -> Result<(), ConfigError> {
        let config = config.validated()?;
        let gate = ReleaseGate::from_config(&config).with_clock(Arc::clone(&self.clock));
        *self.gate.write() = Arc::new(gate);
        *self.config.write() = config;
        info!("Release gate configuration replaced");
        Ok(())
    }

    /// Reload configuration from files
    pub fn reload(&self, workspace_root: &Path) -> Result<(), ConfigError> {
        self.replace(ConfigLoader::load(workspace_root)?)
    }
}
