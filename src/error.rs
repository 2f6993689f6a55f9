//! Error types for the release gate.
//!
//! Evaluation itself never fails; these cover the host-facing boundary,
//! configuration loading and the reference site host.

use crate::types::NodeId;
use thiserror::Error;

/// Errors surfaced to a host when it asks for access to a gated resource.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The viewer may not see the resource. Deliberately phrased as a missing
    /// resource so the gate does not disclose that the resource exists.
    #[error("File not found")]
    NotFound,
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{0}")]
    Invalid(String),

    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err.to_string())
    }
}

/// Errors from the reference site host
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Page not found: {0}")]
    PageNotFound(NodeId),

    #[error("Viewer not found: {0}")]
    ViewerNotFound(String),

    #[error("Duplicate page id: {0}")]
    DuplicatePage(NodeId),

    #[error("Duplicate viewer name: {0}")]
    DuplicateViewer(String),

    #[error("Parent cycle detected at page {0}")]
    ParentCycle(NodeId),

    #[error("Invalid value for field '{field}' on page {page}: {reason}")]
    InvalidField {
        page: NodeId,
        field: String,
        reason: String,
    },

    #[error("Unsupported site document format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse site document: {0}")]
    Parse(String),

    #[error("Site I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        SiteError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for SiteError {
    fn from(err: toml::de::Error) -> Self {
        SiteError::Parse(err.to_string())
    }
}

/// Top-level error for the CLI and other outer surfaces
#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Site error: {0}")]
    Site(#[from] SiteError),

    #[error("Invalid timestamp '{0}': expected RFC 3339")]
    InvalidTimestamp(String),

    #[error("Invalid format: '{given}'. Must be {expected}.")]
    InvalidFormat {
        given: String,
        expected: &'static str,
    },

    #[error("Output error: {0}")]
    Output(String),
}

impl From<config::ConfigError> for GateError {
    fn from(err: config::ConfigError) -> Self {
        GateError::Config(err.into())
    }
}
