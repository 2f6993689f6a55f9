//! Presentation: text and json formatters for command results.

use crate::config::{GateConfig, ValidationError};
use crate::error::GateError;
use crate::gate::{BlockedBy, Decision, ReleaseStatus};
use crate::types::{NodeId, Timestamp};
use comfy_table::Table;
use serde::Serialize;

/// Result of `check`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub page: NodeId,
    pub viewer: Option<String>,
    pub evaluated_at: Timestamp,
    pub release_time_set: bool,
    pub decision: Decision,
}

/// One page in `status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusRow {
    pub page: NodeId,
    pub label: String,
    pub own: ReleaseStatus,
    pub released: bool,
    pub blocked_by: Option<BlockedBy>,
    pub release_time_set: bool,
    pub public: bool,
}

/// Result of `status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub evaluated_at: Timestamp,
    pub pages: Vec<StatusRow>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, GateError> {
    serde_json::to_string_pretty(value).map_err(|e| GateError::Output(e.to_string()))
}

fn invalid_format(given: &str, expected: &'static str) -> GateError {
    GateError::InvalidFormat {
        given: given.to_string(),
        expected,
    }
}

pub fn format_check_report(report: &CheckReport, format: &str) -> Result<String, GateError> {
    match format {
        "json" => return to_json(report),
        "text" => {}
        other => return Err(invalid_format(other, "'text' or 'json'")),
    }
    let viewer = report.viewer.as_deref().unwrap_or("<current>");
    Ok(format!(
        "Page {} for {} at {}\n  {}\n  Release time set: {}",
        report.page,
        viewer,
        report.evaluated_at.to_rfc3339(),
        report.decision,
        if report.release_time_set { "yes" } else { "no" }
    ))
}

pub fn format_status_report(report: &StatusReport, format: &str) -> Result<String, GateError> {
    match format {
        "json" => return to_json(report),
        "text" => {}
        other => return Err(invalid_format(other, "'text' or 'json'")),
    }
    if report.pages.is_empty() {
        return Ok("Site has no pages.".to_string());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Page",
        "Own window",
        "Released",
        "Blocked by",
        "Window set",
        "Public",
    ]);
    for row in &report.pages {
        let blocked_by = match row.blocked_by {
            None => "-".to_string(),
            Some(BlockedBy::Target) => "self".to_string(),
            Some(BlockedBy::Ancestor(id)) => format!("ancestor {}", id),
        };
        table.add_row(vec![
            row.label.clone(),
            row.own.to_string(),
            yes_no(row.released).to_string(),
            blocked_by,
            yes_no(row.release_time_set).to_string(),
            yes_no(row.public).to_string(),
        ]);
    }
    Ok(format!(
        "Evaluated at {}\n{}",
        report.evaluated_at.to_rfc3339(),
        table
    ))
}

pub fn format_config(config: &GateConfig, format: &str) -> Result<String, GateError> {
    match format {
        "json" => to_json(config),
        "toml" => toml::to_string_pretty(config).map_err(|e| GateError::Output(e.to_string())),
        other => Err(invalid_format(other, "'toml' or 'json'")),
    }
}

pub fn format_validation_result(result: &Result<(), Vec<ValidationError>>) -> String {
    match result {
        Ok(()) => "Configuration is valid".to_string(),
        Err(errors) => {
            let mut s = format!("Configuration has {} problem(s):", errors.len());
            for e in errors {
                s.push_str(&format!("\n  - {}", e));
            }
            s
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
