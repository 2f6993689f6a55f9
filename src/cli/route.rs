//! CLI route: single route table and run context. Dispatches to the gate,
//! the site host and presentation.

use crate::cli::parse::{Commands, ConfigCommands};
use crate::cli::presentation::{
    format_check_report, format_config, format_status_report, format_validation_result,
    CheckReport, StatusReport, StatusRow,
};
use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::{ConfigLoader, GateConfig};
use crate::error::{ConfigError, GateError};
use crate::gate::{ReleaseGate, VisibilityHooks};
use crate::site::Site;
use crate::types::{NodeId, Timestamp};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Runtime context for CLI execution: workspace and resolved configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: GateConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, GateError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: GateConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, GateError> {
        match command {
            Commands::Check {
                site,
                page,
                viewer,
                at,
                format,
            } => self.handle_check(site, NodeId(*page), viewer.as_deref(), at.as_deref(), format),
            Commands::Status { site, at, format } => {
                self.handle_status(site, at.as_deref(), format)
            }
            Commands::Config { command } => self.handle_config(command),
        }
    }

    fn gate(&self, at: Option<&str>) -> Result<ReleaseGate, GateError> {
        self.config.clone().validated()?;
        let clock: Arc<dyn Clock> = match at {
            Some(raw) => Arc::new(FixedClock(parse_instant(raw)?)),
            None => Arc::new(SystemClock),
        };
        Ok(ReleaseGate::from_config(&self.config).with_clock(clock))
    }

    fn handle_check(
        &self,
        site_path: &Path,
        page: NodeId,
        viewer_name: Option<&str>,
        at: Option<&str>,
        format: &str,
    ) -> Result<String, GateError> {
        let gate = self.gate(at)?;
        let site = Site::load(site_path, gate.field_names())?;
        let node = site.node(page)?;
        let viewer = viewer_name.map(|name| site.viewer(name)).transpose()?;

        let now = gate.now();
        let decision = gate.explain_at(&node, viewer, site.current_viewer(), now);
        info!(page = %page, allowed = decision.allowed, "Check completed");

        let report = CheckReport {
            page,
            viewer: viewer_name.map(str::to_string),
            evaluated_at: now,
            release_time_set: gate.is_release_time_set(&node),
            decision,
        };
        format_check_report(&report, format)
    }

    fn handle_status(
        &self,
        site_path: &Path,
        at: Option<&str>,
        format: &str,
    ) -> Result<String, GateError> {
        let gate = self.gate(at)?;
        let site = Site::load(site_path, gate.field_names())?;
        let now = gate.now();

        let mut rows = Vec::new();
        for page in site.pages() {
            let node = site.node(page.id)?;
            let blocked = gate.first_blocked_at(&node, now);
            rows.push(StatusRow {
                page: page.id,
                label: page.label(),
                own: gate.window_status(&node.window, now),
                released: blocked.is_none(),
                blocked_by: blocked.map(|(by, _)| by),
                release_time_set: gate.is_release_time_set(&node),
                public: gate.filter_public(true, &node),
            });
        }

        let report = StatusReport {
            evaluated_at: now,
            pages: rows,
        };
        format_status_report(&report, format)
    }

    fn handle_config(&self, command: &ConfigCommands) -> Result<String, GateError> {
        match command {
            ConfigCommands::Show { format } => format_config(&self.config, format),
            ConfigCommands::Validate => {
                let result = self.config.validate();
                let text = format_validation_result(&result);
                if result.is_ok() {
                    Ok(text)
                } else {
                    Err(GateError::Config(ConfigError::Invalid(text)))
                }
            }
        }
    }
}

fn parse_instant(raw: &str) -> Result<Timestamp, GateError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| GateError::InvalidTimestamp(raw.to_string()))
}
