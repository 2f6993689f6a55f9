//! Config loader: assembles the layered sources into a [`GateConfig`].

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::GateConfig;
use crate::error::ConfigError;
use config::{File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{RELEASE_GATE_ENV}.toml`,
    /// `RELEASE_GATE__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<GateConfig, ConfigError> {
        Self::load_layered(workspace_root, Self::global_config_path().as_deref())
    }

    /// Same as [`load`](Self::load) with an explicit global file location.
    pub fn load_layered(
        workspace_root: &Path,
        global: Option<&Path>,
    ) -> Result<GateConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder, global);
        let builder = workspace_file::add_to_builder(builder, workspace_root);
        let builder = environment::add_to_builder(builder);

        let config: GateConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            override_permission = %config.override_permission,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load a single config file on top of the defaults. Environment
    /// overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<GateConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Load(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml));
        let builder = environment::add_to_builder(builder);
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
