//! Global config file source: $XDG_CONFIG_HOME/release-gate/config.toml,
//! falling back to ~/.config/release-gate/config.toml.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "release-gate").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global config file to the builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> ConfigBuilder<DefaultState> {
    match path {
        Some(path) if path.exists() => {
            debug!(config_path = %path.display(), "Using global configuration file");
            builder.add_source(File::from(path).format(FileFormat::Toml).required(false))
        }
        Some(path) => {
            debug!(config_path = %path.display(), "No global configuration file");
            builder
        }
        None => builder,
    }
}
