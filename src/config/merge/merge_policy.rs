//! Merge rules: defaults, override order, conflict handling.

use crate::gate::DEFAULT_OVERRIDE_PERMISSION;
use crate::window::FieldNames;
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override individual keys, so a file that only renames the
/// end field keeps the default names for the other three.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let fields = FieldNames::default();
    Config::builder()
        .set_default("fields.start", fields.start)?
        .set_default("fields.start_activate", fields.start_activate)?
        .set_default("fields.end", fields.end)?
        .set_default("fields.end_activate", fields.end_activate)?
        .set_default("override_permission", DEFAULT_OVERRIDE_PERMISSION)
}
