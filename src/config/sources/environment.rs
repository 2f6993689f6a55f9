//! Environment source: RELEASE_GATE__OVERRIDE_PERMISSION, RELEASE_GATE__FIELDS__END, ...

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const PREFIX: &str = "RELEASE_GATE";

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(PREFIX)
            .prefix_separator("__")
            .separator("__"),
    )
}
