//! CLI domain: parse, route and presentation only.
//! Decisions come from the gate; the site module plays the host.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands};
pub use presentation::{CheckReport, StatusReport, StatusRow};
pub use route::RunContext;
