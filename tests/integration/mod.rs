//! Integration tests for the release gate

mod gate_scenarios;
mod site_host;
mod test_utils;
