//! Shared helpers for integration tests.

use chrono::{TimeZone, Utc};
use release_gate::site::Site;
use release_gate::{FieldNames, FixedClock, ReleaseGate, Timestamp};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Serializes tests that read or write RELEASE_GATE_* variables.
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Instant every fixture is evaluated at.
pub fn fixture_now() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixed_gate(now: Timestamp) -> ReleaseGate {
    ReleaseGate::default().with_clock(Arc::new(FixedClock(now)))
}

pub fn load_site(name: &str) -> Site {
    Site::load(&fixture_path(name), &FieldNames::default()).unwrap()
}
