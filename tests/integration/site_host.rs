//! Reference host: loading site documents and materializing nodes.

use super::test_utils::{fixture_now, fixed_gate, fixture_path, load_site};
use chrono::{Duration, TimeZone, Utc};
use release_gate::gate::BlockedBy;
use release_gate::site::{Site, SiteDocument};
use release_gate::{AncestorRef, FieldNames, NodeId, SiteError, WindowBound};
use tempfile::TempDir;

#[test]
fn test_fixture_release_states() {
    let site = load_site("site.json");
    let gate = fixed_gate(fixture_now());
    let now = fixture_now();

    let expectations = [
        (1, None),
        (2, Some(BlockedBy::Target)),
        (3, Some(BlockedBy::Ancestor(NodeId(2)))),
        (4, Some(BlockedBy::Target)),
        (5, None),
        (6, None),
    ];
    for (id, expected) in expectations {
        let node = site.node(NodeId(id)).unwrap();
        let blocked = gate.first_blocked_at(&node, now).map(|(by, _)| by);
        assert_eq!(blocked, expected, "page {}", id);
    }
}

#[test]
fn test_fixture_windows_resolve_to_tagged_bounds() {
    let site = load_site("site.json");

    let news = site.node(NodeId(2)).unwrap();
    assert!(matches!(news.window.start, WindowBound::Toggled { active: true, .. }));
    assert!(matches!(news.window.end, WindowBound::Toggled { active: false, .. }));

    let archive = site.node(NodeId(4)).unwrap();
    assert_eq!(archive.window.start, WindowBound::Unset);
    assert!(matches!(archive.window.end, WindowBound::Unconditional { at: Some(_) }));

    let orphan = site.node(NodeId(6)).unwrap();
    assert_eq!(orphan.ancestors, vec![AncestorRef::Unresolved]);
}

#[test]
fn test_toml_site_document() {
    let site = load_site("site.toml");
    let node = site.node(NodeId(11)).unwrap();
    assert_eq!(node.ancestors.len(), 1);

    let before = Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap();
    let during = Utc.with_ymd_and_hms(2025, 7, 15, 0, 0, 0).unwrap();
    let after = Utc.with_ymd_and_hms(2025, 7, 31, 23, 59, 59).unwrap() + Duration::seconds(1);

    let gate = fixed_gate(during);
    assert!(!gate.is_released_at(&node, before));
    assert!(gate.is_released_at(&node, during));
    assert!(!gate.is_released_at(&node, after));
}

#[test]
fn test_toml_native_datetimes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("site.toml");
    std::fs::write(
        &path,
        "[[pages]]\n\
         id = 1\n\
         [pages.fields]\n\
         releasetime_start = 2025-07-01T00:00:00Z\n\
         releasetime_start_activate = true\n\
         releasetime_end = 2025-07-02T00:00:00+02:00\n",
    )
    .unwrap();

    let site = Site::load(&path, &FieldNames::default()).unwrap();
    let node = site.node(NodeId(1)).unwrap();
    assert_eq!(
        node.window.start,
        WindowBound::Toggled {
            active: true,
            at: Some(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()),
        }
    );
    assert_eq!(
        node.window.end,
        WindowBound::Unconditional {
            at: Some(Utc.with_ymd_and_hms(2025, 7, 1, 22, 0, 0).unwrap()),
        }
    );
}

#[test]
fn test_local_toml_datetime_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("site.toml");
    std::fs::write(
        &path,
        "[[pages]]\nid = 1\n[pages.fields]\nreleasetime_end = 2025-07-01T00:00:00\n",
    )
    .unwrap();

    let result = Site::load(&path, &FieldNames::default());
    assert!(matches!(result, Err(SiteError::InvalidField { .. })));
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("site.yaml");
    std::fs::write(&path, "pages: []").unwrap();
    let result = SiteDocument::from_path(&path);
    assert!(matches!(result, Err(SiteError::UnsupportedFormat(ext)) if ext == "yaml"));
}

#[test]
fn test_missing_site_file() {
    let result = Site::load(&fixture_path("does-not-exist.json"), &FieldNames::default());
    assert!(matches!(result, Err(SiteError::IoError(_))));
}

#[test]
fn test_custom_field_names_change_resolution() {
    let site = Site::load(
        &fixture_path("site.json"),
        &FieldNames {
            start: "go_live".to_string(),
            start_activate: "go_live_enabled".to_string(),
            end: "take_down".to_string(),
            end_activate: "take_down_enabled".to_string(),
        },
    )
    .unwrap();
    let gate = fixed_gate(fixture_now());

    // None of the fixture pages declare the renamed fields.
    for page in site.pages() {
        let node = site.node(page.id).unwrap();
        assert!(!gate.is_release_time_set(&node), "page {}", page.id);
    }
}

#[test]
fn test_unknown_page() {
    let site = load_site("site.json");
    assert!(matches!(
        site.node(NodeId(404)),
        Err(SiteError::PageNotFound(NodeId(404)))
    ));
}
