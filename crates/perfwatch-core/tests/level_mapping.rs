//! Symbolic severity mapping per backend.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use perfwatch_core::{LevelMapper, OrdinalLevel, Severity, TracingBackend, WriterBackend};
use tracing::Level;

const NAMES: [&str; 9] = [
    "trace", "debug", "info", "notice", "warn", "warning", "error", "critical", "fatal",
];

#[test]
fn parse_is_case_insensitive() {
    assert_eq!(Severity::parse("WARN"), Some(Severity::Warn));
    assert_eq!(Severity::parse("Warning"), Some(Severity::Warn));
    assert_eq!(Severity::parse(" debug "), Some(Severity::Debug));
    assert_eq!(Severity::parse("FaTaL"), Some(Severity::Critical));
    assert_eq!(Severity::parse("verbose"), None);
}

#[test]
fn map_is_total_and_idempotent() {
    for name in NAMES {
        let upper = name.to_ascii_uppercase();
        assert_eq!(WriterBackend::map(Some(name)), WriterBackend::map(Some(name)));
        assert_eq!(WriterBackend::map(Some(name)), WriterBackend::map(Some(&upper)));
        assert_eq!(TracingBackend::map(Some(name)), TracingBackend::map(Some(&upper)));
        assert!(WriterBackend::map(Some(name)).is_native());
    }
}

#[test]
fn unknown_names_fall_back_to_info() {
    for bad in [Some("inf0"), Some(""), Some("   "), None] {
        assert_eq!(WriterBackend::map(bad), OrdinalLevel::INFO);
        assert_eq!(TracingBackend::map(bad), Level::INFO);
    }
}

#[test]
fn tables_are_backend_specific() {
    assert_eq!(WriterBackend::map(Some("notice")), OrdinalLevel::NOTICE);
    assert_eq!(TracingBackend::map(Some("notice")), Level::INFO);

    assert_eq!(WriterBackend::map(Some("fatal")), OrdinalLevel::CRITICAL);
    assert_eq!(TracingBackend::map(Some("fatal")), Level::ERROR);

    assert_eq!(TracingBackend::map(Some("trace")), Level::TRACE);
    assert_eq!(TracingBackend::map(Some("warn")), Level::WARN);
}

#[test]
fn ordinal_levels_snap_down_to_nearest_tier() {
    assert_eq!(OrdinalLevel(30).snapped(), OrdinalLevel::INFO);
    assert_eq!(OrdinalLevel(34).snapped(), OrdinalLevel::INFO);
    assert_eq!(OrdinalLevel(39).snapped(), OrdinalLevel::NOTICE);
    assert_eq!(OrdinalLevel(45).snapped(), OrdinalLevel::WARN);
    assert_eq!(OrdinalLevel(u16::MAX).snapped(), OrdinalLevel::CRITICAL);
    // below every tier
    assert_eq!(OrdinalLevel(0).snapped(), OrdinalLevel::TRACE);
    assert_eq!(OrdinalLevel(9).snapped(), OrdinalLevel::TRACE);

    assert!(!OrdinalLevel(45).is_native());
    assert_eq!(OrdinalLevel(45).name(), "WARN");
}
