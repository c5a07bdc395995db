//! Timing collectors and the collecting backend.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io;
use std::sync::Arc;

use perfwatch_core::{LogBackend, OrdinalLevel, StopWatch, TimingRecord, WriterBackend};
use perfwatch_gateway::collect::{CollectingBackend, StatsCollector, TimingCollector, MAX_SERIES};

fn rec(tag: &str, elapsed: u64) -> TimingRecord {
    TimingRecord {
        start: 0,
        elapsed,
        tag: tag.to_string(),
        message: None,
    }
}

#[test]
fn keeps_most_recent_points_per_tag() {
    let c = TimingCollector::new("lat", vec![], 3);
    for ms in [1, 2, 3, 4, 5] {
        c.record(&rec("db", ms));
    }
    c.record(&rec("http", 9));

    assert_eq!(c.samples("db"), 3);
    assert_eq!(c.samples("http"), 1);

    let url = c.chart_url().unwrap();
    assert!(url.starts_with("https://chart.googleapis.com/chart?cht=lc"));
    assert!(url.contains("chtt=lat"));
    assert!(url.contains("chdl=db|http"));
    assert!(url.contains("chd=t:3,4,5|9"));
    assert!(url.contains("chds=0,9"));
}

#[test]
fn tag_filter_drops_other_tags() {
    let c = TimingCollector::new("only-db", vec!["db".into()], 10);
    c.record(&rec("http", 9));
    assert!(c.chart_url().is_none());

    c.record(&rec("db", 4));
    assert_eq!(c.samples("db"), 1);
    assert_eq!(c.samples("http"), 0);
}

#[test]
fn series_count_is_capped() {
    let c = TimingCollector::new("many", vec![], 4);
    for i in 0..MAX_SERIES + 5 {
        c.record(&rec(&format!("tag-{i:02}"), 1));
    }
    // known tags keep recording past the cap
    c.record(&rec("tag-00", 2));

    assert_eq!(c.samples("tag-00"), 2);
    assert_eq!(c.samples(&format!("tag-{:02}", MAX_SERIES - 1)), 1);
    assert_eq!(c.samples(&format!("tag-{:02}", MAX_SERIES)), 0);

    let url = c.chart_url().unwrap();
    let legend = url.split("chdl=").nth(1).unwrap().split('&').next().unwrap();
    assert_eq!(legend.split('|').count(), MAX_SERIES);
}

#[test]
fn chart_params_are_url_encoded() {
    let c = TimingCollector::new("api latency", vec![], 10);
    c.record(&rec("GET /users&x", 2));

    let url = c.chart_url().unwrap();
    assert!(url.contains("chtt=api%20latency"));
    assert!(url.contains("chdl=GET%20%2Fusers%26x"));
}

#[test]
fn collecting_backend_feeds_only_logged_lines() {
    let collector = Arc::new(TimingCollector::new("all", vec![], 10));
    let handle: Arc<dyn StatsCollector> = collector.clone();
    let backend = CollectingBackend::new(WriterBackend::new("perf", OrdinalLevel::INFO, io::sink()))
        .with_collector(handle);

    let mut quiet = StopWatch::new(&backend, OrdinalLevel::DEBUG, OrdinalLevel::ERROR).tagged("quiet");
    quiet.stop();
    let mut loud = StopWatch::new(&backend, OrdinalLevel::INFO, OrdinalLevel::ERROR).tagged("loud");
    loud.stop();

    assert_eq!(collector.samples("quiet"), 0);
    assert_eq!(collector.samples("loud"), 1);

    // lines that are not timing lines are passed through but not collected
    backend.emit(OrdinalLevel::ERROR, "not a timing line");
    assert_eq!(collector.samples("not a timing line"), 0);
}

#[test]
fn collecting_backend_gate_follows_inner_threshold() {
    let backend = CollectingBackend::new(WriterBackend::new("perf", OrdinalLevel::WARN, io::sink()));
    assert!(!backend.is_enabled(OrdinalLevel::INFO));

    backend.inner().set_threshold(OrdinalLevel::TRACE);
    assert!(backend.is_enabled(OrdinalLevel::INFO));
}
