#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use perfwatch_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
graphs:
  graph_name: "a,b" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.server.graphs_path, "/perf/graphs");
    assert_eq!(cfg.logging.exception_level, "warn");
    assert!(cfg.collectors.is_empty());
    assert_eq!(cfg.graphs.default_names(), None);
}

#[test]
fn wrong_version_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn graph_names_split_on_commas_in_order() {
    let ok = r#"
version: 1
graphs:
  graph_names: " latency , ,errors,latency "
"#;
    let cfg = config::load_from_str(ok).unwrap();
    assert_eq!(
        cfg.graphs.default_names(),
        Some(vec!["latency".to_string(), "errors".to_string(), "latency".to_string()])
    );
}

#[test]
fn blank_graph_names_mean_no_defaults() {
    let cfg = config::load_from_str("version: 1\ngraphs:\n  graph_names: \" , \"\n").unwrap();
    assert_eq!(cfg.graphs.default_names(), None);
}

#[test]
fn duplicate_collector_names_rejected() {
    let bad = r#"
version: 1
collectors:
  - name: "a"
  - name: "a"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("duplicate collector name"));
}

#[test]
fn collector_bounds_checked() {
    let bad = r#"
version: 1
collectors:
  - name: "a"
    max_points: 0
"#;
    assert!(config::load_from_str(bad).is_err());

    let bad_path = "version: 1\nserver:\n  graphs_path: \"perf\"\n";
    assert!(config::load_from_str(bad_path).is_err());
}

#[test]
fn unknown_level_names_are_not_config_errors() {
    let ok = r#"
version: 1
logging:
  threshold: "loud"
"#;
    let cfg = config::load_from_str(ok).unwrap();
    assert_eq!(cfg.logging.threshold, "loud");
}
