// tests/unit_config.rs
use std::fs;
use std::path::Path;

use placerank_core::config::{Config, PageRankConfig};
use placerank_core::error::PlaceRankError;

#[test]
fn test_defaults() {
    let c = Config::new();
    assert!((c.pagerank.walk_probability - 0.85).abs() < f64::EPSILON);
    assert!((c.pagerank.convergence - 1e-6).abs() < f64::EPSILON);
    assert_eq!(c.pipeline.queue_capacity, 1000);
    assert_eq!(c.report.preview, 50);
    assert_eq!(c.report.sample_limit, 10);
}

#[test]
fn test_partial_toml_keeps_other_defaults() {
    let c = Config::parse_toml(Path::new("inline"), "[pagerank]\nconvergence = 1e-9").unwrap();
    assert!((c.pagerank.convergence - 1e-9).abs() < f64::EPSILON);
    assert!((c.pagerank.walk_probability - PageRankConfig::default().walk_probability).abs() < f64::EPSILON);
    assert_eq!(c.pipeline.queue_capacity, 1000);
}

#[test]
fn test_load_explicit_file() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("custom.toml");
    fs::write(&path, "[pipeline]\nqueue_capacity = 16\n[report]\npreview = 5").unwrap();
    let c = Config::load(Some(&path)).unwrap();
    assert_eq!(c.pipeline.queue_capacity, 16);
    assert_eq!(c.report.preview, 5);
}

#[test]
fn test_out_of_range_walk_probability() {
    let err = Config::parse_toml(Path::new("inline"), "[pagerank]\nwalk_probability = 1.5").unwrap_err();
    assert!(matches!(err, PlaceRankError::Config { .. }));
}

#[test]
fn test_walk_probability_of_one_is_rejected() {
    let err = Config::parse_toml(Path::new("inline"), "[pagerank]\nwalk_probability = 1.0").unwrap_err();
    assert!(matches!(err, PlaceRankError::Config { .. }));
    assert!(Config::parse_toml(Path::new("inline"), "[pagerank]\nwalk_probability = 0.99").is_ok());
}

#[test]
fn test_zero_queue_capacity() {
    let err = Config::parse_toml(Path::new("inline"), "[pipeline]\nqueue_capacity = 0").unwrap_err();
    assert!(matches!(err, PlaceRankError::Config { .. }));
}

#[test]
fn test_malformed_toml() {
    let err = Config::parse_toml(Path::new("inline"), "[pagerank\n").unwrap_err();
    assert!(matches!(err, PlaceRankError::Config { .. }));
}

#[test]
fn test_missing_explicit_file() {
    let err = Config::load(Some(Path::new("/nonexistent/placerank.toml"))).unwrap_err();
    assert!(matches!(err, PlaceRankError::Io { .. }));
}
