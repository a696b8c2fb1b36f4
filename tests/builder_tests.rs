use cct_merge::builder::{build_tree, BuildOptions};
use cct_merge::tree::VmMeasurement;
use cct_merge::utils::error::BuildError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn labels(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// One run's raw frame tree: root -> foo -> 9 testcase(...) -> bar
fn sample_json(bar_weight: f64) -> String {
    format!(
        r#"{{
  "frame": "root", "method": "root", "weight": {w0}, "root": true,
  "children": [{{
    "frame": "foo", "method": "foo", "weight": {w1},
    "children": [{{
      "frame": "9 testcase(...)", "method": "testcase", "weight": {w2},
      "children": [{{ "frame": "bar", "method": "bar", "weight": {w3}, "children": [] }}]
    }}]
  }}]
}}"#,
        w0 = bar_weight + 3.0,
        w1 = bar_weight + 2.0,
        w2 = bar_weight + 1.0,
        w3 = bar_weight
    )
}

fn write_runs(dir: &TempDir, commit: &str, weights: &[f64]) -> Vec<PathBuf> {
    weights
        .iter()
        .enumerate()
        .map(|(vm, &w)| {
            let path = dir
                .path()
                .join(format!("bench_vm_{}_{}.sample", vm, commit));
            fs::write(&path, sample_json(w)).unwrap();
            path
        })
        .collect()
}

fn options(commit: &str) -> BuildOptions {
    BuildOptions {
        commit: commit.to_string(),
        entry_method: "testcase".to_string(),
        filter_infra: false,
        max_threads: 1,
    }
}

#[test]
fn test_build_tree_merges_and_annotates() {
    let dir = TempDir::new().unwrap();
    let runs = write_runs(&dir, "abc123", &[5.0, 7.0]);

    let tree = build_tree(&runs, &options("abc123")).unwrap();

    // Isolated at testcase: root and foo are gone, bar deduplicated.
    assert_eq!(tree.node(tree.root()).label, "9 testcase(...)");
    let bar = tree.search(&labels(&["9 testcase(...)", "bar"])).unwrap();

    let records = &tree.node(bar).vm_measurements["abc123"];
    assert_eq!(records.len(), 2);
    assert!(records.contains(&VmMeasurement::new(0, vec![5.0])));
    assert!(records.contains(&VmMeasurement::new(1, vec![7.0])));
}

#[test]
fn test_empty_run_set_fails_fast() {
    let result = build_tree(&[], &options("abc123"));
    assert!(matches!(result, Err(BuildError::NoRunFiles)));
}

#[test]
fn test_commit_mismatch_yields_no_matching_runs() {
    let dir = TempDir::new().unwrap();
    let runs = write_runs(&dir, "abc123", &[5.0]);

    let result = build_tree(&runs, &options("fff999"));
    assert!(matches!(result, Err(BuildError::NoMatchingRuns(_))));
}

#[test]
fn test_missing_run_ordinal_token_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bench_abc123.sample");
    fs::write(&path, sample_json(5.0)).unwrap();

    let result = build_tree(&[path], &options("abc123"));
    assert!(matches!(result, Err(BuildError::Parse(_))));
}

#[test]
fn test_missing_entry_method_is_an_error() {
    let dir = TempDir::new().unwrap();
    let runs = write_runs(&dir, "abc123", &[5.0]);

    let mut opts = options("abc123");
    opts.entry_method = "nosuchmethod".to_string();

    let result = build_tree(&runs, &opts);
    assert!(matches!(result, Err(BuildError::EntryMethodNotFound(_))));
}

#[test]
fn test_parallel_parse_matches_sequential_result() {
    let dir = TempDir::new().unwrap();
    let runs = write_runs(&dir, "abc123", &[5.0, 7.0, 11.0, 13.0]);

    let sequential = build_tree(&runs, &options("abc123")).unwrap();

    let mut opts = options("abc123");
    opts.max_threads = 4;
    let parallel = build_tree(&runs, &opts).unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_infra_frames_spliced_before_isolation() {
    let dir = TempDir::new().unwrap();
    let json = r#"{
  "frame": "root", "method": "root", "weight": 10.0, "root": true,
  "children": [{
    "frame": "java.lang.Thread.run()", "method": "run", "weight": 9.0,
    "children": [{
      "frame": "9 testcase(...)", "method": "testcase", "weight": 8.0,
      "children": [{ "frame": "bar", "method": "bar", "weight": 5.0, "children": [] }]
    }]
  }]
}"#;
    let path = dir.path().join("bench_vm_0_abc123.sample");
    fs::write(&path, json).unwrap();

    let mut opts = options("abc123");
    opts.filter_infra = true;

    let tree = build_tree(&[path], &opts).unwrap();
    assert_eq!(tree.node(tree.root()).label, "9 testcase(...)");
    assert!(tree.search(&labels(&["9 testcase(...)", "bar"])).is_some());
}
