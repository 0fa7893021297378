//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

/// Lays out the reference tree: two days, newest file in the newest day.
fn sample_tree(root: &Path) {
    for file in ["20240102/1700000000.jpg", "20240102/1700000100.jpg", "20240101/1699999999.jpg"] {
        let path = root.join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"jpeg").unwrap();
    }
}

fn run_cli(args: &[&str], envs: &[(&str, &str)]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_latest-capture");
    let mut cmd = Command::new(bin);
    for var in [
        "LATEST_CAPTURE_ROOT",
        "LATEST_CAPTURE_BASE_URL",
        "LATEST_CAPTURE_BIND",
        "LATEST_CAPTURE_REFRESH_SECS",
        "LATEST_CAPTURE_RECORD",
    ] {
        cmd.env_remove(var);
    }
    cmd.args(args).envs(envs.iter().copied()).output().expect("failed to run latest-capture binary")
}

#[test]
fn resolve_prints_newest_capture() {
    let dir = tempfile::tempdir().unwrap();
    sample_tree(dir.path());

    let output = run_cli(&["resolve", "--root", dir.path().to_str().unwrap()], &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("20240102/1700000100.jpg"));
}

#[test]
fn resolve_reads_root_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    sample_tree(dir.path());

    let output = run_cli(&["resolve"], &[("LATEST_CAPTURE_ROOT", dir.path().to_str().unwrap())]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("1700000100.jpg"));
}

#[test]
fn resolve_missing_root_is_not_an_error() {
    let output = run_cli(&["resolve", "--root", "/nonexistent/latest-capture-cli"], &[]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No image found"));
}

#[test]
fn lookup_prints_record_with_public_url() {
    let dir = tempfile::tempdir().unwrap();
    sample_tree(dir.path());

    let output = run_cli(
        &["lookup", "--root", dir.path().to_str().unwrap(), "--base-url", "https://cdn.test"],
        &[],
    );
    assert!(output.status.success());

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["success"], true);
    assert_eq!(record["filename"], "1700000100.jpg");
    let url = record["latest_url"].as_str().unwrap();
    assert!(url.starts_with("https://cdn.test/"));
    assert!(url.ends_with("/20240102/1700000100.jpg"));
    assert!(record.get("message").is_none());
}

#[test]
fn lookup_without_capture_prints_record_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("20240102")).unwrap();
    std::fs::create_dir(dir.path().join("20240101")).unwrap();
    std::fs::write(dir.path().join("20240101/1699999999.jpg"), b"jpeg").unwrap();

    let output = run_cli(&["lookup", "--root", dir.path().to_str().unwrap()], &[]);
    assert!(!output.status.success());

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["success"], false);
    assert_eq!(record["latest_url"], "");
    assert!(record["filename"].is_null());
    assert!(record["message"].as_str().unwrap().contains("not found"));
}

#[test]
fn view_prints_page_with_image_and_refresh() {
    let dir = tempfile::tempdir().unwrap();
    sample_tree(dir.path());

    let output =
        run_cli(&["view", "--root", dir.path().to_str().unwrap(), "--refresh", "120"], &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("/20240102/1700000100.jpg?t="));
    assert!(stdout.contains("content=\"120\""));
}

#[test]
fn invalid_environment_is_reported() {
    let output = run_cli(&["resolve"], &[("LATEST_CAPTURE_REFRESH_SECS", "0")]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("LATEST_CAPTURE_REFRESH_SECS"));
}

#[test]
fn zero_refresh_flag_is_rejected_like_the_environment() {
    let output = run_cli(&["view", "--refresh", "0"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("--refresh"));
}

#[test]
fn record_env_writes_filesystem_cassette() {
    let tree = tempfile::tempdir().unwrap();
    sample_tree(tree.path());
    let cassettes = tempfile::tempdir().unwrap();

    let output = run_cli(
        &["resolve", "--root", tree.path().to_str().unwrap()],
        &[("LATEST_CAPTURE_RECORD", cassettes.path().to_str().unwrap())],
    );
    assert!(output.status.success());

    let sessions: Vec<_> = std::fs::read_dir(cassettes.path()).unwrap().collect();
    assert_eq!(sessions.len(), 1);
    let session_dir = sessions[0].as_ref().unwrap().path();
    assert!(session_dir.join("fs.cassette.yaml").is_file());
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_cli(&["nonsense"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
