//! Configuration-validation failures must exit non-zero before any check
//! runs, and must not require cluster access to be reported.

mod common;

use common::audit_bin_without_cluster;
use tempfile::tempdir;

#[test]
fn test_unknown_format_is_fatal() {
    let home = tempdir().unwrap();
    let output = audit_bin_without_cluster(home.path())
        .args(["run", "--format", "xml"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unknown report format 'xml'"),
        "got:\n{}",
        stderr
    );
}

#[test]
fn test_unknown_check_set_is_fatal() {
    let home = tempdir().unwrap();
    let output = audit_bin_without_cluster(home.path())
        .args(["run", "--checks", "everything"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown check set 'everything'"), "got:\n{}", stderr);
}

#[test]
fn test_unknown_category_is_fatal() {
    let home = tempdir().unwrap();
    let output = audit_bin_without_cluster(home.path())
        .args(["run", "--category", "Gibberish"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown category 'Gibberish'"), "got:\n{}", stderr);
}

#[test]
fn test_category_outside_check_set_is_fatal() {
    // Applications checks are excluded from the openshift set, so this
    // filter selects nothing.
    let home = tempdir().unwrap();
    let output = audit_bin_without_cluster(home.path())
        .args(["run", "--checks", "openshift", "--category", "Applications"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("matched no checks"), "got:\n{}", stderr);
}

#[test]
fn test_missing_cluster_access_is_fatal_pre_run() {
    let home = tempdir().unwrap();
    let output = audit_bin_without_cluster(home.path())
        .args(["run"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no cluster access"), "got:\n{}", stderr);
    // no artifact produced
    assert!(!home.path().join("cluster-report.adoc").exists());
}

#[test]
fn test_validation_errors_win_over_missing_cluster() {
    // Invalid config is reported even though credentials are also absent.
    let home = tempdir().unwrap();
    let output = audit_bin_without_cluster(home.path())
        .args(["run", "--format", "xml"])
        .output()
        .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown report format"), "got:\n{}", stderr);
    assert!(!stderr.contains("no cluster access"));
}
