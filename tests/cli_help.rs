mod common;

use common::audit_bin;

#[test]
fn test_help_lists_both_commands() {
    let output = audit_bin().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("run"), "help should list run; got:\n{}", stdout);
    assert!(
        stdout.contains("summary"),
        "help should list summary; got:\n{}",
        stdout
    );
}

#[test]
fn test_run_help_lists_policy_flags() {
    let output = audit_bin().args(["run", "--help"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--format", "--parallel", "--timeout", "--fail-fast", "--category"] {
        assert!(stdout.contains(flag), "missing {flag} in:\n{}", stdout);
    }
}

#[test]
fn test_version_prints() {
    let output = audit_bin().arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("clusteraudit"));
}
