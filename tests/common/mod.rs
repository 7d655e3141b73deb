//! Common test utilities for clusteraudit CLI tests.
//!
//! Provides the binary invocation helpers and a canonical rendered-report
//! fixture matching the asciidoc grammar the reporter emits.

use std::path::Path;
use std::process::Command;

/// Command for the clusteraudit binary.
pub fn audit_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_clusteraudit"))
}

/// Command guaranteed to see no cluster credentials: HOME is redirected to
/// an empty directory and KUBECONFIG points at a missing file.
pub fn audit_bin_without_cluster(home: &Path) -> Command {
    let mut cmd = audit_bin();
    cmd.env("HOME", home)
        .env("KUBECONFIG", home.join("missing-kubeconfig"));
    cmd
}

/// A rendered report in the structured-document grammar: one Security
/// category with 2 OK, 1 Warning and 1 Critical entry (the scorer's
/// 62.5-score scenario).
pub const SECURITY_REPORT: &str = "\
= Cluster Audit Report

== Summary

[cols=\"1,1\",options=\"header\"]
|===
| Status | Count
| CRITICAL | 1
| WARNING | 1
| OK | 2
| Total | 4
|===

== Security

=== API server audit profile

Status: OK
Result key: no change
Execution time: 120ms

audit profile is Default

=== Kubeadmin secret

Status: CRITICAL
Result key: required
Execution time: 89ms

kubeadmin user still present

.Recommendations
* remove the kubeadmin secret

=== Ingress TLS

Status: WARNING
Result key: recommended
Execution time: 54ms

old TLS profile

.Recommendations
* move to the Intermediate TLS profile

=== Certificates

Status: OK
Result key: no change
Execution time: 33ms

certificates valid
";
