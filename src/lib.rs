//! clusteraudit - batch cluster audit tool
//!
//! Runs a pluggable set of diagnostic checks against a remote cluster,
//! aggregates their verdicts, and renders the aggregate as a structured,
//! shareable report. A separate batch stage re-parses a rendered report
//! into a scored executive summary.

pub mod aggregator;
pub mod check;
pub mod checks;
pub mod cluster;
pub mod error;
pub mod models;
pub mod report;
pub mod runner;
pub mod scorer;
pub mod ui;

// Re-exports for convenience
pub use aggregator::Aggregator;
pub use check::{Check, CheckRegistry};
pub use cluster::{resolve_kubeconfig, ClusterAccessor, OcAccessor};
pub use error::{AuditError, AuditResult};
pub use models::{
    Category, CheckResult, CheckSet, ReportConfig, ReportFormat, ResultKey, RunConfig, Status,
};
pub use report::Reporter;
pub use runner::{CheckFailure, RunOutcome, RunState, Runner};
pub use scorer::{parse_report, score, ScoreCard};
