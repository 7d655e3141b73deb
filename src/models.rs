//! Core data model: statuses, result keys, categories, check results and
//! run/report configuration.
//!
//! Everything here is plain data. The runner stamps `execution_time` on a
//! result once; after that results are only ever read.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};

/// Severity verdict of a check result.
///
/// Variant order is the severity order (`NotApplicable` lowest, `Critical`
/// highest) so the derived `Ord` can be used directly for escalation and
/// sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NotApplicable,
    Ok,
    Unknown,
    Warning,
    Critical,
}

impl Status {
    /// All statuses in ascending severity order.
    pub const ALL: [Status; 5] = [
        Status::NotApplicable,
        Status::Ok,
        Status::Unknown,
        Status::Warning,
        Status::Critical,
    ];

    /// Uppercase label used by the asciidoc/html renderers and re-parsed
    /// by the scorer.
    pub fn label(&self) -> &'static str {
        match self {
            Status::NotApplicable => "NOT APPLICABLE",
            Status::Ok => "OK",
            Status::Unknown => "UNKNOWN",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
        }
    }

    /// Inverse of [`Status::label`], used by the scorer.
    pub fn from_label(label: &str) -> Option<Status> {
        match label {
            "NOT APPLICABLE" => Some(Status::NotApplicable),
            "OK" => Some(Status::Ok),
            "UNKNOWN" => Some(Status::Unknown),
            "WARNING" => Some(Status::Warning),
            "CRITICAL" => Some(Status::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Recommended follow-up class for a result; orthogonal to [`Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKey {
    NoChange,
    Advisory,
    Recommended,
    Required,
    NotApplicable,
}

impl ResultKey {
    pub fn label(&self) -> &'static str {
        match self {
            ResultKey::NoChange => "no change",
            ResultKey::Advisory => "advisory",
            ResultKey::Recommended => "recommended",
            ResultKey::Required => "required",
            ResultKey::NotApplicable => "not applicable",
        }
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Open, string-valued grouping label.
///
/// The engine never interprets a category; it only groups and filters by
/// it. The shipped check set uses the labels in
/// [`crate::checks::KNOWN_CATEGORIES`], but nothing in the engine depends
/// on that list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

impl Category {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category(s.to_string())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The immutable outcome of one check execution in one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Stable check identity, primary key for all lookups
    pub check_id: String,
    /// Display name of the check
    pub check_name: String,
    /// Grouping label, copied from the check
    pub category: Category,
    /// Severity verdict
    pub status: Status,
    /// Short human summary
    pub message: String,
    /// Recommended follow-up class
    pub result_key: ResultKey,
    /// Ordered remediation suggestions
    pub recommendations: Vec<String>,
    /// Long-form structured text, possibly multi-kilobyte
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Wall-clock duration as text, stamped by the runner
    pub execution_time: String,
    /// Open key/value bag (BTreeMap keeps serialization deterministic)
    pub metadata: BTreeMap<String, String>,
}

impl CheckResult {
    pub fn new(
        check_id: impl Into<String>,
        check_name: impl Into<String>,
        category: Category,
        status: Status,
        message: impl Into<String>,
    ) -> Self {
        CheckResult {
            check_id: check_id.into(),
            check_name: check_name.into(),
            category,
            status,
            message: message.into(),
            result_key: ResultKey::NoChange,
            recommendations: Vec::new(),
            detail: None,
            execution_time: String::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_key(mut self, key: ResultKey) -> Self {
        self.result_key = key;
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendations.push(recommendation.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Which shipped checks to assemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckSet {
    Openshift,
    Application,
    All,
}

impl CheckSet {
    pub fn parse(s: &str) -> AuditResult<CheckSet> {
        match s {
            "openshift" => Ok(CheckSet::Openshift),
            "application" => Ok(CheckSet::Application),
            "all" => Ok(CheckSet::All),
            other => Err(AuditError::UnknownCheckSet {
                set: other.to_string(),
            }),
        }
    }
}

/// Run-time policy for the scheduler. Immutable once handed to the runner.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Where report artifacts land
    pub output_dir: PathBuf,
    /// Category filter; empty means all
    pub categories: Vec<Category>,
    /// Per-check wall-clock ceiling; zero means unbounded
    pub timeout: Duration,
    /// Dispatch checks as parallel tasks
    pub parallel: bool,
    /// Stop dispatching after the first Critical result
    pub fail_fast: bool,
    /// Echo per-check diagnostics to stderr
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            output_dir: PathBuf::from("."),
            categories: Vec::new(),
            timeout: Duration::ZERO,
            parallel: false,
            fail_fast: false,
            verbose: false,
        }
    }
}

/// Output format selector for the reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Sectioned long-form document (default)
    Asciidoc,
    /// Same structure as nested markup with status-colored styling
    Html,
    /// Flat machine-readable record list, stable field names
    Json,
    /// Counts-only terminal output
    Summary,
}

impl ReportFormat {
    pub fn parse(s: &str) -> AuditResult<ReportFormat> {
        match s {
            "asciidoc" => Ok(ReportFormat::Asciidoc),
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            "summary" => Ok(ReportFormat::Summary),
            other => Err(AuditError::UnknownFormat {
                format: other.to_string(),
            }),
        }
    }

    /// File extension for persisted formats; `None` for terminal-only.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ReportFormat::Asciidoc => Some("adoc"),
            ReportFormat::Html => Some("html"),
            ReportFormat::Json => Some("json"),
            ReportFormat::Summary => None,
        }
    }
}

/// One-shot configuration for a single reporter invocation.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub format: ReportFormat,
    pub output_dir: PathBuf,
    /// Filename stem, without extension or timestamp
    pub filename: String,
    /// Append a timestamp component to the filename and embed a
    /// generation time in the document header
    pub include_timestamp: bool,
    /// Render each result's detail block
    pub include_details: bool,
    /// Document title
    pub title: String,
    /// Section the document by category instead of one flat list
    pub group_by_category: bool,
    /// Allow colored summary output
    pub color: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            format: ReportFormat::Asciidoc,
            output_dir: PathBuf::from("."),
            filename: "cluster-report".to_string(),
            include_timestamp: false,
            include_details: false,
            title: "Cluster Audit Report".to_string(),
            group_by_category: true,
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_severity_order_matches_spec() {
        assert!(Status::NotApplicable < Status::Ok);
        assert!(Status::Ok < Status::Unknown);
        assert!(Status::Unknown < Status::Warning);
        assert!(Status::Warning < Status::Critical);
    }

    #[test]
    fn status_label_round_trips() {
        for status in Status::ALL {
            assert_eq!(Status::from_label(status.label()), Some(status));
        }
        assert_eq!(Status::from_label("BROKEN"), None);
    }

    #[test]
    fn check_result_builders_accumulate() {
        let result = CheckResult::new(
            "etcd-members",
            "Etcd member health",
            Category::from("Cluster"),
            Status::Warning,
            "one member degraded",
        )
        .with_key(ResultKey::Recommended)
        .with_recommendation("inspect the degraded member")
        .with_recommendation("check etcd disk latency")
        .with_metadata("members", "3");

        assert_eq!(result.result_key, ResultKey::Recommended);
        assert_eq!(result.recommendations.len(), 2);
        assert_eq!(result.metadata.get("members").map(String::as_str), Some("3"));
        assert!(result.detail.is_none());
    }

    #[test]
    fn check_result_serializes_stable_field_names() {
        let result = CheckResult::new(
            "a",
            "A",
            Category::from("Cluster"),
            Status::Ok,
            "fine",
        );
        let json = serde_json::to_value(&result).unwrap();
        for field in [
            "check_id",
            "check_name",
            "category",
            "status",
            "message",
            "result_key",
            "recommendations",
            "execution_time",
            "metadata",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(json["status"], "ok");
    }

    #[test]
    fn check_set_parse_rejects_unknown() {
        assert!(CheckSet::parse("all").is_ok());
        assert!(CheckSet::parse("everything").is_err());
    }

    #[test]
    fn report_format_parse_and_extension() {
        assert_eq!(ReportFormat::parse("json").unwrap(), ReportFormat::Json);
        assert_eq!(ReportFormat::Asciidoc.extension(), Some("adoc"));
        assert_eq!(ReportFormat::Summary.extension(), None);
        assert!(ReportFormat::parse("xml").is_err());
    }
}
