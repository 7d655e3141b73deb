//! Error types for clusteraudit
//!
//! Uses `thiserror` for library errors; `anyhow` is reserved for the
//! collaborator seam (checks and cluster access) and the CLI boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for clusteraudit operations
pub type AuditResult<T> = Result<T, AuditError>;

/// Main error type for clusteraudit operations
#[derive(Error, Debug)]
pub enum AuditError {
    /// Unknown report format requested on the CLI
    #[error("unknown report format '{format}' - expected asciidoc, html, json or summary")]
    UnknownFormat { format: String },

    /// Unknown check set requested on the CLI
    #[error("unknown check set '{set}' - expected openshift, application or all")]
    UnknownCheckSet { set: String },

    /// Category filter names a category no shipped check carries
    #[error("unknown category '{category}' - known categories: {known}")]
    UnknownCategory { category: String, known: String },

    /// Two checks were registered under the same ID
    #[error("duplicate check id '{id}' - check ids must be unique")]
    DuplicateCheck { id: String },

    /// Category filter matched no checks at all
    #[error("category filter matched no checks")]
    EmptySelection,

    /// No kubeconfig could be resolved before the run
    #[error("no cluster access: {reason}")]
    NoClusterAccess { reason: String },

    /// A rendered report could not be parsed back by the scorer
    #[error("cannot parse report {path}: {message}")]
    ReportParse { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
