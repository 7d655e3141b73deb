//! Report generation
//!
//! Dispatches on [`ReportFormat`] to one of four renderers. Renderers only
//! consume the aggregator's views, so nothing about rendering depends on
//! execution order or timing beyond the `execution_time` field embedded in
//! each result.
//!
//! Generation is idempotent: identical results and config (with
//! `include_timestamp = false`) produce byte-identical artifacts.

pub mod asciidoc;
pub mod html;
pub mod json;
pub mod summary;

use std::fs;
use std::path::PathBuf;

use crate::error::AuditResult;
use crate::models::{CheckResult, ReportConfig, ReportFormat};

/// Renders an aggregate of results into a persisted artifact.
pub struct Reporter<'a> {
    results: &'a [CheckResult],
    config: &'a ReportConfig,
}

impl<'a> Reporter<'a> {
    pub fn new(results: &'a [CheckResult], config: &'a ReportConfig) -> Self {
        Reporter { results, config }
    }

    /// Render and persist the artifact. Returns the artifact path, or
    /// `None` for the terminal-only summary format.
    pub fn generate(&self) -> AuditResult<Option<PathBuf>> {
        let content = match self.config.format {
            ReportFormat::Asciidoc => asciidoc::render(self.results, self.config),
            ReportFormat::Html => html::render(self.results, self.config),
            ReportFormat::Json => json::render(self.results)?,
            ReportFormat::Summary => {
                summary::print(self.results, self.config.color);
                return Ok(None);
            }
        };

        fs::create_dir_all(&self.config.output_dir)?;
        let path = self.config.output_dir.join(self.artifact_filename());
        fs::write(&path, content)?;
        Ok(Some(path))
    }

    /// `{stem}-{timestamp}.{ext}` when timestamps are on, `{stem}.{ext}`
    /// otherwise.
    fn artifact_filename(&self) -> String {
        let extension = self
            .config
            .format
            .extension()
            .expect("persisted formats have an extension");
        if self.config.include_timestamp {
            let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            format!("{}-{}.{}", self.config.filename, stamp, extension)
        } else {
            format!("{}.{}", self.config.filename, extension)
        }
    }
}
