//! Executive summary scorer
//!
//! Independent batch stage: re-parses a previously rendered asciidoc
//! artifact (not live results) and computes per-category pass-rate scores
//! plus a flat attention list. It depends only on the section-marker
//! grammar documented in [`crate::report::asciidoc`]; any renderer change
//! to those markers breaks this parser, so the two are tested jointly.
//!
//! Because this stage consumes rendered text rather than typed results it
//! is strictly less reliable than the reporter; parse failures are
//! reported as [`AuditError::ReportParse`], never papered over.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{AuditError, AuditResult};
use crate::models::Status;

/// One check subsection recovered from the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEntry {
    pub name: String,
    pub status: Status,
    pub message: String,
    pub recommendations: Vec<String>,
    /// Position in the document, used as the attention-list tiebreaker.
    pub order: usize,
}

/// One category section recovered from the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCategory {
    pub name: String,
    pub entries: Vec<ParsedEntry>,
}

/// The recovered structure of a rendered report.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReport {
    pub title: String,
    pub categories: Vec<ParsedCategory>,
}

/// Read and parse a rendered asciidoc artifact.
pub fn parse_report(path: &Path) -> AuditResult<ParsedReport> {
    let text = fs::read_to_string(path)?;
    parse_document(&text).map_err(|message| AuditError::ReportParse {
        path: path.to_path_buf(),
        message,
    })
}

/// In-progress entry plus whether its `Status:` line has been seen yet.
/// The flag is tracked separately so a legitimate UNKNOWN entry is never
/// mistaken for a missing status line.
struct PendingEntry {
    entry: ParsedEntry,
    saw_status: bool,
}

fn parse_document(text: &str) -> Result<ParsedReport, String> {
    let mut title = String::new();
    let mut categories: Vec<ParsedCategory> = Vec::new();
    let mut current_category: Option<ParsedCategory> = None;
    let mut current_entry: Option<PendingEntry> = None;
    let mut in_fence = false;
    let mut in_recommendations = false;
    let mut order = 0usize;

    let mut close_entry = |category: &mut Option<ParsedCategory>,
                           entry: &mut Option<PendingEntry>|
     -> Result<(), String> {
        if let Some(pending) = entry.take() {
            if !pending.saw_status {
                // a subsection without a status line is grammar drift
                return Err(format!("entry '{}' has no status line", pending.entry.name));
            }
            category
                .as_mut()
                .expect("entry always lives inside a category")
                .entries
                .push(pending.entry);
        }
        Ok(())
    };

    for line in text.lines() {
        if line == "----" {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            // detail blocks may contain anything, including fake markers
            continue;
        }

        if let Some(rest) = line.strip_prefix("=== ") {
            if current_category.is_none() {
                return Err(format!("check subsection '{rest}' outside any category"));
            }
            close_entry(&mut current_category, &mut current_entry)?;
            in_recommendations = false;
            current_entry = Some(PendingEntry {
                entry: ParsedEntry {
                    name: rest.to_string(),
                    status: Status::Unknown,
                    message: String::new(),
                    recommendations: Vec::new(),
                    order,
                },
                saw_status: false,
            });
            order += 1;
        } else if let Some(rest) = line.strip_prefix("== ") {
            close_entry(&mut current_category, &mut current_entry)?;
            if let Some(category) = current_category.take() {
                categories.push(category);
            }
            in_recommendations = false;
            if rest != "Summary" {
                current_category = Some(ParsedCategory {
                    name: rest.to_string(),
                    entries: Vec::new(),
                });
            }
        } else if let Some(rest) = line.strip_prefix("= ") {
            title = rest.to_string();
        } else if let Some(label) = line.strip_prefix("Status: ") {
            if let Some(pending) = current_entry.as_mut() {
                pending.entry.status = Status::from_label(label)
                    .ok_or_else(|| format!("unknown status label '{label}'"))?;
                pending.saw_status = true;
            }
        } else if line.starts_with("Result key: ")
            || line.starts_with("Execution time: ")
            || line.starts_with("Generated: ")
        {
            // entry header fields the scorer does not use
        } else if line == ".Recommendations" {
            in_recommendations = true;
        } else if line.starts_with('.') {
            in_recommendations = false;
        } else if let Some(item) = line.strip_prefix("* ") {
            if in_recommendations {
                if let Some(pending) = current_entry.as_mut() {
                    pending.entry.recommendations.push(item.to_string());
                }
            }
        } else if line.starts_with('|') || line.starts_with('[') {
            // summary table rows and block attributes
        } else if !line.trim().is_empty() {
            if let Some(pending) = current_entry.as_mut() {
                if pending.entry.message.is_empty() {
                    pending.entry.message = line.trim().to_string();
                }
            }
        }
    }

    close_entry(&mut current_category, &mut current_entry)?;
    if let Some(category) = current_category.take() {
        categories.push(category);
    }

    if categories.iter().all(|c| c.entries.is_empty()) {
        return Err("no category sections found".to_string());
    }

    Ok(ParsedReport { title, categories })
}

/// Weighted pass-rate for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryScore {
    pub category: String,
    /// `100 * (ok + 0.5 * warning) / total`, clamped to [0, 100]
    pub score: f64,
    pub total: usize,
    pub ok: usize,
    pub warning: usize,
    pub critical: usize,
}

/// One non-OK entry surfaced for follow-up.
#[derive(Debug, Clone, Serialize)]
pub struct AttentionItem {
    pub category: String,
    pub name: String,
    pub status: Status,
    pub message: String,
    pub recommendations: Vec<String>,
}

/// The scored rollup of a parsed report.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreCard {
    pub cluster: String,
    pub customer: String,
    /// Mean of the category scores
    pub overall: f64,
    pub categories: Vec<CategoryScore>,
    pub attention: Vec<AttentionItem>,
}

/// Score a parsed report for the given cluster/customer labels.
pub fn score(report: &ParsedReport, cluster: &str, customer: &str) -> ScoreCard {
    let mut categories = Vec::new();
    let mut attention = Vec::new();

    for category in &report.categories {
        let total = category.entries.len();
        if total == 0 {
            continue;
        }
        let count = |status: Status| category.entries.iter().filter(|e| e.status == status).count();
        let ok = count(Status::Ok);
        let warning = count(Status::Warning);
        let critical = count(Status::Critical);
        let raw = 100.0 * (ok as f64 + 0.5 * warning as f64) / total as f64;
        categories.push(CategoryScore {
            category: category.name.clone(),
            score: raw.clamp(0.0, 100.0),
            total,
            ok,
            warning,
            critical,
        });

        for entry in &category.entries {
            if entry.status != Status::Ok {
                attention.push((entry.status, entry.order, AttentionItem {
                    category: category.name.clone(),
                    name: entry.name.clone(),
                    status: entry.status,
                    message: entry.message.clone(),
                    recommendations: entry.recommendations.clone(),
                }));
            }
        }
    }

    // Critical first, then document order.
    attention.sort_by(|(status_a, order_a, _), (status_b, order_b, _)| {
        status_b.cmp(status_a).then(order_a.cmp(order_b))
    });

    let overall = if categories.is_empty() {
        0.0
    } else {
        categories.iter().map(|c| c.score).sum::<f64>() / categories.len() as f64
    };

    ScoreCard {
        cluster: cluster.to_string(),
        customer: customer.to_string(),
        overall,
        categories,
        attention: attention.into_iter().map(|(_, _, item)| item).collect(),
    }
}

impl ScoreCard {
    /// Render the executive summary as an asciidoc document.
    pub fn render_asciidoc(&self) -> String {
        let mut out = String::new();
        writeln!(out, "= Executive Summary").unwrap();
        writeln!(out, "Cluster: {}", self.cluster).unwrap();
        writeln!(out, "Customer: {}", self.customer).unwrap();
        writeln!(out).unwrap();

        writeln!(out, "== Scores").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "[cols=\"1,1\",options=\"header\"]").unwrap();
        writeln!(out, "|===").unwrap();
        writeln!(out, "| Category | Score").unwrap();
        for category in &self.categories {
            writeln!(out, "| {} | {:.1}", category.category, category.score).unwrap();
        }
        writeln!(out, "| Overall | {:.1}", self.overall).unwrap();
        writeln!(out, "|===").unwrap();
        writeln!(out).unwrap();

        writeln!(out, "== Items requiring attention").unwrap();
        writeln!(out).unwrap();
        if self.attention.is_empty() {
            writeln!(out, "None - all checks passed.").unwrap();
            writeln!(out).unwrap();
        }
        for item in &self.attention {
            writeln!(out, "=== {} ({})", item.name, item.category).unwrap();
            writeln!(out).unwrap();
            writeln!(out, "Status: {}", item.status.label()).unwrap();
            writeln!(out).unwrap();
            writeln!(out, "{}", item.message).unwrap();
            writeln!(out).unwrap();
            if !item.recommendations.is_empty() {
                writeln!(out, ".Recommendations").unwrap();
                for recommendation in &item.recommendations {
                    writeln!(out, "* {recommendation}").unwrap();
                }
                writeln!(out).unwrap();
            }
        }

        out
    }

    /// Machine-readable form of the same rollup.
    pub fn render_json(&self) -> AuditResult<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}
