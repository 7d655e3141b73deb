//! Structured-document renderer (asciidoc)
//!
//! The default, shareable artifact. The section markers emitted here are a
//! contract: the executive summary scorer recovers categories, statuses,
//! messages and recommendations by re-parsing exactly this grammar.
//! Changing any marker is a breaking change for [`crate::scorer`] and the
//! two are tested jointly.
//!
//! Grammar, per document:
//!   `= {title}`                        document title
//!   `== Summary`                       counts table (skipped by the scorer)
//!   `== {category}`                    one section per category
//!   `=== {check name}`                 one subsection per check
//!   `Status: {LABEL}`                  uppercase status badge
//!   `Result key: {key}`
//!   `Execution time: {duration}`
//!   `{message}`                        single plain paragraph
//!   `.Recommendations` + `* {item}`    optional block
//!   `.Detail` + `----` fenced block    optional, gated by include_details

use std::fmt::Write;

use crate::aggregator::Aggregator;
use crate::models::{CheckResult, ReportConfig, Status};

pub fn render(results: &[CheckResult], config: &ReportConfig) -> String {
    let aggregator = Aggregator::new(results);
    let mut out = String::new();

    writeln!(out, "= {}", config.title).unwrap();
    if config.include_timestamp {
        writeln!(out, "Generated: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")).unwrap();
    }
    writeln!(out).unwrap();

    render_summary_section(&mut out, &aggregator);

    if config.group_by_category {
        for (category, bucket) in aggregator.results_by_category() {
            writeln!(out, "== {category}").unwrap();
            writeln!(out).unwrap();
            for result in bucket {
                render_entry(&mut out, result, config.include_details);
            }
        }
    } else {
        writeln!(out, "== Results").unwrap();
        writeln!(out).unwrap();
        for result in results {
            render_entry(&mut out, result, config.include_details);
        }
    }

    out
}

fn render_summary_section(out: &mut String, aggregator: &Aggregator) {
    let counts = aggregator.count_by_status();

    writeln!(out, "== Summary").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "[cols=\"1,1\",options=\"header\"]").unwrap();
    writeln!(out, "|===").unwrap();
    writeln!(out, "| Status | Count").unwrap();
    for status in Status::ALL.iter().rev() {
        if let Some(count) = counts.get(status) {
            writeln!(out, "| {} | {}", status.label(), count).unwrap();
        }
    }
    writeln!(out, "| Total | {}", aggregator.total()).unwrap();
    writeln!(out, "|===").unwrap();
    writeln!(out).unwrap();
}

fn render_entry(out: &mut String, result: &CheckResult, include_details: bool) {
    writeln!(out, "=== {}", result.check_name).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Status: {}", result.status.label()).unwrap();
    writeln!(out, "Result key: {}", result.result_key).unwrap();
    writeln!(out, "Execution time: {}", result.execution_time).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "{}", result.message).unwrap();
    writeln!(out).unwrap();

    if !result.recommendations.is_empty() {
        writeln!(out, ".Recommendations").unwrap();
        for recommendation in &result.recommendations {
            writeln!(out, "* {recommendation}").unwrap();
        }
        writeln!(out).unwrap();
    }

    if include_details {
        if let Some(detail) = &result.detail {
            writeln!(out, ".Detail").unwrap();
            writeln!(out, "----").unwrap();
            writeln!(out, "{detail}").unwrap();
            writeln!(out, "----").unwrap();
            writeln!(out).unwrap();
        }
    }
}
