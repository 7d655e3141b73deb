//! Counts-only terminal renderer
//!
//! Intended for terminal/CI display rather than file persistence. Color is
//! a presentation flag: applied only when requested and stdout is a
//! terminal.

use is_terminal::IsTerminal;

use crate::aggregator::Aggregator;
use crate::models::{CheckResult, Status};
use crate::ui::theme;

/// Print the counts rollup to stdout.
pub fn print(results: &[CheckResult], color: bool) {
    let styled = color && std::io::stdout().is_terminal();
    println!("{}", render(results, styled));
}

/// Render the rollup as plain lines (separately testable from the tty).
pub fn render(results: &[CheckResult], styled: bool) -> String {
    let aggregator = Aggregator::new(results);
    let counts = aggregator.count_by_status();

    let mut lines = Vec::new();
    lines.push(format!("Checks executed: {}", aggregator.total()));
    for status in Status::ALL.iter().rev() {
        if let Some(count) = counts.get(status) {
            let icon = theme::status_icon(*status);
            let label = format!("{icon} {}: {count}", status.label());
            lines.push(format!(
                "  {}",
                theme::paint(&label, theme::status_color(*status), styled)
            ));
        }
    }

    match aggregator.worst_status() {
        Some(Status::Critical) => lines.push("Verdict: critical findings, action required".to_string()),
        Some(Status::Warning) => lines.push("Verdict: warnings, review recommended".to_string()),
        Some(_) => lines.push("Verdict: healthy".to_string()),
        None => lines.push("Verdict: no checks executed".to_string()),
    }

    lines.join("\n")
}
