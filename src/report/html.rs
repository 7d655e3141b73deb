//! Web-markup renderer
//!
//! Same logical structure as the asciidoc document, translated to nested
//! markup with status-colored badges. Self-contained: the stylesheet is
//! embedded, no external assets.

use std::fmt::Write;

use crate::aggregator::Aggregator;
use crate::models::{CheckResult, ReportConfig, Status};

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em auto; max-width: 60em; color: #1f2937; }\n\
h2 { border-bottom: 1px solid #d1d5db; padding-bottom: 0.2em; }\n\
.badge { display: inline-block; padding: 0.1em 0.6em; border-radius: 0.3em; color: #fff; font-size: 0.85em; }\n\
.badge.ok { background: #22c55e; }\n\
.badge.warning { background: #f59e0b; }\n\
.badge.critical { background: #ef4444; }\n\
.badge.unknown { background: #6b7280; }\n\
.badge.not_applicable { background: #9ca3af; }\n\
table { border-collapse: collapse; }\n\
td, th { border: 1px solid #d1d5db; padding: 0.3em 0.8em; }\n\
pre.detail { background: #f3f4f6; padding: 0.8em; overflow-x: auto; }\n\
ul.recommendations { margin-top: 0.3em; }\n\
p.meta { color: #6b7280; font-size: 0.85em; }\n";

fn badge_class(status: Status) -> &'static str {
    match status {
        Status::Ok => "ok",
        Status::Warning => "warning",
        Status::Critical => "critical",
        Status::Unknown => "unknown",
        Status::NotApplicable => "not_applicable",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn render(results: &[CheckResult], config: &ReportConfig) -> String {
    let aggregator = Aggregator::new(results);
    let mut out = String::new();

    writeln!(out, "<!DOCTYPE html>").unwrap();
    writeln!(out, "<html><head><meta charset=\"utf-8\">").unwrap();
    writeln!(out, "<title>{}</title>", escape(&config.title)).unwrap();
    writeln!(out, "<style>\n{STYLE}</style></head><body>").unwrap();
    writeln!(out, "<h1>{}</h1>", escape(&config.title)).unwrap();
    if config.include_timestamp {
        writeln!(
            out,
            "<p class=\"meta\">Generated: {}</p>",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )
        .unwrap();
    }

    writeln!(out, "<h2>Summary</h2>").unwrap();
    writeln!(out, "<table><tr><th>Status</th><th>Count</th></tr>").unwrap();
    let counts = aggregator.count_by_status();
    for status in Status::ALL.iter().rev() {
        if let Some(count) = counts.get(status) {
            writeln!(
                out,
                "<tr><td><span class=\"badge {}\">{}</span></td><td>{}</td></tr>",
                badge_class(*status),
                status.label(),
                count
            )
            .unwrap();
        }
    }
    writeln!(out, "<tr><td>Total</td><td>{}</td></tr></table>", aggregator.total()).unwrap();

    if config.group_by_category {
        for (category, bucket) in aggregator.results_by_category() {
            writeln!(out, "<h2>{}</h2>", escape(category.as_str())).unwrap();
            for result in bucket {
                render_entry(&mut out, result, config.include_details);
            }
        }
    } else {
        writeln!(out, "<h2>Results</h2>").unwrap();
        for result in results {
            render_entry(&mut out, result, config.include_details);
        }
    }

    writeln!(out, "</body></html>").unwrap();
    out
}

fn render_entry(out: &mut String, result: &CheckResult, include_details: bool) {
    writeln!(out, "<h3>{}</h3>", escape(&result.check_name)).unwrap();
    writeln!(
        out,
        "<p><span class=\"badge {}\">{}</span> {}</p>",
        badge_class(result.status),
        result.status.label(),
        escape(&result.message)
    )
    .unwrap();
    writeln!(
        out,
        "<p class=\"meta\">Result key: {} · Execution time: {}</p>",
        result.result_key,
        escape(&result.execution_time)
    )
    .unwrap();

    if !result.recommendations.is_empty() {
        writeln!(out, "<ul class=\"recommendations\">").unwrap();
        for recommendation in &result.recommendations {
            writeln!(out, "<li>{}</li>", escape(recommendation)).unwrap();
        }
        writeln!(out, "</ul>").unwrap();
    }

    if include_details {
        if let Some(detail) = &result.detail {
            writeln!(out, "<pre class=\"detail\">{}</pre>", escape(detail)).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn sample() -> Vec<CheckResult> {
        vec![
            CheckResult::new("a", "Alpha", Category::from("Cluster"), Status::Ok, "healthy"),
            CheckResult::new(
                "b",
                "Beta <&>",
                Category::from("Security"),
                Status::Critical,
                "bad <script>",
            )
            .with_recommendation("fix & verify"),
        ]
    }

    #[test]
    fn renders_badges_and_sections() {
        let doc = render(&sample(), &ReportConfig::default());
        assert!(doc.contains("<h2>Cluster</h2>"));
        assert!(doc.contains("<h2>Security</h2>"));
        assert!(doc.contains("class=\"badge critical\""));
        assert!(doc.contains("class=\"badge ok\""));
    }

    #[test]
    fn escapes_markup_in_user_text() {
        let doc = render(&sample(), &ReportConfig::default());
        assert!(doc.contains("Beta &lt;&amp;&gt;"));
        assert!(doc.contains("bad &lt;script&gt;"));
        assert!(doc.contains("fix &amp; verify"));
        assert!(!doc.contains("bad <script>"));
    }

    #[test]
    fn detail_gated_by_config() {
        let results = vec![CheckResult::new(
            "a",
            "Alpha",
            Category::from("Cluster"),
            Status::Ok,
            "fine",
        )
        .with_detail("dump")];

        let without = render(&results, &ReportConfig::default());
        assert!(!without.contains("pre class=\"detail\""));

        let config = ReportConfig {
            include_details: true,
            ..ReportConfig::default()
        };
        assert!(render(&results, &config).contains("<pre class=\"detail\">dump</pre>"));
    }
}
