//! clusteraudit CLI - batch cluster audit tool
//!
//! Usage: clusteraudit <COMMAND>
//!
//! Commands:
//!   run      Execute the check set against the cluster and render a report
//!   summary  Re-parse a rendered report into a scored executive summary

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use clusteraudit::models::{Category, CheckSet, ReportConfig, ReportFormat, RunConfig};
use clusteraudit::report::summary;
use clusteraudit::ui::progress::ProgressBar;
use clusteraudit::{checks, scorer, AuditError, OcAccessor, Reporter, RunState, Runner};

/// clusteraudit - run diagnostic checks against a cluster and report
#[derive(Parser, Debug)]
#[command(name = "clusteraudit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute the check set against the cluster and render a report
    Run {
        /// Check set to execute
        #[arg(long, default_value = "all")]
        checks: String,

        /// Directory for the report artifact
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Report format (asciidoc, html, json, summary)
        #[arg(short, long, default_value = "asciidoc")]
        format: String,

        /// Include long-form detail blocks in the report
        #[arg(long)]
        details: bool,

        /// Dispatch checks as parallel tasks
        #[arg(short, long)]
        parallel: bool,

        /// Per-check timeout in seconds (0 = unbounded)
        #[arg(short, long, default_value_t = 0)]
        timeout: u64,

        /// Show a progress bar while checks run
        #[arg(long)]
        progress: bool,

        /// Only run checks in these categories (repeatable or comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        category: Vec<String>,

        /// Stop dispatching checks after the first critical result
        #[arg(long)]
        fail_fast: bool,

        /// Echo per-check diagnostics to stderr
        #[arg(short, long)]
        verbose: bool,

        /// Report title
        #[arg(long, default_value = "Cluster Audit Report")]
        title: String,

        /// Append a timestamp to the artifact filename
        #[arg(long)]
        timestamp: bool,

        /// Disable colored summary output
        #[arg(long)]
        no_color: bool,
    },

    /// Re-parse a rendered report into a scored executive summary
    Summary {
        /// Path to a previously rendered asciidoc report
        report: PathBuf,

        /// Cluster label for the summary header
        #[arg(long)]
        cluster: String,

        /// Customer label for the summary header
        #[arg(long)]
        customer: String,

        /// Directory for the summary artifact
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Summary format (asciidoc, json)
        #[arg(short, long, default_value = "asciidoc")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            checks,
            output_dir,
            format,
            details,
            parallel,
            timeout,
            progress,
            category,
            fail_fast,
            verbose,
            title,
            timestamp,
            no_color,
        } => cmd_run(RunArgs {
            checks,
            output_dir,
            format,
            details,
            parallel,
            timeout,
            progress,
            category,
            fail_fast,
            verbose,
            title,
            timestamp,
            no_color,
        }),
        Commands::Summary {
            report,
            cluster,
            customer,
            output_dir,
            format,
        } => cmd_summary(&report, &cluster, &customer, &output_dir, &format),
    }
}

struct RunArgs {
    checks: String,
    output_dir: PathBuf,
    format: String,
    details: bool,
    parallel: bool,
    timeout: u64,
    progress: bool,
    category: Vec<String>,
    fail_fast: bool,
    verbose: bool,
    title: String,
    timestamp: bool,
    no_color: bool,
}

fn cmd_run(args: RunArgs) -> Result<()> {
    // Configuration validation comes first: these failures must be
    // reportable without any cluster access.
    let format = ReportFormat::parse(&args.format)?;
    let set = CheckSet::parse(&args.checks)?;
    let categories: Vec<Category> = args.category.iter().map(|c| Category::from(c.as_str())).collect();
    checks::validate_categories(&categories)?;

    let registry = checks::build_registry(set)?;
    let selected = registry.filter(&categories);
    if selected.is_empty() {
        return Err(AuditError::EmptySelection.into());
    }

    // Missing credentials are fatal before any check is dispatched.
    let kubeconfig = clusteraudit::resolve_kubeconfig()?;
    let accessor = Arc::new(OcAccessor::new(kubeconfig));

    let quiet = format == ReportFormat::Summary;
    if !quiet {
        println!("🔍 Cluster Audit");
        println!("Checks: {} selected of {}", selected.len(), registry.len());
        if args.parallel {
            println!("Mode: parallel");
        }
        if args.fail_fast {
            println!("Mode: fail-fast");
        }
    }

    let run_config = RunConfig {
        output_dir: args.output_dir.clone(),
        categories,
        timeout: Duration::from_secs(args.timeout),
        parallel: args.parallel,
        fail_fast: args.fail_fast,
        verbose: args.verbose,
    };

    let mut runner = Runner::new(selected, run_config, accessor);
    let outcome = if args.progress {
        let mut bar = ProgressBar::new(runner.check_count());
        let outcome = runner.run_with_progress(|result| bar.tick(&result.check_name));
        bar.finish();
        outcome
    } else {
        runner.run()
    };

    if outcome.state == RunState::Aborted {
        eprintln!("run aborted after a critical result (fail-fast)");
    }

    let report_config = ReportConfig {
        format,
        output_dir: args.output_dir,
        filename: "cluster-report".to_string(),
        include_timestamp: args.timestamp,
        include_details: args.details,
        title: args.title,
        group_by_category: true,
        color: !args.no_color,
    };

    match Reporter::new(&outcome.results, &report_config).generate() {
        Ok(Some(path)) => {
            if !quiet {
                println!("✓ Report written: {}", path.display());
            }
        }
        Ok(None) => {} // summary already printed
        Err(error) => {
            // Do not discard the run: surface the counts before failing.
            summary::print(&outcome.results, !args.no_color);
            return Err(error.into());
        }
    }

    // Critical findings live in the report, not the exit status.
    Ok(())
}

fn cmd_summary(
    report: &PathBuf,
    cluster: &str,
    customer: &str,
    output_dir: &PathBuf,
    format: &str,
) -> Result<()> {
    let parsed = scorer::parse_report(report)?;
    let card = scorer::score(&parsed, cluster, customer);

    let (content, extension) = match format {
        "asciidoc" => (card.render_asciidoc(), "adoc"),
        "json" => (card.render_json()?, "json"),
        other => {
            return Err(AuditError::UnknownFormat {
                format: other.to_string(),
            }
            .into())
        }
    };

    let stem = report
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{stem}-summary.{extension}"));
    std::fs::write(&path, content)?;

    println!("✓ Executive summary written: {}", path.display());
    println!("Overall score: {:.1}", card.overall);
    for category in &card.categories {
        println!("  {}: {:.1}", category.category, category.score);
    }

    Ok(())
}
