//! CLI binary for permit2report.
//!
//! A thin shim over the library crate that resolves the destination path,
//! runs the extraction, and prints a short summary.

use anyhow::{Context, Result};
use clap::Parser;
use permit2report::{default_output_path, extract_file, write_report};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract to the default JSON report (<input>_销售信息.json)
  permit2report saved_page.html

  # Explicit JSON destination
  permit2report saved_page.html -o report.json

  # Human-readable text summary instead of JSON
  permit2report saved_page.html -o report.txt

  # Unrecognized extensions fall back to JSON (writes report.dat.json)
  permit2report saved_page.html -o report.dat

OUTPUT FORMATS:
  .json   Pretty-printed JSON mirroring the extraction record (lossless).
  .txt    Line-oriented summary: basic info, statistics, per-unit details.
  other   Treated as JSON; '.json' is appended to the given path.

The input must be the final rendered markup (save the page from a browser);
this tool does not execute JavaScript.
"#;

/// Extract per-unit sales disclosure data from a rendered permit HTML page.
#[derive(Parser, Debug)]
#[command(
    name = "permit2report",
    version,
    about = "Extract per-unit sale and mortgage status from sales-permit HTML pages",
    long_about = "Extract structured sales-disclosure data (basic project info, per-unit \
sale/mortgage status, aggregate statistics) from a rendered commodity-housing \
sales-permit information page and write it as a JSON or text report.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Rendered HTML file exported from the disclosure portal.
    input: PathBuf,

    /// Report destination; format chosen by extension (.json / .txt).
    /// Default: input path with '_销售信息.json' appended.
    #[arg(short, long, env = "PERMIT2REPORT_OUTPUT")]
    output: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PERMIT2REPORT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PERMIT2REPORT_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if !cli.quiet {
        eprintln!("{} {}", dim("Processing"), cli.input.display());
    }

    // ── Extract ──────────────────────────────────────────────────────────
    let result = extract_file(&cli.input).context("Extraction failed")?;
    let stats = &result.statistics;

    if !cli.quiet {
        eprintln!(
            "{} {} units extracted  {}",
            green("✔"),
            bold(&stats.total.to_string()),
            dim(&format!(
                "({} sold / {} unsold / {} mortgaged)",
                stats.sold, stats.unsold, stats.mortgaged
            )),
        );
    }

    // ── Write report ─────────────────────────────────────────────────────
    // A report that fails to write is a failed run: the error propagates
    // and the process exits non-zero, unlike a plain diagnostic-and-continue.
    let dest = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));
    let written = write_report(&result, &dest).context("Failed to write report")?;

    if !cli.quiet {
        eprintln!(
            "   {}{:.2}平方米  →  {}",
            dim("total area "),
            stats.total_area,
            bold(&written.display().to_string()),
        );
    }

    Ok(())
}
