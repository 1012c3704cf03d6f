//! # permit2report
//!
//! Extract structured sales-disclosure data from rendered commodity-housing
//! sales-permit HTML pages and emit it as a JSON or plain-text report.
//!
//! ## Why this crate?
//!
//! Provincial disclosure portals publish per-unit sale and mortgage status
//! as framework-rendered HTML (Element-UI description lists and tables)
//! with no export button and no API. Saving the rendered page and running
//! it through this crate turns that markup into a machine-readable record —
//! tolerant of missing fields, reordered labels, and the spacer rows these
//! pages are full of.
//!
//! ## Pipeline Overview
//!
//! ```text
//! HTML
//!  │
//!  ├─ 1. Resolve   existence / permission / UTF-8 checks
//!  ├─ 2. Extract   label/content pairs + positional unit rows (scraper)
//!  ├─ 3. Derive    sold/unsold/mortgaged counts, total area
//!  └─ 4. Report    pretty JSON (lossless) or text summary (one-way)
//! ```
//!
//! The whole transform is synchronous and single-pass; the document is
//! small and loaded wholly into memory.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use permit2report::{extract_file, write_report};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let result = extract_file("disclosure_page.html")?;
//!     println!("{} units, {} sold", result.statistics.total, result.statistics.sold);
//!     let written = write_report(&result, Path::new("report.json"))?;
//!     println!("report at {}", written.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `permit2report` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! permit2report = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod error;
pub mod extract;
pub mod model;
pub mod report;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use error::ExtractError;
pub use extract::{extract_file, extract_html};
pub use model::{BasicField, BasicInfo, ExtractionResult, Statistics, UnitRecord};
pub use report::{default_output_path, render_text, to_json, write_report, ReportFormat};
