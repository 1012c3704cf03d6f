//! Extraction pipeline: raw HTML text → [`ExtractionResult`].
//!
//! The pipeline is a synchronous, single-pass transform with three stages,
//! each in its own module:
//!
//! ```text
//! HTML file
//!  │
//!  ├─ 1. resolve   existence / permission / UTF-8 checks
//!  ├─ 2. parse     scraper document tree (lenient, never fails)
//!  ├─ 3. basic_info  label/content pairs + title fallback
//!  ├─ 4. units       positional table-row extraction
//!  └─ 5. stats       aggregate counts and summed area
//! ```
//!
//! The contract is all-or-nothing: any I/O problem fails the whole run with
//! an [`ExtractError`]; a readable document always yields a complete
//! result, with absent fields carried as `None` rather than errors.

pub mod basic_info;
pub mod stats;
pub mod units;

use crate::error::ExtractError;
use crate::model::ExtractionResult;
use scraper::Html;
use std::path::Path;
use tracing::{debug, info};

/// Sale-status cell value that marks a unit as sold.
pub const SOLD_VALUE: &str = "已售";

/// Mortgage-status cell value that marks a unit as mortgaged.
pub const MORTGAGED_VALUE: &str = "是";

/// Unit-of-measure suffix stripped before numeric area parsing.
pub const AREA_UNIT_SUFFIX: &str = "平方米";

/// Fixed phrase the portal appends to page titles; stripping it yields the
/// project name when no explicit label is present.
pub const TITLE_SUFFIX: &str = "商品房销售许可证信息";

/// Extract a sales-disclosure record from an HTML file on disk.
///
/// # Errors
/// Returns `Err(ExtractError)` when the file is missing, unreadable, or not
/// UTF-8. A file that reads successfully always produces `Ok` — even an
/// empty document yields a result with no fields and zero units.
pub fn extract_file(path: impl AsRef<Path>) -> Result<ExtractionResult, ExtractError> {
    let path = path.as_ref();
    let html = read_input(path)?;
    info!("Read {} bytes from {}", html.len(), path.display());
    Ok(extract_html(&html))
}

/// Extract a sales-disclosure record from already-loaded HTML text.
///
/// Parsing is lenient (browsers accept anything; so does [`scraper`]), so
/// this stage cannot fail — missing structure simply produces empty output.
pub fn extract_html(html: &str) -> ExtractionResult {
    let document = Html::parse_document(html);

    let basic_info = basic_info::extract(&document);
    debug!(
        "Basic info extracted (project name: {:?})",
        basic_info.project_name
    );

    let units = units::extract(&document);
    let statistics = stats::derive(&units);
    info!(
        "Extracted {} units ({} sold, {} mortgaged)",
        statistics.total, statistics.sold, statistics.mortgaged
    );

    ExtractionResult {
        basic_info,
        units,
        statistics,
    }
}

/// Read the input file, mapping I/O failures to the precise error variant.
fn read_input(path: &Path) -> Result<String, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(ExtractError::PermissionDenied {
                path: path.to_path_buf(),
            })
        }
        // read_to_string reports non-UTF-8 bytes as InvalidData.
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            Err(ExtractError::InvalidEncoding {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(ExtractError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Concatenated, per-fragment-trimmed text of an element, matching how the
/// portal's nested spans render on screen.
pub(crate) fn element_text(el: scraper::ElementRef<'_>) -> String {
    el.text().map(str::trim).collect::<String>()
}
