//! Reporter: serialize an [`ExtractionResult`] to a destination file.
//!
//! Two encodings exist. JSON is the canonical, lossless one — pretty
//! printed with the Chinese wire keys emitted literally (no `\u` escapes),
//! so the report stays readable next to the portal page it came from. The
//! text layout is a one-way human summary and is never reparsed.
//!
//! Format selection follows the destination extension; anything
//! unrecognized falls back to JSON with `.json` appended to the path
//! rather than failing the run.

use crate::error::ExtractError;
use crate::model::{BasicInfo, ExtractionResult, UnitRecord};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Localized filename label appended when deriving the default output path.
const DEFAULT_OUTPUT_LABEL: &str = "_销售信息";

/// Report encoding, selected by destination file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Pretty-printed JSON mirroring [`ExtractionResult`] exactly.
    Json,
    /// Line-oriented human-readable summary.
    Text,
}

impl ReportFormat {
    /// Detect the format from a destination path's extension
    /// (case-insensitive). `None` for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(ReportFormat::Json),
            "txt" => Some(ReportFormat::Text),
            _ => None,
        }
    }

    /// Conventional file extension for this format.
    pub const fn extension(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Text => "txt",
        }
    }
}

/// Resolve the requested destination into the path actually written and
/// the format used. Unknown extensions get `.json` appended — the caller's
/// name is preserved, never replaced.
pub fn resolve_destination(path: &Path) -> (PathBuf, ReportFormat) {
    match ReportFormat::from_path(path) {
        Some(format) => (path.to_path_buf(), format),
        None => {
            let mut with_ext = path.as_os_str().to_os_string();
            with_ext.push(".json");
            debug!(
                "No recognized extension on {}, defaulting to JSON",
                path.display()
            );
            (PathBuf::from(with_ext), ReportFormat::Json)
        }
    }
}

/// Default destination for an input file: extension stripped, localized
/// label appended, `.json` extension.
///
/// `export/page.html` → `export/page_销售信息.json`
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut base = input.with_extension("").into_os_string();
    base.push(DEFAULT_OUTPUT_LABEL);
    base.push(".json");
    PathBuf::from(base)
}

/// Serialize the result as pretty JSON. Non-ASCII content is emitted
/// literally (serde_json never escapes it).
pub fn to_json(result: &ExtractionResult) -> Result<String, ExtractError> {
    serde_json::to_string_pretty(result).map_err(|e| ExtractError::SerializeFailed { source: e })
}

/// Render the line-oriented text report.
pub fn render_text(result: &ExtractionResult) -> String {
    let mut out = String::new();

    out.push_str("房屋销售信息提取报告\n");
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");

    out.push_str("基本信息:\n");
    out.push_str(&"-".repeat(20));
    out.push('\n');
    for (key, value) in basic_info_lines(&result.basic_info) {
        let _ = writeln!(out, "{key}: {value}");
    }
    out.push('\n');

    out.push_str("统计信息:\n");
    out.push_str(&"-".repeat(20));
    out.push('\n');
    let stats = &result.statistics;
    let _ = writeln!(out, "总房屋数: {}", stats.total);
    let _ = writeln!(out, "已售房屋数: {}", stats.sold);
    let _ = writeln!(out, "未售房屋数: {}", stats.unsold);
    let _ = writeln!(out, "抵押房屋数: {}", stats.mortgaged);
    let _ = writeln!(out, "总面积: {:.2}平方米", stats.total_area);
    let _ = writeln!(out, "提取时间: {}", stats.extracted_at);
    out.push('\n');

    out.push_str("房屋详情:\n");
    out.push_str(&"-".repeat(20));
    out.push('\n');
    for (i, unit) in result.units.iter().enumerate() {
        let _ = writeln!(out, "房屋 {}:", i + 1);
        for (key, value) in unit_lines(unit) {
            let _ = writeln!(out, "  {key}: {value}");
        }
        out.push('\n');
    }

    out
}

/// Write the report to `dest`, returning the path actually written (which
/// gains a `.json` suffix when the requested extension was unrecognized).
///
/// The write is atomic — content lands in a sibling temp file first and is
/// renamed into place, so a failed run never leaves a truncated report.
pub fn write_report(
    result: &ExtractionResult,
    dest: &Path,
) -> Result<PathBuf, ExtractError> {
    let (path, format) = resolve_destination(dest);

    let body = match format {
        ReportFormat::Json => {
            let mut json = to_json(result)?;
            json.push('\n');
            json
        }
        ReportFormat::Text => render_text(result),
    };

    let write_err = |source: std::io::Error| ExtractError::OutputWriteFailed {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(&write_err)?;
    }

    let tmp_path = path.with_extension(format!("{}.tmp", format.extension()));
    std::fs::write(&tmp_path, &body).map_err(&write_err)?;
    std::fs::rename(&tmp_path, &path).map_err(&write_err)?;

    info!("Report written to {} ({:?})", path.display(), format);
    Ok(path)
}

/// Present basic-info fields in declaration order, wire keys included.
fn basic_info_lines<'a>(info: &'a BasicInfo) -> Vec<(&'static str, &'a str)> {
    let mut lines = Vec::new();
    let mut push = |key, value: &'a Option<String>| {
        if let Some(v) = value.as_deref() {
            lines.push((key, v));
        }
    };
    push("项目名称", &info.project_name);
    push("房屋坐落", &info.location);
    push("销售面积", &info.sales_area);
    push("销售许可证证载用途", &info.licensed_use);
    push("许可证号", &info.permit_no);
    lines
}

/// Present unit fields in column order; absent cells are simply not listed.
fn unit_lines<'a>(unit: &'a UnitRecord) -> Vec<(&'static str, &'a str)> {
    let mut lines = vec![("房间号", unit.unit_id.as_str())];
    let mut push = |key, value: &'a Option<String>| {
        if let Some(v) = value.as_deref() {
            lines.push((key, v));
        }
    };
    push("建筑面积", &unit.area);
    push("申报销售单价", &unit.price);
    push("是否出售", &unit.sale_status);
    push("是否抵押", &unit.mortgage_status);
    lines
}
