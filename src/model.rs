//! Data model for an extraction run.
//!
//! The structs here mirror the JSON report shape one-to-one: the serde
//! rename attributes carry the portal's original Chinese field labels, so
//! the emitted report reads exactly like the disclosure page it came from.
//! Rust-side names stay English for the library API.
//!
//! All types are plain owned data. The extractor builds them once per run;
//! the reporter only ever sees `&ExtractionResult`.

use serde::{Deserialize, Serialize};

/// The fixed set of recognized basic-info fields.
///
/// Label text on the page is matched against needles for these fields by
/// substring containment (see [`crate::extract::basic_info`]); anything
/// outside this set is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicField {
    ProjectName,
    Location,
    SalesArea,
    LicensedUse,
    PermitNo,
}

/// Basic project information from the description-list block at the top of
/// the page. Every field is optional — portals omit fields freely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    /// Project name (项目名称).
    #[serde(rename = "项目名称", skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    /// Property location (房屋坐落).
    #[serde(rename = "房屋坐落", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Sales area as printed, usually with a 平方米 suffix (销售面积).
    #[serde(rename = "销售面积", skip_serializing_if = "Option::is_none")]
    pub sales_area: Option<String>,

    /// Licensed use from the sales permit (销售许可证证载用途).
    #[serde(rename = "销售许可证证载用途", skip_serializing_if = "Option::is_none")]
    pub licensed_use: Option<String>,

    /// Permit number (许可证号).
    #[serde(rename = "许可证号", skip_serializing_if = "Option::is_none")]
    pub permit_no: Option<String>,
}

impl BasicInfo {
    /// Assign a field value. Later writes overwrite earlier ones, which
    /// gives the extractor its last-write-wins semantics when a page
    /// repeats a label.
    pub fn set(&mut self, field: BasicField, value: String) {
        let slot = match field {
            BasicField::ProjectName => &mut self.project_name,
            BasicField::Location => &mut self.location,
            BasicField::SalesArea => &mut self.sales_area,
            BasicField::LicensedUse => &mut self.licensed_use,
            BasicField::PermitNo => &mut self.permit_no,
        };
        *slot = Some(value);
    }

    /// True when no field was populated.
    pub fn is_empty(&self) -> bool {
        self.project_name.is_none()
            && self.location.is_none()
            && self.sales_area.is_none()
            && self.licensed_use.is_none()
            && self.permit_no.is_none()
    }
}

/// One disclosed housing unit, read positionally from a table row.
///
/// Only `unit_id` is mandatory: rows whose identifier is empty after
/// trimming are structural noise (spacer rows) and never become a
/// `UnitRecord`. The other cells are kept as the portal printed them —
/// prices and areas stay strings because the page formats vary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Unit identifier (房间号). Non-empty by construction.
    #[serde(rename = "房间号")]
    pub unit_id: String,

    /// Building area (建筑面积), e.g. "89.5平方米".
    #[serde(rename = "建筑面积", skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,

    /// Declared unit sale price (申报销售单价).
    #[serde(rename = "申报销售单价", skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// Sale status (是否出售); "已售" means sold.
    #[serde(rename = "是否出售", skip_serializing_if = "Option::is_none")]
    pub sale_status: Option<String>,

    /// Mortgage status (是否抵押); "是" means mortgaged.
    #[serde(rename = "是否抵押", skip_serializing_if = "Option::is_none")]
    pub mortgage_status: Option<String>,
}

impl UnitRecord {
    /// True when the sale-status cell says the unit is sold.
    pub fn is_sold(&self) -> bool {
        self.sale_status.as_deref() == Some(crate::extract::SOLD_VALUE)
    }

    /// True when the mortgage-status cell says the unit is mortgaged.
    pub fn is_mortgaged(&self) -> bool {
        self.mortgage_status.as_deref() == Some(crate::extract::MORTGAGED_VALUE)
    }
}

/// Aggregate statistics derived from the accepted unit sequence.
///
/// Invariants held by construction (see [`crate::extract::stats`]):
/// `unsold == total - sold` and `total` equals the unit-sequence length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Total number of accepted units (总房屋数).
    #[serde(rename = "总房屋数")]
    pub total: usize,

    /// Units marked sold (已售房屋数).
    #[serde(rename = "已售房屋数")]
    pub sold: usize,

    /// Units not marked sold (未售房屋数).
    #[serde(rename = "未售房屋数")]
    pub unsold: usize,

    /// Units marked mortgaged (抵押房屋数).
    #[serde(rename = "抵押房屋数")]
    pub mortgaged: usize,

    /// Sum of all parseable unit areas in square meters (总面积).
    /// Serialized as the portal-style string "123.45平方米".
    #[serde(rename = "总面积", with = "area_string")]
    pub total_area: f64,

    /// Wall-clock time of the extraction run (提取时间),
    /// formatted `%Y-%m-%d %H:%M:%S`.
    #[serde(rename = "提取时间")]
    pub extracted_at: String,
}

/// The root record of an extraction run, and the only artifact handed from
/// the extractor to the reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Label/content pairs from the description-list block (基本信息).
    #[serde(rename = "基本信息")]
    pub basic_info: BasicInfo,

    /// Accepted unit rows, in document order (房屋详情).
    #[serde(rename = "房屋详情")]
    pub units: Vec<UnitRecord>,

    /// Derived aggregate statistics (统计信息).
    #[serde(rename = "统计信息")]
    pub statistics: Statistics,
}

/// Serde adapter for the total-area field.
///
/// The report keeps the original tool's human-readable form — a string with
/// two decimals and the 平方米 suffix — while the in-memory value stays an
/// `f64` the statistics fold can sum into.
mod area_string {
    use serde::{Deserialize, Deserializer, Serializer};

    const SUFFIX: &str = "平方米";

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value:.2}{SUFFIX}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let s = String::deserialize(deserializer)?;
        let trimmed = s.strip_suffix(SUFFIX).unwrap_or(&s).trim();
        trimmed.parse::<f64>().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_statistics() -> Statistics {
        Statistics {
            total: 2,
            sold: 1,
            unsold: 1,
            mortgaged: 1,
            total_area: 210.25,
            extracted_at: "2024-06-01 10:30:00".to_string(),
        }
    }

    #[test]
    fn basic_info_set_overwrites() {
        let mut info = BasicInfo::default();
        info.set(BasicField::ProjectName, "first".into());
        info.set(BasicField::ProjectName, "second".into());
        assert_eq!(info.project_name.as_deref(), Some("second"));
    }

    #[test]
    fn basic_info_absent_fields_not_serialized() {
        let mut info = BasicInfo::default();
        info.set(BasicField::PermitNo, "许字第001号".into());
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("许可证号"));
        assert!(!json.contains("项目名称"));
    }

    #[test]
    fn total_area_serializes_with_unit_suffix() {
        let json = serde_json::to_string(&sample_statistics()).unwrap();
        assert!(json.contains("210.25平方米"), "got: {json}");
    }

    #[test]
    fn statistics_round_trip() {
        let stats = sample_statistics();
        let json = serde_json::to_string(&stats).unwrap();
        let back: Statistics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn extraction_result_round_trip() {
        let result = ExtractionResult {
            basic_info: BasicInfo {
                project_name: Some("阳光花园".into()),
                ..BasicInfo::default()
            },
            units: vec![UnitRecord {
                unit_id: "1-101".into(),
                area: Some("89.5平方米".into()),
                price: Some("12000元/平方米".into()),
                sale_status: Some("已售".into()),
                mortgage_status: Some("否".into()),
            }],
            statistics: Statistics {
                total: 1,
                sold: 1,
                unsold: 0,
                mortgaged: 0,
                total_area: 89.5,
                extracted_at: "2024-06-01 10:30:00".into(),
            },
        };

        let json = serde_json::to_string_pretty(&result).unwrap();
        // Pretty JSON must keep the Chinese labels literal, not \u-escaped.
        assert!(json.contains("基本信息"));
        assert!(json.contains("阳光花园"));

        let back: ExtractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn unit_record_status_predicates() {
        let sold = UnitRecord {
            unit_id: "1-101".into(),
            sale_status: Some("已售".into()),
            mortgage_status: Some("是".into()),
            ..UnitRecord::default()
        };
        assert!(sold.is_sold());
        assert!(sold.is_mortgaged());

        let unsold = UnitRecord {
            unit_id: "1-102".into(),
            sale_status: Some("未售".into()),
            mortgage_status: Some("否".into()),
            ..UnitRecord::default()
        };
        assert!(!unsold.is_sold());
        assert!(!unsold.is_mortgaged());

        // Missing status cells count as neither sold nor mortgaged.
        let bare = UnitRecord {
            unit_id: "1-103".into(),
            ..UnitRecord::default()
        };
        assert!(!bare.is_sold());
        assert!(!bare.is_mortgaged());
    }
}
