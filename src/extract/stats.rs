//! Statistics derivation: one fold over the accepted unit sequence.
//!
//! Both record invariants are established here by construction — `total`
//! is the sequence length and `unsold` is computed as `total - sold`, so
//! no caller can observe a record where the counts disagree.

use crate::extract::units::parse_area;
use crate::model::{Statistics, UnitRecord};
use chrono::Local;

/// Timestamp layout used in the 提取时间 field.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Derive aggregate statistics from the accepted units, stamped with the
/// current wall-clock time.
pub fn derive(units: &[UnitRecord]) -> Statistics {
    derive_at(units, Local::now().format(TIMESTAMP_FORMAT).to_string())
}

/// Same as [`derive`] with an explicit timestamp, so tests can assert on
/// the full record.
pub fn derive_at(units: &[UnitRecord], extracted_at: String) -> Statistics {
    let total = units.len();
    let sold = units.iter().filter(|u| u.is_sold()).count();
    let mortgaged = units.iter().filter(|u| u.is_mortgaged()).count();

    // Unparsable areas contribute zero rather than failing the run.
    let total_area: f64 = units
        .iter()
        .filter_map(|u| u.area.as_deref())
        .map(|a| parse_area(a).unwrap_or(0.0))
        .sum();

    Statistics {
        total,
        sold,
        unsold: total - sold,
        mortgaged,
        total_area,
        extracted_at,
    }
}
