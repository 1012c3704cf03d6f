//! Unit-table extraction: one [`UnitRecord`] per qualifying table row.
//!
//! Rows are interpreted positionally — the portal's table carries no
//! machine-readable headers, so cell meaning is fixed by column index:
//! `[unit id, area, price, sale status, mortgage status]`. A row qualifies
//! only with at least five marker cells; header, footer, and spacer rows
//! all fall short of that and are skipped whole, never partially kept.

use crate::extract::{element_text, AREA_UNIT_SUFFIX};
use crate::model::UnitRecord;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr.el-table__row").unwrap());

static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td.el-table__cell").unwrap());

static CELL_WRAPPER_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div.cell").unwrap());

/// Number of positional cells a data row must provide.
const MIN_CELLS: usize = 5;

/// Extract all qualifying unit rows from a parsed document, in document
/// order.
pub fn extract(document: &Html) -> Vec<UnitRecord> {
    document
        .select(&ROW_SELECTOR)
        .filter_map(parse_row)
        .collect()
}

/// Interpret one table row. Returns `None` for non-data rows (fewer than
/// [`MIN_CELLS`] cells) and for rows whose unit id is blank.
fn parse_row(row: ElementRef<'_>) -> Option<UnitRecord> {
    let cells: Vec<ElementRef<'_>> = row.select(&CELL_SELECTOR).collect();
    if cells.len() < MIN_CELLS {
        debug!("Skipping row with {} cells (need {MIN_CELLS})", cells.len());
        return None;
    }

    let unit_id = cell_value(cells[0]).unwrap_or_default();
    if unit_id.is_empty() {
        debug!("Dropping spacer row with blank unit id");
        return None;
    }

    Some(UnitRecord {
        unit_id,
        area: cell_value(cells[1]),
        price: cell_value(cells[2]),
        sale_status: cell_value(cells[3]),
        mortgage_status: cell_value(cells[4]),
    })
}

/// Trimmed text of the cell's content wrapper. `None` when the wrapper is
/// absent — the field is then omitted from the record, not an error.
fn cell_value(cell: ElementRef<'_>) -> Option<String> {
    cell.select(&CELL_WRAPPER_SELECTOR)
        .next()
        .map(element_text)
}

/// Parse an area string like "89.5平方米" or "120.00" into square meters.
///
/// Strips one unit suffix if present and parses the remainder. Unparsable
/// text yields `None`; the statistics fold maps that to a 0.0 contribution
/// so one bad cell never aborts a run.
pub fn parse_area(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix(AREA_UNIT_SUFFIX).unwrap_or(trimmed);
    number.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(rows: &str) -> Html {
        Html::parse_document(&format!(
            "<html><body><table><tbody>{rows}</tbody></table></body></html>"
        ))
    }

    fn row(cells: &[&str]) -> String {
        let tds: String = cells
            .iter()
            .map(|c| format!(r#"<td class="el-table__cell"><div class="cell">{c}</div></td>"#))
            .collect();
        format!(r#"<tr class="el-table__row">{tds}</tr>"#)
    }

    #[test]
    fn extracts_positional_fields() {
        let html = doc(&row(&["1-101", "89.5平方米", "12000元", "已售", "是"]));
        let units = extract(&html);
        assert_eq!(units.len(), 1);

        let unit = &units[0];
        assert_eq!(unit.unit_id, "1-101");
        assert_eq!(unit.area.as_deref(), Some("89.5平方米"));
        assert_eq!(unit.price.as_deref(), Some("12000元"));
        assert_eq!(unit.sale_status.as_deref(), Some("已售"));
        assert_eq!(unit.mortgage_status.as_deref(), Some("是"));
    }

    #[test]
    fn four_cell_row_is_dropped_entirely() {
        let html = doc(&row(&["1-101", "89.5平方米", "12000元", "已售"]));
        assert!(extract(&html).is_empty());
    }

    #[test]
    fn blank_unit_id_row_is_dropped() {
        let html = doc(&row(&["   ", "89.5平方米", "12000元", "已售", "是"]));
        assert!(extract(&html).is_empty());
    }

    #[test]
    fn missing_cell_wrapper_omits_field() {
        let rows = r#"<tr class="el-table__row">
            <td class="el-table__cell"><div class="cell">2-203</div></td>
            <td class="el-table__cell"></td>
            <td class="el-table__cell"><div class="cell">9800元</div></td>
            <td class="el-table__cell"><div class="cell">未售</div></td>
            <td class="el-table__cell"><div class="cell">否</div></td>
        </tr>"#;
        let units = extract(&doc(rows));
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].unit_id, "2-203");
        assert!(units[0].area.is_none());
        assert_eq!(units[0].price.as_deref(), Some("9800元"));
    }

    #[test]
    fn unmarked_rows_are_ignored() {
        // Header rows lack the data-row marker class.
        let rows = format!(
            "<tr><th>房间号</th><th>面积</th><th>单价</th><th>出售</th><th>抵押</th></tr>{}",
            row(&["1-101", "89.5", "12000", "未售", "否"])
        );
        assert_eq!(extract(&doc(&rows)).len(), 1);
    }

    #[test]
    fn parse_area_strips_unit_suffix() {
        assert_eq!(parse_area("89.5平方米"), Some(89.5));
        assert_eq!(parse_area("120.00"), Some(120.0));
        assert_eq!(parse_area("  76.3平方米  "), Some(76.3));
    }

    #[test]
    fn parse_area_rejects_garbage() {
        assert_eq!(parse_area("abc"), None);
        assert_eq!(parse_area(""), None);
        assert_eq!(parse_area("平方米"), None);
    }
}
