//! Basic-info extraction: description-list label/content pairs.
//!
//! The portal renders project metadata as Element-UI description items —
//! a `<span>` carrying the label marker class followed by a sibling `<span>`
//! carrying the content marker class. Labels arrive with incidental noise
//! (trailing colons, wrapped whitespace), so field recognition is substring
//! containment against an explicit ordered needle table rather than exact
//! key equality.

use crate::extract::{element_text, TITLE_SUFFIX};
use crate::model::{BasicField, BasicInfo};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Marker class carried by description-item content spans.
const CONTENT_MARKER: &str = "el-descriptions-item__content";

static LABEL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"span[class*="el-descriptions-item__label"]"#).unwrap());

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());

/// Recognized field needles, evaluated in this order for each label.
/// The first needle contained in the label text wins for that label;
/// across labels, later matches overwrite earlier ones per field.
const FIELD_NEEDLES: [(&str, BasicField); 5] = [
    ("项目名称", BasicField::ProjectName),
    ("房屋坐落", BasicField::Location),
    ("销售面积", BasicField::SalesArea),
    ("销售许可证证载用途", BasicField::LicensedUse),
    ("许可证号", BasicField::PermitNo),
];

/// Extract the basic-info block from a parsed document.
pub fn extract(document: &Html) -> BasicInfo {
    let mut info = BasicInfo::default();

    for label in document.select(&LABEL_SELECTOR) {
        let label_text = element_text(label);
        let Some(content) = paired_content(label) else {
            debug!("Label '{label_text}' has no paired content element, skipping");
            continue;
        };

        if let Some(&(_, field)) = FIELD_NEEDLES
            .iter()
            .find(|(needle, _)| label_text.contains(needle))
        {
            info.set(field, element_text(content));
        }
    }

    // Fallback: derive the project name from the page title. Only fires
    // when the primary extraction left the field empty.
    if info.project_name.is_none() {
        if let Some(name) = project_name_from_title(document) {
            debug!("Project name recovered from page title: {name}");
            info.set(BasicField::ProjectName, name);
        }
    }

    info
}

/// The label's immediate next element sibling, required to carry the
/// content marker class. No pairing is synthesized when it does not.
fn paired_content<'a>(label: ElementRef<'a>) -> Option<ElementRef<'a>> {
    label
        .next_siblings()
        .find_map(ElementRef::wrap)
        .filter(|el| {
            el.value()
                .attr("class")
                .is_some_and(|c| c.contains(CONTENT_MARKER))
        })
}

/// Strip the fixed portal suffix from the `<title>` text; the non-empty
/// remainder is the project name.
fn project_name_from_title(document: &Html) -> Option<String> {
    let title = document.select(&TITLE_SELECTOR).next()?;
    let text = element_text(title);
    if !text.contains(TITLE_SUFFIX) {
        return None;
    }
    let name = text.replace(TITLE_SUFFIX, "").trim().to_string();
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><head></head><body>{body}</body></html>"))
    }

    fn pair(label: &str, content: &str) -> String {
        format!(
            r#"<span class="el-descriptions-item__label">{label}</span><span class="el-descriptions-item__content">{content}</span>"#
        )
    }

    #[test]
    fn extracts_all_five_fields() {
        let body = [
            pair("项目名称", "阳光花园"),
            pair("房屋坐落", "幸福路88号"),
            pair("销售面积", "12000平方米"),
            pair("销售许可证证载用途", "住宅"),
            pair("许可证号", "许字第001号"),
        ]
        .join("");
        let info = extract(&doc(&body));

        assert_eq!(info.project_name.as_deref(), Some("阳光花园"));
        assert_eq!(info.location.as_deref(), Some("幸福路88号"));
        assert_eq!(info.sales_area.as_deref(), Some("12000平方米"));
        assert_eq!(info.licensed_use.as_deref(), Some("住宅"));
        assert_eq!(info.permit_no.as_deref(), Some("许字第001号"));
    }

    #[test]
    fn colon_suffixed_label_still_matches() {
        let info = extract(&doc(&pair("项目名称:", "阳光花园")));
        assert_eq!(info.project_name.as_deref(), Some("阳光花园"));
    }

    #[test]
    fn label_without_content_sibling_is_skipped() {
        let body = r#"<span class="el-descriptions-item__label">项目名称</span><span class="something-else">阳光花园</span>"#;
        let info = extract(&doc(body));
        assert!(info.project_name.is_none());
    }

    #[test]
    fn unrecognized_label_is_ignored() {
        let info = extract(&doc(&pair("开发商", "某某地产")));
        assert!(info.is_empty());
    }

    #[test]
    fn duplicate_labels_last_write_wins() {
        let body = format!("{}{}", pair("许可证号", "旧号"), pair("许可证号", "新号"));
        let info = extract(&doc(&body));
        assert_eq!(info.permit_no.as_deref(), Some("新号"));
    }

    #[test]
    fn title_fallback_strips_fixed_suffix() {
        let html = Html::parse_document(
            "<html><head><title>阳光花园商品房销售许可证信息</title></head><body></body></html>",
        );
        let info = extract(&html);
        assert_eq!(info.project_name.as_deref(), Some("阳光花园"));
    }

    #[test]
    fn title_fallback_requires_nonempty_remainder() {
        let html = Html::parse_document(
            "<html><head><title>商品房销售许可证信息</title></head><body></body></html>",
        );
        let info = extract(&html);
        assert!(info.project_name.is_none());
    }

    #[test]
    fn title_fallback_does_not_override_explicit_label() {
        let html = Html::parse_document(&format!(
            "<html><head><title>别的名字商品房销售许可证信息</title></head><body>{}</body></html>",
            pair("项目名称", "阳光花园")
        ));
        let info = extract(&html);
        assert_eq!(info.project_name.as_deref(), Some("阳光花园"));
    }
}
