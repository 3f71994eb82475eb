//! Row and cell model for located tables.
//!
//! Wikipedia's voting tables interleave header-type (`th`) and value-type
//! (`td`) cells within data rows, and the extractor's alignment math indexes
//! the two kinds separately. [`Row`] snapshots a `tr` element into two
//! ordered lists of cell texts so the interpreter can do plain slice
//! indexing instead of re-querying the DOM.
//!
//! Cell text is the first non-blank text node of the cell, trimmed. This
//! mirrors how the tables are read in practice: a points cell holds a bare
//! number, and a country header cell holds the country name next to flag
//! markup whose own text nodes are blank.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").unwrap());
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

/// All `tr` elements of a table, in document order.
pub fn rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    table.select(&TR).collect()
}

/// First non-blank text node of an element, trimmed.
pub fn first_text(el: ElementRef<'_>) -> Option<String> {
    el.text()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

/// Every text node of an element joined together, trimmed.
pub fn full_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// First non-blank *direct* text child of an element, trimmed. Used where a
/// nested anchor or footnote must not contribute text.
pub fn direct_text(el: ElementRef<'_>) -> Option<String> {
    el.children()
        .filter_map(|node| node.value().as_text())
        .map(|t| t.trim())
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

/// One table row, split into header-type and value-type cell texts.
///
/// A cell with no usable text is `None`; positions are preserved so the
/// interpreter's offset arithmetic stays aligned with the markup.
#[derive(Debug, Clone, Default)]
pub struct Row {
    pub header_cells: Vec<Option<String>>,
    pub value_cells: Vec<Option<String>>,
}

impl Row {
    pub fn from_tr(tr: ElementRef<'_>) -> Self {
        Self {
            header_cells: tr.select(&TH).map(first_text).collect(),
            value_cells: tr.select(&TD).map(first_text).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn only_row(html: &str) -> Row {
        let doc = Html::parse_document(html);
        let table = doc
            .select(&Selector::parse("table").unwrap())
            .next()
            .unwrap();
        Row::from_tr(rows(table)[0])
    }

    #[test]
    fn test_row_splits_header_and_value_cells() {
        let row = only_row("<table><tr><th>Sweden</th><td>12</td><td>10</td></tr></table>");
        assert_eq!(row.header_cells, vec![Some("Sweden".to_string())]);
        assert_eq!(
            row.value_cells,
            vec![Some("12".to_string()), Some("10".to_string())]
        );
    }

    #[test]
    fn test_blank_cell_is_none() {
        let row = only_row("<table><tr><th>Sweden</th><td></td><td>  </td></tr></table>");
        assert_eq!(row.value_cells, vec![None, None]);
    }

    #[test]
    fn test_first_text_skips_blank_flag_markup() {
        let row = only_row(
            "<table><tr><th><span> </span><a>France</a></th><td>8</td></tr></table>",
        );
        assert_eq!(row.header_cells, vec![Some("France".to_string())]);
    }

    #[test]
    fn test_direct_text_ignores_nested_anchors() {
        let doc = Html::parse_document(
            "<table><tr><th>7<a>note</a></th><td><a>Sweden</a></td></tr></table>",
        );
        let table = doc
            .select(&Selector::parse("table").unwrap())
            .next()
            .unwrap();
        let tr = rows(table)[0];
        let th = tr.select(&Selector::parse("th").unwrap()).next().unwrap();
        let td = tr.select(&Selector::parse("td").unwrap()).next().unwrap();
        assert_eq!(direct_text(th), Some("7".to_string()));
        assert_eq!(direct_text(td), None);
    }
}
