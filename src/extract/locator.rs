//! Layered table search.
//!
//! The same logical table (detailed voting, results of a final, the
//! participants list) is labeled differently across sixty-plus years of
//! article revisions: sometimes by an overhead `h2` heading, sometimes by a
//! `<caption>` whose wording changed partway through the corpus, sometimes
//! only by its position after a color legend. [`locate`] evaluates an
//! ordered list of [`TableSearch`] strategies and stops at the first one
//! that yields a table.
//!
//! These strategies encode empirically-discovered quirks of specific
//! historical revisions. They are deliberately not generalized; when a new
//! layout appears the fix is another strategy in the chain, not a smarter
//! predicate.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::table::full_text;

static CAPTION: Lazy<Selector> = Lazy::new(|| Selector::parse("caption").unwrap());
static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").unwrap());

/// One predicate in the fallback chain.
#[derive(Debug, Clone, Copy)]
pub enum TableSearch<'a> {
    /// A `table.wikitable` whose nearest preceding `h2` contains `heading`,
    /// or whose own caption contains `caption`.
    HeadingOrCaption { heading: &'a str, caption: &'a str },
    /// A table whose caption contains `marker`; `wikitable` additionally
    /// requires the `wikitable` class.
    Caption { marker: &'a str, wikitable: bool },
    /// The first table following a `div.legend` whose text contains
    /// `marker`. With `header_hint`, that table must also carry a header
    /// cell containing the hint (used to pick the running-order table when
    /// several legends share a section).
    LegendFollowing {
        marker: &'a str,
        header_hint: Option<&'a str>,
    },
    /// The first table following a paragraph containing `marker`.
    AfterParagraph { marker: &'a str },
}

/// Walk the fallback chain; first hit wins. `None` means the article has no
/// such table, which is an expected outcome for many years.
pub fn locate<'d>(document: &'d Html, strategies: &[TableSearch<'_>]) -> Option<ElementRef<'d>> {
    for (layer, strategy) in strategies.iter().enumerate() {
        if let Some(table) = find(document, strategy) {
            debug!(layer, ?strategy, "table located");
            return Some(table);
        }
    }
    None
}

fn find<'d>(document: &'d Html, strategy: &TableSearch<'_>) -> Option<ElementRef<'d>> {
    match *strategy {
        TableSearch::HeadingOrCaption { heading, caption } => {
            heading_or_caption(document, heading, caption)
        }
        TableSearch::Caption { marker, wikitable } => document
            .select(&TABLE_ANY)
            .find(|table| (!wikitable || is_wikitable(*table)) && caption_contains(*table, marker)),
        TableSearch::LegendFollowing {
            marker,
            header_hint,
        } => following_table(document, marker, header_hint, |el| {
            el.value().name() == "div" && el.value().classes().any(|c| c == "legend")
        }),
        TableSearch::AfterParagraph { marker } => {
            following_table(document, marker, None, |el| el.value().name() == "p")
        }
    }
}

static TABLE_ANY: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());

fn is_wikitable(table: ElementRef<'_>) -> bool {
    table.value().classes().any(|c| c == "wikitable")
}

fn caption_contains(table: ElementRef<'_>, marker: &str) -> bool {
    table
        .select(&CAPTION)
        .next()
        .is_some_and(|c| full_text(c).contains(marker))
}

fn has_header_cell_containing(table: ElementRef<'_>, hint: &str) -> bool {
    table.select(&TH).any(|th| full_text(th).contains(hint))
}

/// Single document-order walk tracking the most recent `h2` text; the first
/// wikitable whose nearest heading or own caption carries the marker wins.
fn heading_or_caption<'d>(
    document: &'d Html,
    heading: &str,
    caption: &str,
) -> Option<ElementRef<'d>> {
    let mut last_heading = String::new();
    for node in document.root_element().descendants() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        match el.value().name() {
            "h2" => last_heading = full_text(el),
            "table" if is_wikitable(el) => {
                if last_heading.contains(heading) || caption_contains(el, caption) {
                    return Some(el);
                }
            }
            _ => {}
        }
    }
    None
}

/// The first table after a marker element. Only the immediately following
/// table counts for each marker occurrence; a table that fails the header
/// hint is not reconsidered for later markers it also follows.
fn following_table<'d>(
    document: &'d Html,
    marker: &str,
    header_hint: Option<&str>,
    is_marker: impl Fn(ElementRef<'_>) -> bool,
) -> Option<ElementRef<'d>> {
    let mut armed = false;
    for node in document.root_element().descendants() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        if is_marker(el) && full_text(el).contains(marker) {
            armed = true;
        } else if el.value().name() == "table" && armed {
            armed = false;
            match header_hint {
                Some(hint) if !has_header_cell_containing(el, hint) => {}
                _ => return Some(el),
            }
        }
    }
    None
}
