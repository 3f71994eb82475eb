//! Participants table extraction.
//!
//! Unlike the voting tables, the participants table has kept a stable shape
//! across the corpus: one caption, one header row, and a fixed column order
//! (broadcaster, artist, song, language, songwriters, conductors). This is
//! a straight fixed-column projection with light text cleanup; none of the
//! header-alignment machinery applies.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use crate::countries::CountryMap;
use crate::extract::locator::{self, TableSearch};
use crate::extract::table::{first_text, rows};
use crate::models::ParticipantRecord;
use crate::utils::strip_outer_quotes;

static TH_ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("th a").unwrap());
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static LI: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());

const CAPTION_MARKER: &str = "Participants of the Eurovision Song Contest";
/// Country links in the row header carry titles like
/// "Sweden in the Eurovision Song Contest".
const COUNTRY_LINK_MARKER: &str = "in the Eurovision Song Contest";

/// Extract the participants table, one record per country row. Rows without
/// a recognizable country link are skipped; absent cells become empty
/// fields rather than errors.
#[instrument(level = "debug", skip(document, base_url, countries))]
pub fn extract(
    document: &Html,
    base_url: &Url,
    year: &str,
    countries: &CountryMap,
) -> Vec<ParticipantRecord> {
    let Some(table) = locator::locate(
        document,
        &[TableSearch::Caption {
            marker: CAPTION_MARKER,
            wikitable: true,
        }],
    ) else {
        debug!(year, "no participants table");
        return Vec::new();
    };

    let mut records = Vec::new();
    for tr in rows(table).into_iter().skip(1) {
        let Some(country) = country_label(tr) else {
            continue;
        };

        let cells: Vec<ElementRef<'_>> = tr.select(&TD).collect();
        let text_at = |i: usize| {
            cells
                .get(i)
                .and_then(|td| first_text(*td))
                .unwrap_or_default()
        };
        let href_at = |i: usize| {
            cells
                .get(i)
                .and_then(|td| td.select(&ANCHOR).next())
                .and_then(|a| a.value().attr("href"))
                .map(|href| resolve(base_url, href))
                .unwrap_or_default()
        };

        let song = cells
            .get(2)
            .map(|td| strip_outer_quotes(&td.text().collect::<String>()))
            .unwrap_or_default();
        let songwriters = cells
            .get(4)
            .map(|td| {
                td.select(&LI)
                    .flat_map(|li| li.text())
                    .collect::<Vec<_>>()
                    .join("|")
                    .trim()
                    .to_string()
            })
            .unwrap_or_default();
        let conductors = text_at(5);

        records.push(ParticipantRecord {
            year: year.to_string(),
            country: countries.canonical(&country),
            broadcaster: text_at(0),
            artist: text_at(1),
            artist_wiki_url: href_at(1),
            song,
            song_wiki_url: href_at(2),
            language: text_at(3),
            songwriters,
            // A leading bracket is an unresolved footnote marker, not a name.
            conductors: if conductors.starts_with('[') {
                String::new()
            } else {
                conductors
            },
        });
    }
    records
}

/// The country name from the row header's contest link.
fn country_label(tr: ElementRef<'_>) -> Option<String> {
    tr.select(&TH_ANCHOR)
        .find(|a| {
            a.value()
                .attr("title")
                .is_some_and(|t| t.contains(COUNTRY_LINK_MARKER))
        })
        .and_then(first_text)
        .filter(|c| !c.is_empty())
}

fn resolve(base_url: &Url, href: &str) -> String {
    if href.is_empty() {
        return String::new();
    }
    base_url
        .join(href)
        .map(|u| u.to_string())
        .unwrap_or_default()
}
