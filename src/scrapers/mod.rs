//! Per-dataset extractors over the yearly contest articles.
//!
//! Each submodule turns one parsed article into records for one dataset:
//!
//! | Dataset | Module | Table location | Notes |
//! |---------|--------|----------------|-------|
//! | Voting | [`voting`] | heading/caption marker chains | era-specific `TableSpec`s, full alignment heuristic |
//! | Participants | [`participants`] | caption match | fixed-column projection |
//! | Results | [`results`] | caption, legend, 2021 paragraph | fixed-column projection |
//!
//! This module also owns the article URL scheme: one article per contest
//! year, 1956 through 2024, skipping 2020 (no contest was held), with the
//! year re-derived from the URL's trailing path segment.

pub mod participants;
pub mod results;
pub mod voting;

/// First contest.
pub const FIRST_YEAR: i32 = 1956;
/// Most recent contest covered by the exporter.
pub const LAST_YEAR: i32 = 2024;
/// Cancelled; the article exists but carries no result tables.
const CANCELLED_YEAR: i32 = 2020;

/// Contest years in `from..=to`, excluding the cancelled 2020 edition.
pub fn contest_years(from: i32, to: i32) -> Vec<i32> {
    (from..=to).filter(|y| *y != CANCELLED_YEAR).collect()
}

/// The Wikipedia article URL for one contest year.
pub fn article_url(year: i32) -> String {
    format!("https://en.wikipedia.org/wiki/Eurovision_Song_Contest_{year}")
}

/// The year encoded in an article URL's trailing `_`-separated segment.
pub fn year_from_url(url: &str) -> Option<&str> {
    url.rsplit('_').next().filter(|s| !s.is_empty())
}
