//! Cross-country voting extraction.
//!
//! Article layout changed twice over the corpus, so one of three
//! configuration chains applies per year:
//!
//! - **post-2015**: six tables per year (jury and televote for the final
//!   and both semi-finals), a banner row above the true header, and points
//!   starting three value cells in;
//! - **2013**: that year's tables were captioned differently ("Final voting
//!   results" and friends) and align without a header adjustment;
//! - **pre-2016**: one combined vote per table, with generically-captioned
//!   fallbacks for the pre-semi-final era and for years with a single
//!   semi-final (2004 and earlier article styles).
//!
//! All three are expressed as [`TableSpec`] values over the same extractor;
//! nothing here re-implements alignment. Emitted records are deduplicated
//! on the full field tuple, preserving first-occurrence order.

use itertools::Itertools;
use scraper::Html;
use tracing::instrument;

use crate::countries::CountryMap;
use crate::extract::{ExtractError, TableSpec, VoteTableExtractor};
use crate::models::VoteRecord;

/// Extract every voting record for one year's article.
///
/// An unparsable year is the one top-level failure: it abandons the whole
/// document rather than guessing which era chain applies.
#[instrument(level = "debug", skip(document, countries))]
pub fn extract(
    document: &Html,
    year: &str,
    countries: &CountryMap,
) -> Result<Vec<VoteRecord>, ExtractError> {
    let numeric_year: i32 = year
        .parse()
        .map_err(|_| ExtractError::row_shape(format!("invalid contest year {year:?}")))?;

    let extractor = VoteTableExtractor::new(countries);
    let records = if numeric_year > 2015 {
        post_2015(&extractor, document, year)
    } else if numeric_year == 2013 {
        year_2013(&extractor, document, year)
    } else {
        pre_2016(&extractor, document, year)
    };

    Ok(records.into_iter().unique().collect())
}

fn post_2015_spec(
    year: &str,
    marker: &'static str,
    round: &'static str,
    vote_type: &'static str,
) -> TableSpec {
    TableSpec {
        round,
        vote_type,
        header_index_adjust: -1,
        row_index_adjust: 1,
        start_column_index: 3,
        ..TableSpec::new(year, marker)
    }
}

fn post_2015(extractor: &VoteTableExtractor<'_>, document: &Html, year: &str) -> Vec<VoteRecord> {
    let passes = [
        ("Detailed jury voting results of the final", "f", "j"),
        ("Detailed televoting results of the final", "f", "tv"),
        ("Detailed jury voting results of semi-final 1", "sf1", "j"),
        ("Detailed televoting results of semi-final 1", "sf1", "tv"),
        ("Detailed jury voting results of semi-final 2", "sf2", "j"),
        ("Detailed televoting results of semi-final 2", "sf2", "tv"),
    ];
    passes
        .into_iter()
        .flat_map(|(marker, round, vote_type)| {
            extractor.extract(document, &post_2015_spec(year, marker, round, vote_type))
        })
        .collect()
}

fn pre_2016_spec(
    year: &str,
    marker: &'static str,
    round: &'static str,
    header_index_adjust: i32,
) -> TableSpec {
    TableSpec {
        round,
        header_index_adjust,
        ..TableSpec::new(year, marker)
    }
}

fn pre_2016(extractor: &VoteTableExtractor<'_>, document: &Html, year: &str) -> Vec<VoteRecord> {
    let mut records = Vec::new();

    // Finals in semi-final-era articles carry the specific caption; older
    // articles only have the generically-titled results table.
    let final_results = extractor.extract(
        document,
        &pre_2016_spec(year, "Detailed voting results of the final", "f", -1),
    );
    if final_results.is_empty() {
        records.extend(extractor.extract(
            document,
            &pre_2016_spec(year, "Detailed voting results", "f", 0),
        ));
    } else {
        records.extend(final_results);
    }

    let semi_final_1 = extractor.extract(
        document,
        &pre_2016_spec(year, "Detailed voting results of semi-final 1", "sf1", -1),
    );
    let semi_final_2 = extractor.extract(
        document,
        &pre_2016_spec(year, "Detailed voting results of semi-final 2", "sf2", -1),
    );

    // Years with a single semi-final label it without a number.
    if semi_final_1.is_empty() && semi_final_2.is_empty() {
        records.extend(extractor.extract(
            document,
            &pre_2016_spec(year, "Detailed voting results of the semi-final", "sf", -1),
        ));
    } else {
        records.extend(semi_final_1);
        records.extend(semi_final_2);
    }

    records
}

fn year_2013(extractor: &VoteTableExtractor<'_>, document: &Html, year: &str) -> Vec<VoteRecord> {
    let passes = [
        ("Final voting results", "f"),
        ("Semi-final 1 voting results", "sf1"),
        ("Semi-final 2 voting results", "sf2"),
    ];
    passes
        .into_iter()
        .flat_map(|(marker, round)| {
            extractor.extract(document, &pre_2016_spec(year, marker, round, 0))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_all(html: &str, year: &str) -> Vec<VoteRecord> {
        let document = Html::parse_document(html);
        extract(&document, year, CountryMap::standard()).unwrap()
    }

    #[test]
    fn test_post_2015_jury_and_televote_tables() {
        // Banner row above the header, three metadata cells before points.
        let html = "\
            <h2>Detailed jury voting results of the final</h2>\
            <table class=\"wikitable\">\
            <tr><th>banner</th></tr>\
            <tr><th>Contestants</th><th>n/a</th><th>France</th><th>Germany</th></tr>\
            <tr><th>Sweden</th><td>a</td><td>b</td><td>c</td><td>12</td><td>10</td></tr>\
            </table>\
            <h2>Detailed televoting results of the final</h2>\
            <table class=\"wikitable\">\
            <tr><th>banner</th></tr>\
            <tr><th>Contestants</th><th>n/a</th><th>France</th><th>Germany</th></tr>\
            <tr><th>Sweden</th><td>a</td><td>b</td><td>c</td><td>8</td><td></td></tr>\
            </table>";
        let records = extract_all(html, "2017");
        assert_eq!(records.len(), 3);
        assert_eq!(
            (records[0].vote_type.as_str(), records[0].voting_country.as_str(), records[0].points.as_str()),
            ("j", "fr", "12")
        );
        assert_eq!(records[1].voting_country, "de");
        assert_eq!(records[2].vote_type, "tv");
        assert_eq!(records[2].points, "8");
        assert!(records.iter().all(|r| r.country == "se" && r.round == "f"));
    }

    #[test]
    fn test_pre_2016_generic_caption_fallback() {
        // No "of the final" table; the generically-titled one (header
        // adjustment 0) must be used instead.
        let html = "\
            <h2>Detailed voting results</h2>\
            <table class=\"wikitable\">\
            <tr><th>Contestants</th><th>n/a</th><th>x</th><th>France</th></tr>\
            <tr><th>Sweden</th><td>12</td></tr>\
            </table>";
        let records = extract_all(html, "1975");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].round, "f");
        assert_eq!(records[0].vote_type, "t");
        assert_eq!(records[0].voting_country, "fr");
    }

    #[test]
    fn test_pre_2016_specific_final_wins_over_generic() {
        let html = "\
            <h2>Detailed voting results of the final</h2>\
            <table class=\"wikitable\">\
            <tr><th>Contestants</th><th>x</th><th>France</th></tr>\
            <tr><th>Sweden</th><td>12</td></tr>\
            </table>\
            <h2>Detailed voting results</h2>\
            <table class=\"wikitable\">\
            <tr><th>Contestants</th><th>x</th><th>x</th><th>Germany</th></tr>\
            <tr><th>Norway</th><td>10</td></tr>\
            </table>";
        let records = extract_all(html, "2005");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].country, "se");
        assert_eq!(records[0].voting_country, "fr");
    }

    #[test]
    fn test_single_semi_final_fallback() {
        let html = "\
            <h2>Detailed voting results of the semi-final</h2>\
            <table class=\"wikitable\">\
            <tr><th>Contestants</th><th>x</th><th>Ireland</th></tr>\
            <tr><th>Norway</th><td>7</td></tr>\
            </table>";
        let records = extract_all(html, "2004");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].round, "sf");
        assert_eq!(records[0].voting_country, "ie");
    }

    #[test]
    fn test_2013_markers_and_alignment() {
        let html = "\
            <h2>Final voting results</h2>\
            <table class=\"wikitable\">\
            <tr><th>Contestants</th><th>x</th><th>x</th><th>Denmark</th></tr>\
            <tr><th>Sweden</th><td>10</td></tr>\
            </table>";
        let records = extract_all(html, "2013");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].voting_country, "dk");
        assert_eq!(records[0].vote_type, "t");
    }

    #[test]
    fn test_duplicate_rows_deduplicate() {
        let html = "\
            <h2>Detailed voting results</h2>\
            <table class=\"wikitable\">\
            <tr><th>Contestants</th><th>n/a</th><th>x</th><th>France</th></tr>\
            <tr><th>Sweden</th><td>12</td></tr>\
            <tr><th>Sweden</th><td>12</td></tr>\
            </table>";
        let records = extract_all(html, "1975");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_invalid_year_abandons_document() {
        let document = Html::parse_document("<p></p>");
        assert!(extract(&document, "not-a-year", CountryMap::standard()).is_err());
    }

    #[test]
    fn test_year_without_tables_is_empty() {
        let records = extract_all("<h2>History</h2><p>prose only</p>", "1956");
        assert!(records.is_empty());
    }
}
