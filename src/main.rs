//! # Eurovision Scraper
//!
//! Extracts structured Eurovision Song Contest data from the per-year
//! Wikipedia articles and writes normalized CSV (and optionally JSON)
//! datasets:
//!
//! - **participants**: who sang what for whom (country, broadcaster,
//!   artist, song, language, songwriters, conductors)
//! - **results**: per-country running order and final placing
//! - **voting**: every country-to-country point award, split by round and
//!   vote type where the era supports it
//!
//! ## Usage
//!
//! ```sh
//! eurovision_scraper -o ./data -s all
//! ```
//!
//! ## Architecture
//!
//! One article per contest year (1956-2024, skipping the cancelled 2020
//! edition) is fetched serially with retry/backoff, parsed once, and fed
//! through the dataset extractors in `scrapers`. The heavy lifting is the
//! spec-driven table extractor in `extract`, which copes with six decades
//! of drifting table markup. Records are accumulated across years and
//! written per dataset at the end.

use clap::Parser;
use futures::stream::{self, StreamExt};
use scraper::Html;
use std::error::Error;
use tracing::{error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};
use url::Url;

mod cli;
mod countries;
mod extract;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::{Cli, Spider};
use countries::CountryMap;
use models::{ParticipantRecord, ResultRecord, VoteRecord};
use utils::ensure_writable_dir;

/// Everything extracted from one year's article.
#[derive(Debug, Default)]
struct Harvest {
    participants: Vec<ParticipantRecord>,
    results: Vec<ResultRecord>,
    votes: Vec<VoteRecord>,
}

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("eurovision_scraper starting up");

    let args = Cli::parse();
    if args.from_year > args.to_year {
        error!(
            from_year = args.from_year,
            to_year = args.to_year,
            "empty year range"
        );
        return Err("--from-year must not exceed --to-year".into());
    }

    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = fetch::client()?;
    let countries = CountryMap::standard();
    let years = scrapers::contest_years(args.from_year, args.to_year);
    info!(
        count = years.len(),
        from_year = args.from_year,
        to_year = args.to_year,
        "fetching contest articles serially"
    );

    // One request in flight at a time; Wikipedia articles for different
    // years are independent, but the serialized pace is deliberate.
    let harvests: Vec<Harvest> = stream::iter(years)
        .then(|year| harvest_year(&client, args.spider, countries, year))
        .collect()
        .await;

    let mut participants = Vec::new();
    let mut results = Vec::new();
    let mut votes = Vec::new();
    for harvest in harvests {
        participants.extend(harvest.participants);
        results.extend(harvest.results);
        votes.extend(harvest.votes);
    }
    info!(
        participants = participants.len(),
        results = results.len(),
        votes = votes.len(),
        "extraction complete"
    );

    let dir = args.output_dir.trim_end_matches('/');
    if args.spider.wants_participants() {
        write_dataset(&participants, dir, "eurovision_participant_data", args.json).await;
    }
    if args.spider.wants_results() {
        write_dataset(&results, dir, "eurovision_result_data", args.json).await;
    }
    if args.spider.wants_voting() {
        write_dataset(&votes, dir, "eurovision_vote_data", args.json).await;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        "execution complete"
    );

    Ok(())
}

/// Fetch and extract one year. Failures are logged and yield an empty
/// harvest so the remaining years still run.
#[instrument(level = "info", skip(client, countries))]
async fn harvest_year(
    client: &reqwest::Client,
    spider: Spider,
    countries: &CountryMap,
    year: i32,
) -> Harvest {
    let url = scrapers::article_url(year);
    let mut harvest = Harvest::default();

    let body = match fetch::fetch_with_backoff(client, &url).await {
        Ok(body) => body,
        Err(e) => {
            error!(%url, error = %e, "fetch failed; skipping year");
            return harvest;
        }
    };
    let (Ok(base_url), Some(year_label)) = (Url::parse(&url), scrapers::year_from_url(&url))
    else {
        error!(%url, "article URL does not encode a year");
        return harvest;
    };

    let document = Html::parse_document(&body);
    if spider.wants_participants() {
        harvest.participants =
            scrapers::participants::extract(&document, &base_url, year_label, countries);
    }
    if spider.wants_results() {
        harvest.results = scrapers::results::extract(&document, year_label);
    }
    if spider.wants_voting() {
        match scrapers::voting::extract(&document, year_label, countries) {
            Ok(votes) => harvest.votes = votes,
            Err(e) => {
                error!(%url, error = %e, "voting extraction failed; abandoning document");
            }
        }
    }

    info!(
        year,
        participants = harvest.participants.len(),
        results = harvest.results.len(),
        votes = harvest.votes.len(),
        "harvested year"
    );
    harvest
}

/// Write one dataset as CSV, plus a JSON sibling when requested. Output
/// failures are logged per dataset rather than aborting the others.
async fn write_dataset<R>(records: &[R], dir: &str, stem: &str, json: bool)
where
    R: models::CsvRecord + serde::Serialize,
{
    let csv_path = format!("{dir}/{stem}.csv");
    if let Err(e) = outputs::csv::write_records(records, &csv_path).await {
        error!(path = %csv_path, error = %e, "failed writing CSV dataset");
    }
    if json {
        let json_path = format!("{dir}/{stem}.json");
        if let Err(e) = outputs::json::write_records(records, &json_path).await {
            error!(path = %json_path, error = %e, "failed writing JSON dataset");
        }
    }
}
