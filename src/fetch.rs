//! Article fetching with exponential backoff.
//!
//! Wikipedia is lenient but not infinitely so: requests are issued one at a
//! time by the caller, and transient failures (rate limiting, network
//! blips, 5xx) are retried here with exponential backoff plus jitter.
//! Parsing is never retried; if a successfully fetched document cannot be
//! interpreted, refetching it will not help.
//!
//! # Retry strategy
//!
//! - Maximum 5 retry attempts
//! - Exponential backoff starting at 1 second
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to each delay

use rand::{rng, Rng};
use reqwest::Client;
use std::error::Error;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{instrument, warn};

const MAX_RETRIES: usize = 5;
const BASE_DELAY: Duration = Duration::from_secs(1);
const MAX_DELAY: Duration = Duration::from_secs(30);

/// HTTP client with a descriptive user agent, as the Wikimedia etiquette
/// guidelines ask of bots.
pub fn client() -> Result<Client, Box<dyn Error>> {
    let user_agent = concat!(
        "eurovision_scraper/",
        env!("CARGO_PKG_VERSION"),
        " (https://crates.io/crates/eurovision_scraper)"
    );
    Ok(Client::builder().user_agent(user_agent).build()?)
}

/// Fetch one article body, retrying transient failures with backoff.
#[instrument(level = "info", skip(client))]
pub async fn fetch_with_backoff(client: &Client, url: &str) -> Result<String, Box<dyn Error>> {
    let total_t0 = Instant::now();
    let mut attempt = 0usize;

    loop {
        match fetch_once(client, url).await {
            Ok(body) => return Ok(body),
            Err(e) => {
                attempt += 1;
                if attempt > MAX_RETRIES {
                    warn!(
                        attempt,
                        max = MAX_RETRIES,
                        elapsed_ms_total = total_t0.elapsed().as_millis() as u128,
                        error = %e,
                        "fetch exhausted retries"
                    );
                    return Err(e);
                }

                let mut delay = BASE_DELAY.saturating_mul(1 << (attempt - 1));
                if delay > MAX_DELAY {
                    delay = MAX_DELAY;
                }
                let jitter_ms: u64 = rng().random_range(0..=250);
                let delay = delay + Duration::from_millis(jitter_ms);

                warn!(
                    attempt,
                    max = MAX_RETRIES,
                    ?delay,
                    error = %e,
                    "fetch attempt failed; backing off"
                );
                sleep(delay).await;
            }
        }
    }
}

async fn fetch_once(client: &Client, url: &str) -> Result<String, Box<dyn Error>> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}
