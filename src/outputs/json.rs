//! JSON output.
//!
//! Optional sibling format next to each CSV dataset; records serialize with
//! their wire field names (`votingCountry`, `artistWikiUrl`, ...).

use serde::Serialize;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Write one dataset as a JSON array to `path`.
#[instrument(level = "info", skip(records), fields(path = %path))]
pub async fn write_records<T: Serialize>(records: &[T], path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string(records)?;
    fs::write(path, json).await?;
    info!(rows = records.len(), "wrote JSON dataset");
    Ok(())
}
