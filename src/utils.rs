//! Small shared helpers for text cleanup and output-directory validation.

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Trim a string and strip any leading/trailing quote characters. Song
/// titles in the participants table are rendered inside literal quotes.
pub fn strip_outer_quotes(s: &str) -> String {
    s.trim().trim_matches('"').to_string()
}

/// Ensure a directory exists and is writable by creating it and probing a
/// throwaway file. Failing fast here beats scraping for an hour and then
/// failing to write the datasets.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
