//! Command-line interface definitions.
//!
//! All options can be provided via command-line flags; the year range
//! defaults to the full contest history.

use clap::{Parser, ValueEnum};

use crate::scrapers::{FIRST_YEAR, LAST_YEAR};

/// Which dataset(s) to scrape.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spider {
    Participants,
    Results,
    Voting,
    All,
}

impl Spider {
    pub fn wants_participants(self) -> bool {
        matches!(self, Spider::Participants | Spider::All)
    }

    pub fn wants_results(self) -> bool {
        matches!(self, Spider::Results | Spider::All)
    }

    pub fn wants_voting(self) -> bool {
        matches!(self, Spider::Voting | Spider::All)
    }
}

/// Command-line arguments for the Eurovision Wikipedia scraper.
///
/// # Examples
///
/// ```sh
/// # Everything, full history, CSV into ./data
/// eurovision_scraper -o ./data
///
/// # Just the televote-era voting tables, with JSON siblings
/// eurovision_scraper -s voting --from-year 2016 --json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the dataset files
    #[arg(short, long, default_value = "./data")]
    pub output_dir: String,

    /// Dataset to scrape
    #[arg(short, long, value_enum, default_value_t = Spider::All)]
    pub spider: Spider,

    /// First contest year to fetch
    #[arg(long, default_value_t = FIRST_YEAR)]
    pub from_year: i32,

    /// Last contest year to fetch
    #[arg(long, default_value_t = LAST_YEAR)]
    pub to_year: i32,

    /// Also write a JSON sibling next to each CSV file
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["eurovision_scraper"]);
        assert_eq!(cli.output_dir, "./data");
        assert_eq!(cli.spider, Spider::All);
        assert_eq!(cli.from_year, 1956);
        assert_eq!(cli.to_year, 2024);
        assert!(!cli.json);
    }

    #[test]
    fn test_spider_selection() {
        let cli = Cli::parse_from(["eurovision_scraper", "-s", "voting", "--json"]);
        assert_eq!(cli.spider, Spider::Voting);
        assert!(cli.json);
        assert!(cli.spider.wants_voting());
        assert!(!cli.spider.wants_results());
    }

    #[test]
    fn test_year_range_flags() {
        let cli = Cli::parse_from([
            "eurovision_scraper",
            "--from-year",
            "2016",
            "--to-year",
            "2019",
            "-o",
            "/tmp/esc",
        ]);
        assert_eq!(cli.from_year, 2016);
        assert_eq!(cli.to_year, 2019);
        assert_eq!(cli.output_dir, "/tmp/esc");
    }

    #[test]
    fn test_all_wants_everything() {
        assert!(Spider::All.wants_participants());
        assert!(Spider::All.wants_results());
        assert!(Spider::All.wants_voting());
    }
}
