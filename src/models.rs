//! Record types for the three exported datasets.
//!
//! Records are value objects: their identity is the full field tuple, which
//! is also the deduplication key for the voting dataset. Field names use
//! camelCase on the wire (`votingCountry`, `artistWikiUrl`, ...) to match
//! the published CSV/JSON column names, hence the serde renames.

use serde::Serialize;

/// A record that can be written as one CSV row under a fixed column order.
pub trait CsvRecord {
    fn columns() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

/// One country-to-country point award in one round of one contest.
///
/// `vote_type` is `j` (jury), `tv` (televote), or `t` (combined/tele-era);
/// `round` is `f`, `sf`, `sf1`, or `sf2`. Country fields hold two-letter
/// codes, except the `row` pseudo-code for "Rest of the World".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub year: String,
    pub round: String,
    pub country: String,
    pub voting_country: String,
    pub vote_type: String,
    pub points: String,
}

impl CsvRecord for VoteRecord {
    fn columns() -> &'static [&'static str] {
        &[
            "year",
            "round",
            "country",
            "votingCountry",
            "voteType",
            "points",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.year.clone(),
            self.round.clone(),
            self.country.clone(),
            self.voting_country.clone(),
            self.vote_type.clone(),
            self.points.clone(),
        ]
    }
}

/// One entry in a year's participants table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub year: String,
    pub country: String,
    pub broadcaster: String,
    pub artist: String,
    pub artist_wiki_url: String,
    pub song: String,
    pub song_wiki_url: String,
    pub language: String,
    pub songwriters: String,
    pub conductors: String,
}

impl CsvRecord for ParticipantRecord {
    fn columns() -> &'static [&'static str] {
        &[
            "year",
            "country",
            "broadcaster",
            "artist",
            "artistWikiUrl",
            "song",
            "songWikiUrl",
            "language",
            "songwriters",
            "conductors",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.year.clone(),
            self.country.clone(),
            self.broadcaster.clone(),
            self.artist.clone(),
            self.artist_wiki_url.clone(),
            self.song.clone(),
            self.song_wiki_url.clone(),
            self.language.clone(),
            self.songwriters.clone(),
            self.conductors.clone(),
        ]
    }
}

/// One country's standing in a year's results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub year: String,
    pub country: String,
    pub running_order: String,
    pub place: String,
}

impl CsvRecord for ResultRecord {
    fn columns() -> &'static [&'static str] {
        &["year", "country", "runningOrder", "place"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.year.clone(),
            self.country.clone(),
            self.running_order.clone(),
            self.place.clone(),
        ]
    }
}
