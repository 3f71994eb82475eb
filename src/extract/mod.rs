//! The resilient tabular extractor.
//!
//! Turns one parsed Wikipedia article into cross-country voting records,
//! driven entirely by a per-call [`TableSpec`]. Three cooperating pieces:
//!
//! 1. [`locator`] finds the right table among many candidates via a layered
//!    fallback search.
//! 2. [`align`] decides which row is the header and which rows carry data
//!    (the header is not always the first row).
//! 3. [`interpret`] resolves each data row's subject and pairs every points
//!    cell with the header cell naming the voting country, discarding
//!    totals, self-pairings, and aggregate columns.
//!
//! Failure semantics: a missing table is an expected, silent outcome; a row
//! whose shape defeats the offset math aborts that one table with an error
//! log and an empty contribution; nothing here panics on malformed markup.

use scraper::{ElementRef, Html};
use std::fmt;
use tracing::{debug, error};

use crate::countries::CountryMap;
use crate::models::VoteRecord;

pub mod interpret;
pub mod locator;
pub mod table;

use locator::TableSearch;
use table::Row;

/// Structural failure while interpreting a located table.
#[derive(Debug)]
pub struct ExtractError {
    detail: String,
}

impl ExtractError {
    pub fn row_shape(detail: String) -> Self {
        Self { detail }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table row shape anomaly: {}", self.detail)
    }
}

impl std::error::Error for ExtractError {}

/// Declarative description of one extraction pass: which table to find and
/// how to interpret it. Immutable, constructed per call.
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub year: String,
    /// Marker looked for in the nearest preceding `h2` heading.
    pub header_marker: &'static str,
    /// Caption marker when it differs from the heading marker.
    pub caption_marker: Option<&'static str>,
    pub round: &'static str,
    pub vote_type: &'static str,
    /// Correction applied when pairing a points cell with its header cell;
    /// varies across article eras.
    pub header_index_adjust: i32,
    /// Index of the true header row (some tables carry an extra banner row
    /// above it).
    pub row_index_adjust: usize,
    /// First value-type cell that holds points rather than metadata.
    pub start_column_index: usize,
    /// Substitute for blank points cells. The voting variant never defaults
    /// (blank cells are skipped); the legacy single-table layout used "0".
    pub empty_value_default: Option<&'static str>,
}

impl TableSpec {
    pub fn new(year: &str, header_marker: &'static str) -> Self {
        Self {
            year: year.to_string(),
            header_marker,
            caption_marker: None,
            round: "f",
            vote_type: "t",
            header_index_adjust: 0,
            row_index_adjust: 0,
            start_column_index: 0,
            empty_value_default: None,
        }
    }
}

/// A located table split into its header row and ordered data rows.
#[derive(Debug)]
pub struct AlignedTable {
    pub header_row: Row,
    pub data_rows: Vec<Row>,
}

/// Split a table's rows at `row_index_adjust`. A table with no row at that
/// index has nothing to interpret; a table with nothing after it yields an
/// empty data-row sequence, which is a valid outcome.
pub fn align(table: ElementRef<'_>, row_index_adjust: usize) -> Option<AlignedTable> {
    let rows = table::rows(table);
    let header_row = Row::from_tr(*rows.get(row_index_adjust)?);
    let data_rows = rows[row_index_adjust + 1..]
        .iter()
        .map(|tr| Row::from_tr(*tr))
        .collect();
    Some(AlignedTable {
        header_row,
        data_rows,
    })
}

/// Spec-driven voting-table extractor with an injected country lookup.
#[derive(Debug, Clone, Copy)]
pub struct VoteTableExtractor<'a> {
    countries: &'a CountryMap,
}

impl<'a> VoteTableExtractor<'a> {
    pub fn new(countries: &'a CountryMap) -> Self {
        Self { countries }
    }

    /// Extract every retained (row, column) pair of the table described by
    /// `spec`, or an empty vector when the table is absent or structurally
    /// broken. Emission order follows the table's own row/column order.
    pub fn extract(&self, document: &Html, spec: &TableSpec) -> Vec<VoteRecord> {
        let caption = spec.caption_marker.unwrap_or(spec.header_marker);
        let Some(table) = locator::locate(
            document,
            &[TableSearch::HeadingOrCaption {
                heading: spec.header_marker,
                caption,
            }],
        ) else {
            debug!(
                year = %spec.year,
                marker = spec.header_marker,
                "no table found"
            );
            return Vec::new();
        };

        let Some(aligned) = align(table, spec.row_index_adjust) else {
            debug!(year = %spec.year, marker = spec.header_marker, "table has no header row");
            return Vec::new();
        };

        match self.interpret_rows(&aligned, spec) {
            Ok(records) => records,
            Err(e) => {
                error!(
                    year = %spec.year,
                    marker = spec.header_marker,
                    error = %e,
                    "abandoning table"
                );
                Vec::new()
            }
        }
    }

    fn interpret_rows(
        &self,
        aligned: &AlignedTable,
        spec: &TableSpec,
    ) -> Result<Vec<VoteRecord>, ExtractError> {
        let mut records = Vec::new();
        for row in &aligned.data_rows {
            let entity = interpret::entity_label(row)?;
            let start = spec.start_column_index + entity.column_offset;
            if start >= row.value_cells.len() {
                continue;
            }
            // Running positions start at 2 by corpus convention.
            for (i, value) in (2..).zip(&row.value_cells[start..]) {
                let value = match (value, spec.empty_value_default) {
                    (Some(v), _) => v.clone(),
                    (None, Some(default)) => default.to_string(),
                    (None, None) => continue,
                };
                let Some(voting_label) =
                    interpret::paired_header_label(&aligned.header_row, i, spec.header_index_adjust)
                else {
                    continue;
                };
                if interpret::is_total_column(&voting_label, &entity.label) {
                    continue;
                }
                // Fixed pseudo-code, never looked up in the map.
                let voting_country = if voting_label == "Rest of the World" {
                    "row".to_string()
                } else {
                    self.countries.canonical(&voting_label)
                };
                records.push(VoteRecord {
                    year: spec.year.clone(),
                    round: spec.round.to_string(),
                    country: self.countries.canonical(&entity.label),
                    voting_country,
                    vote_type: spec.vote_type.to_string(),
                    points: value.trim().to_string(),
                });
            }
        }
        Ok(records)
    }
}
