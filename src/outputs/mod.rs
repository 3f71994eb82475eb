//! Dataset writers.
//!
//! Each scraping run produces up to three datasets; these submodules
//! serialize them:
//!
//! - [`csv`]: the primary delimited output, one file per dataset with a
//!   fixed column header order
//! - [`json`]: optional JSON siblings for consumers that prefer structured
//!   records over rows

pub mod csv;
pub mod json;
