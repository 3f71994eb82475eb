//! Country name canonicalization.
//!
//! Wikipedia labels voting columns and contestant rows with display names
//! ("Sweden", "Bosnia and Herzegovina", "Türkiye"), while the exported data
//! uses two-letter country codes. [`CountryMap`] is an immutable lookup from
//! display name to code, built once and passed by reference into the
//! extractors so they stay pure and testable against synthetic documents.
//!
//! Lookups are identity on a miss: an already-canonical code (or a name the
//! table doesn't know) passes through unchanged, which makes
//! canonicalization idempotent.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Display names for every country that has appeared in the contest,
/// including historical entrants and alternate article spellings.
const STANDARD_PAIRS: &[(&str, &str)] = &[
    ("Albania", "al"),
    ("Andorra", "ad"),
    ("Armenia", "am"),
    ("Australia", "au"),
    ("Austria", "at"),
    ("Azerbaijan", "az"),
    ("Belarus", "by"),
    ("Belgium", "be"),
    ("Bosnia and Herzegovina", "ba"),
    ("Bulgaria", "bg"),
    ("Croatia", "hr"),
    ("Cyprus", "cy"),
    ("Czech Republic", "cz"),
    ("Czechia", "cz"),
    ("Denmark", "dk"),
    ("Estonia", "ee"),
    ("Finland", "fi"),
    ("France", "fr"),
    ("Georgia", "ge"),
    ("Germany", "de"),
    ("West Germany", "de"),
    ("Greece", "gr"),
    ("Hungary", "hu"),
    ("Iceland", "is"),
    ("Ireland", "ie"),
    ("Israel", "il"),
    ("Italy", "it"),
    ("Latvia", "lv"),
    ("Lithuania", "lt"),
    ("Luxembourg", "lu"),
    ("Malta", "mt"),
    ("Moldova", "md"),
    ("Monaco", "mc"),
    ("Montenegro", "me"),
    ("Morocco", "ma"),
    ("Netherlands", "nl"),
    ("The Netherlands", "nl"),
    ("North Macedonia", "mk"),
    ("Macedonia", "mk"),
    ("F.Y.R. Macedonia", "mk"),
    ("Norway", "no"),
    ("Poland", "pl"),
    ("Portugal", "pt"),
    ("Romania", "ro"),
    ("Russia", "ru"),
    ("San Marino", "sm"),
    ("Serbia", "rs"),
    ("Serbia and Montenegro", "cs"),
    ("Slovakia", "sk"),
    ("Slovenia", "si"),
    ("Spain", "es"),
    ("Sweden", "se"),
    ("Switzerland", "ch"),
    ("Turkey", "tr"),
    ("Türkiye", "tr"),
    ("Ukraine", "ua"),
    ("United Kingdom", "gb"),
    ("Yugoslavia", "yu"),
];

static STANDARD: Lazy<CountryMap> = Lazy::new(|| CountryMap::from_pairs(STANDARD_PAIRS));

/// Immutable display-name to country-code lookup.
#[derive(Debug, Clone)]
pub struct CountryMap {
    entries: HashMap<String, String>,
}

impl CountryMap {
    /// Build a map from `(display name, code)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let entries = pairs
            .iter()
            .map(|(name, code)| (name.to_string(), code.to_string()))
            .collect();
        Self { entries }
    }

    /// The built-in table covering the full contest history.
    pub fn standard() -> &'static CountryMap {
        &STANDARD
    }

    /// Canonicalize a display name to its country code, or return the input
    /// unchanged when it is not in the map.
    pub fn canonical(&self, name: &str) -> String {
        match self.entries.get(name) {
            Some(code) => code.clone(),
            None => name.to_string(),
        }
    }
}
