//! Sort engine.
//!
//! Four named orderings, selected by the token the sort control sends. Text
//! orderings compare a collation key: the string is NFKD-decomposed, combining
//! marks are dropped and the rest is lowercased, so "Émile" sorts with "emile"
//! and "apple" before "Banana". Equal keys fall back to the raw strings.
//!
//! The sort is stable: records that compare equal keep their input order.

use crate::model::Publication;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Named ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    YearDesc,
    YearAsc,
    TitleAsc,
    VenueAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::YearDesc,
        SortKey::YearAsc,
        SortKey::TitleAsc,
        SortKey::VenueAsc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::YearDesc => "year-desc",
            SortKey::YearAsc => "year-asc",
            SortKey::TitleAsc => "title-asc",
            SortKey::VenueAsc => "venue-asc",
        }
    }

    /// Comparator for this ordering.
    pub fn compare(self, a: &Publication, b: &Publication) -> Ordering {
        match self {
            SortKey::YearDesc => b.year.cmp(&a.year),
            SortKey::YearAsc => a.year.cmp(&b.year),
            SortKey::TitleAsc => collate(&a.title, &b.title),
            SortKey::VenueAsc => collate(a.venue.sort_name(), b.venue.sort_name()),
        }
    }

    /// Sort a working sequence by this ordering.
    pub fn apply<'a>(self, mut publications: Vec<&'a Publication>) -> Vec<&'a Publication> {
        publications.sort_by(|a, b| self.compare(a, b));
        publications
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown sort key '{s}'"))
    }
}

/// Sort by the ordering named `token`. Unknown tokens leave the input as is.
pub fn sort<'a>(publications: Vec<&'a Publication>, token: &str) -> Vec<&'a Publication> {
    match token.parse::<SortKey>() {
        Ok(key) => key.apply(publications),
        Err(_) => {
            debug!(token, "Unknown sort key, keeping input order");
            publications
        }
    }
}

fn collation_key(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accent- and case-insensitive string comparison.
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}
