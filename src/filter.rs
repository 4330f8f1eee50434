//! Filter engine.
//!
//! Criteria have three slots: publication type, author, and year. A slot is
//! either "all" (no constraint) or a concrete value; a record passes when it
//! satisfies every constrained slot.
//!
//! ## Venue classification is a heuristic
//!
//! Most datasets never fill in `venue.type`, so the conference / journal /
//! workshop filters fall back to string matching through
//! [`VenueClassifier`]:
//!
//! 1. a declared `venue.type` equal to the requested kind matches;
//! 2. otherwise the full venue name matches if it contains the kind's keyword
//!    (case-insensitive), e.g. "IEEE **Workshop** on Robotics";
//! 3. for conferences only, a venue whose acronym is on the allow-list matches.
//!
//! This is a best-effort guess, not an authoritative classification. A venue
//! can match more than one kind, and a conference called "Symposium on X"
//! without an allow-listed acronym or declared type will match none. The
//! allow-list is configuration (`[classifier]`), not code.

use crate::config::ClassifierConfig;
use crate::model::{Publication, VenueType};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Token meaning "no constraint" in every slot.
pub const ALL: &str = "all";

/// Publication-type slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Award,
    Conference,
    Journal,
    Workshop,
}

impl TypeFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeFilter::All => ALL,
            TypeFilter::Award => "award",
            TypeFilter::Conference => "conference",
            TypeFilter::Journal => "journal",
            TypeFilter::Workshop => "workshop",
        }
    }

    /// Parse a select value. Unknown tokens impose no constraint.
    pub fn from_token(token: &str) -> Self {
        token.parse().unwrap_or_else(|_| {
            debug!(token, "Unknown type filter, showing all");
            TypeFilter::All
        })
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TypeFilter::All),
            "award" => Ok(TypeFilter::Award),
            "conference" => Ok(TypeFilter::Conference),
            "journal" => Ok(TypeFilter::Journal),
            "workshop" => Ok(TypeFilter::Workshop),
            other => Err(format!("unknown publication type '{other}'")),
        }
    }
}

/// The three filter slots. `None` in a text slot means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub kind: TypeFilter,
    pub author: Option<String>,
    /// Raw select value; compared as an integer.
    ///
    /// The whole trimmed value must parse: `" 2021 "` selects 2021, while
    /// `"2021abc"` is non-numeric and matches nothing. There is no
    /// leading-digits fallback.
    pub year: Option<String>,
}

impl FilterCriteria {
    /// Criteria that let everything through.
    pub fn all() -> Self {
        Self::default()
    }

    /// Normalize a select value for a text slot: `"all"` clears it.
    pub fn slot(value: &str) -> Option<String> {
        (value != ALL).then(|| value.to_string())
    }

    pub fn is_unconstrained(&self) -> bool {
        self.kind == TypeFilter::All && self.author.is_none() && self.year.is_none()
    }

    /// Whether `publication` satisfies every constrained slot.
    pub fn matches(&self, publication: &Publication, classifier: &VenueClassifier) -> bool {
        let kind_ok = match self.kind {
            TypeFilter::All => true,
            TypeFilter::Award => publication.has_awards(),
            TypeFilter::Conference => classifier.is(publication, VenueType::Conference),
            TypeFilter::Journal => classifier.is(publication, VenueType::Journal),
            TypeFilter::Workshop => classifier.is(publication, VenueType::Workshop),
        };
        let author_ok = self
            .author
            .as_deref()
            .is_none_or(|name| publication.has_author(name));
        let year_ok = self.year.as_deref().is_none_or(|y| {
            // Non-numeric input, including trailing garbage, matches nothing.
            y.trim().parse::<i32>().is_ok_and(|y| y == publication.year)
        });
        kind_ok && author_ok && year_ok
    }
}

/// Best-effort venue classifier. See the module docs.
#[derive(Debug, Clone)]
pub struct VenueClassifier {
    conference_acronyms: Vec<String>,
}

impl Default for VenueClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

impl VenueClassifier {
    pub fn new(conference_acronyms: Vec<String>) -> Self {
        Self {
            conference_acronyms,
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.conference_acronyms.clone())
    }

    fn keyword(kind: VenueType) -> Option<&'static str> {
        match kind {
            VenueType::Conference => Some("conference"),
            VenueType::Journal => Some("journal"),
            VenueType::Workshop => Some("workshop"),
            VenueType::Other => None,
        }
    }

    /// Whether the publication's venue looks like `kind`.
    pub fn is(&self, publication: &Publication, kind: VenueType) -> bool {
        let venue = &publication.venue;
        if venue.kind == Some(kind) {
            return true;
        }
        let name_matches = Self::keyword(kind)
            .is_some_and(|keyword| venue.full_name.to_lowercase().contains(keyword));
        if name_matches {
            return true;
        }
        kind == VenueType::Conference
            && venue
                .acronym
                .as_deref()
                .is_some_and(|a| self.conference_acronyms.iter().any(|known| known == a))
    }

    /// Every kind the venue is classified as, in declaration order.
    pub fn kinds(&self, publication: &Publication) -> Vec<VenueType> {
        [
            VenueType::Conference,
            VenueType::Journal,
            VenueType::Workshop,
        ]
        .into_iter()
        .filter(|k| self.is(publication, *k))
        .collect()
    }
}

/// Keep the records satisfying `criteria`, in input order.
pub fn filter<'a>(
    publications: &'a [Publication],
    criteria: &FilterCriteria,
    classifier: &VenueClassifier,
) -> Vec<&'a Publication> {
    publications
        .iter()
        .filter(|p| criteria.matches(p, classifier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Venue;
    use crate::test_helpers::*;

    fn venue(full_name: &str, acronym: Option<&str>, kind: Option<VenueType>) -> Venue {
        Venue {
            full_name: full_name.to_string(),
            acronym: acronym.map(String::from),
            kind,
        }
    }

    fn ids<'a>(pubs: &[&'a Publication]) -> Vec<&'a str> {
        pubs.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn all_criteria_keep_everything() {
        let pubs = vec![publication("a", 2020, "A"), publication("b", 2021, "B")];
        let out = filter(&pubs, &FilterCriteria::all(), &VenueClassifier::default());
        assert_eq!(ids(&out), vec!["a", "b"]);
    }

    #[test]
    fn award_filter_requires_non_empty_awards() {
        let mut won = publication("won", 2020, "Won");
        won.awards = Some(vec!["Best Paper".into()]);
        let mut empty = publication("empty", 2020, "Empty");
        empty.awards = Some(vec![]);
        let plain = publication("plain", 2020, "Plain");
        let pubs = vec![won, empty, plain];

        let criteria = FilterCriteria {
            kind: TypeFilter::Award,
            ..Default::default()
        };
        let out = filter(&pubs, &criteria, &VenueClassifier::default());
        assert_eq!(ids(&out), vec!["won"]);
    }

    #[test]
    fn workshop_matches_by_full_name_without_type() {
        let mut p = publication("w", 2022, "W");
        p.venue = venue("IEEE Workshop on Robotics", None, None);
        let pubs = vec![p];
        let criteria = FilterCriteria {
            kind: TypeFilter::Workshop,
            ..Default::default()
        };
        assert_eq!(filter(&pubs, &criteria, &VenueClassifier::default()).len(), 1);
    }

    #[test]
    fn declared_type_matches() {
        let mut p = publication("j", 2022, "J");
        p.venue = venue("Science Robotics", None, Some(VenueType::Journal));
        let classifier = VenueClassifier::default();
        assert!(classifier.is(&p, VenueType::Journal));
        assert!(!classifier.is(&p, VenueType::Conference));
    }

    #[test]
    fn conference_matches_allow_listed_acronym() {
        let mut p = publication("c", 2022, "C");
        p.venue = venue("Robotics: Science and Systems", Some("RSS"), None);
        let classifier = VenueClassifier::default();
        assert!(classifier.is(&p, VenueType::Conference));
        // The allow-list only applies to conferences.
        assert!(!classifier.is(&p, VenueType::Journal));
    }

    #[test]
    fn allow_list_is_configurable() {
        let mut p = publication("c", 2022, "C");
        p.venue = venue("Neural Information Processing Systems", Some("NeurIPS"), None);
        assert!(!VenueClassifier::default().is(&p, VenueType::Conference));
        let custom = VenueClassifier::new(vec!["NeurIPS".into()]);
        assert!(custom.is(&p, VenueType::Conference));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let mut p = publication("j", 2022, "J");
        p.venue = venue("THE INTERNATIONAL JOURNAL OF ROBOTICS RESEARCH", Some("IJRR"), None);
        assert!(VenueClassifier::default().is(&p, VenueType::Journal));
    }

    #[test]
    fn author_filter_is_exact() {
        let pubs = vec![
            with_authors(publication("a", 2020, "A"), &["Ada Lovelace", "Bo"]),
            with_authors(publication("b", 2020, "B"), &["ada lovelace"]),
        ];
        let criteria = FilterCriteria {
            author: Some("Ada Lovelace".into()),
            ..Default::default()
        };
        let out = filter(&pubs, &criteria, &VenueClassifier::default());
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn year_filter_compares_integers() {
        let pubs = vec![publication("a", 2020, "A"), publication("b", 2021, "B")];
        let criteria = FilterCriteria {
            year: Some(" 2021".into()),
            ..Default::default()
        };
        let out = filter(&pubs, &criteria, &VenueClassifier::default());
        assert_eq!(ids(&out), vec!["b"]);
    }

    #[test]
    fn non_numeric_year_matches_nothing() {
        let pubs = vec![publication("a", 2020, "A")];
        let criteria = FilterCriteria {
            year: Some("twenty".into()),
            ..Default::default()
        };
        assert!(filter(&pubs, &criteria, &VenueClassifier::default()).is_empty());
    }

    #[test]
    fn year_with_trailing_text_matches_nothing() {
        let pubs = vec![publication("a", 2021, "A")];
        let criteria = FilterCriteria {
            year: Some("2021abc".into()),
            ..Default::default()
        };
        assert!(filter(&pubs, &criteria, &VenueClassifier::default()).is_empty());
    }

    #[test]
    fn slots_combine_with_and() {
        let mut a = with_authors(publication("a", 2020, "A"), &["Ada"]);
        a.venue = venue("Some Journal", None, None);
        let mut b = with_authors(publication("b", 2020, "B"), &["Ada"]);
        b.venue = venue("Some Conference", None, None);
        let c = with_authors(publication("c", 2021, "C"), &["Ada"]);
        let pubs = vec![a, b, c];

        let criteria = FilterCriteria {
            kind: TypeFilter::Journal,
            author: Some("Ada".into()),
            year: Some("2020".into()),
        };
        let out = filter(&pubs, &criteria, &VenueClassifier::default());
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn unknown_type_token_is_unconstrained() {
        assert_eq!(TypeFilter::from_token("preprint"), TypeFilter::All);
        assert_eq!(TypeFilter::from_token("journal"), TypeFilter::Journal);
    }

    #[test]
    fn all_token_clears_slot() {
        assert_eq!(FilterCriteria::slot("all"), None);
        assert_eq!(FilterCriteria::slot("2020"), Some("2020".into()));
    }

    #[test]
    fn kinds_lists_every_match() {
        let mut p = publication("x", 2020, "X");
        p.venue = venue("Workshop at the Conference on Robot Learning", None, None);
        assert_eq!(
            VenueClassifier::default().kinds(&p),
            vec![VenueType::Conference, VenueType::Workshop]
        );
    }
}
