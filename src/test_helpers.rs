//! Shared test utilities for the publist test suite.
//!
//! Record builders keep tests focused on the field under test.
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let pubs = vec![
//!     publication("a", 2020, "Zed"),
//!     with_authors(publication("b", 2022, "Ann"), &["Ada"]),
//! ];
//! assert_eq!(doc.card_ids(ElementId::Results), vec!["b", "a"]);
//! ```

use crate::model::{Author, Publication};

/// A minimal record: id, year and title, everything else defaulted.
pub fn publication(id: &str, year: i32, title: &str) -> Publication {
    Publication {
        id: id.to_string(),
        title: title.to_string(),
        year,
        ..Default::default()
    }
}

/// Replace the author list with plain (unlinked, non-primary) authors.
pub fn with_authors(mut publication: Publication, names: &[&str]) -> Publication {
    publication.authors = names
        .iter()
        .map(|name| Author {
            name: name.to_string(),
            ..Default::default()
        })
        .collect();
    publication
}
