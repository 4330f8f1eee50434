//! Publication records as they appear in the dataset.
//!
//! Records are immutable value objects deserialized once per load. Field names
//! follow the dataset's camelCase JSON (`isPrimaryUser`, `fullName`, `codeROS`).
//!
//! ## Best-effort fields
//!
//! The dataset is hand-curated, so nested fields go missing. Every field here
//! deserializes with a default instead of rejecting the record, and the
//! rendering fallbacks live in dedicated resolution methods rather than in the
//! templates:
//!
//! | Field | Resolution |
//! |-------|------------|
//! | venue label | [`Venue::display_name`]: acronym → full name |
//! | venue sort key | [`Venue::sort_name`]: full name → acronym |
//! | thumbnail | [`Publication::thumbnail_src`]: `static` → placeholder |
//! | thumbnail alt | [`Publication::thumbnail_alt`]: `alt` → default text |
//! | award badge | [`Publication::first_award`]: first non-empty entry only |
//! | link buttons | [`Links::ordered`]: fixed order, paper wins over preprint |

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing key.
///
/// `#[serde(default)]` only covers absent keys; hand-edited datasets also
/// write `"venue": null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A single publication.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Publication {
    /// Unique within the dataset; used for the `pub-{id}` anchor.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub authors: Vec<Author>,
    #[serde(deserialize_with = "null_as_default")]
    pub year: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub venue: Venue,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Links,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awards: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Publication {
    /// Stable document anchor for the card.
    pub fn anchor(&self) -> String {
        format!("pub-{}", self.id)
    }

    pub fn is_featured(&self) -> bool {
        self.featured == Some(true)
    }

    pub fn has_awards(&self) -> bool {
        self.awards.as_ref().is_some_and(|a| !a.is_empty())
    }

    /// The award shown on the card. Only the first entry is ever displayed.
    pub fn first_award(&self) -> Option<&str> {
        self.awards
            .as_ref()
            .and_then(|a| a.first())
            .map(String::as_str)
    }

    /// Static thumbnail URL, or `placeholder` when absent or empty.
    pub fn thumbnail_src<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.thumbnail
            .as_ref()
            .and_then(|t| t.static_src.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(placeholder)
    }

    /// Thumbnail alt text, or `fallback` when absent or empty.
    pub fn thumbnail_alt<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.thumbnail
            .as_ref()
            .and_then(|t| t.alt.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(fallback)
    }

    /// Animated overlay URL, if any.
    pub fn thumbnail_overlay(&self) -> Option<&str> {
        self.thumbnail
            .as_ref()
            .and_then(|t| t.animated.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn has_author(&self, name: &str) -> bool {
        self.authors.iter().any(|a| a.name == name)
    }
}

/// Publication author. Identity is the name string alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Author {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Marks the page owner, rendered with a distinct style.
    #[serde(deserialize_with = "null_as_default")]
    pub is_primary_user: bool,
}

impl Author {
    pub fn website(&self) -> Option<&str> {
        self.website.as_deref().filter(|w| !w.is_empty())
    }
}

/// Publication venue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Venue {
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acronym: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<VenueType>,
}

impl Venue {
    fn acronym(&self) -> Option<&str> {
        self.acronym.as_deref().filter(|a| !a.is_empty())
    }

    /// Label shown on the card: acronym when present, else the full name.
    pub fn display_name(&self) -> &str {
        self.acronym().unwrap_or(&self.full_name)
    }

    /// Key for venue ordering: full name when present, else the acronym.
    pub fn sort_name(&self) -> &str {
        if self.full_name.is_empty() {
            self.acronym().unwrap_or("")
        } else {
            &self.full_name
        }
    }
}

/// Declared venue classification. Unrecognised values collapse into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
    Conference,
    Journal,
    Workshop,
    #[serde(other)]
    Other,
}

/// Link buttons attached to a publication.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "codeROS", skip_serializing_if = "Option::is_none")]
    pub code_ros: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bibtex: Option<String>,
}

/// Kinds of link button, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Publication,
    Preprint,
    Code,
    CodeRos,
    Video,
    Project,
    Dataset,
    Bibtex,
}

impl LinkKind {
    pub fn label(self) -> &'static str {
        match self {
            LinkKind::Publication => "📄 Paper",
            LinkKind::Preprint => "📄 Preprint",
            LinkKind::Code => "💻 Code",
            LinkKind::CodeRos => "🤖 ROS Package",
            LinkKind::Video => "🎥 Video",
            LinkKind::Project => "🌐 Project Site",
            LinkKind::Dataset => "📊 Dataset",
            LinkKind::Bibtex => "📋 BibTeX",
        }
    }
}

impl Links {
    /// Present links in display order.
    ///
    /// Publication and preprint are mutually exclusive: the published version
    /// wins and the preprint is dropped.
    pub fn ordered(&self) -> Vec<(LinkKind, &str)> {
        fn present(url: &Option<String>) -> Option<&str> {
            url.as_deref().filter(|u| !u.is_empty())
        }

        let paper = present(&self.publication)
            .map(|u| (LinkKind::Publication, u))
            .or_else(|| present(&self.preprint).map(|u| (LinkKind::Preprint, u)));

        let rest = [
            (LinkKind::Code, &self.code),
            (LinkKind::CodeRos, &self.code_ros),
            (LinkKind::Video, &self.video),
            (LinkKind::Project, &self.project),
            (LinkKind::Dataset, &self.dataset),
            (LinkKind::Bibtex, &self.bibtex),
        ];

        paper
            .into_iter()
            .chain(
                rest.into_iter()
                    .filter_map(|(kind, url)| present(url).map(|u| (kind, u))),
            )
            .collect()
    }
}

/// Thumbnail images.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    #[serde(rename = "static", skip_serializing_if = "Option::is_none")]
    pub static_src: Option<String>,
    /// Decorative overlay, hidden from assistive technology.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}
