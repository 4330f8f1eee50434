//! Publication card rendering.
//!
//! Pure functions from records to markup, built with
//! [maud](https://maud.lambda.xyz/). All interpolated text and URLs are
//! escaped by maud, so a title containing `<script>` renders as text.
//!
//! ## Card structure
//!
//! ```text
//! article.publication-card#pub-{id}
//! ├── div.publication-thumbnail    static image (or placeholder) + animated overlay
//! └── div.publication-content
//!     ├── h3.publication-title
//!     ├── div.publication-authors  "A, B, C", linked when a website is known
//!     ├── div.publication-venue    acronym-or-name + year
//!     ├── div.publication-award    first award only
//!     └── div.publication-links    fixed-order link buttons
//! ```
//!
//! Missing fields never drop a card; each has a fallback (see [`crate::model`]).

use crate::config::RenderConfig;
use crate::model::{Author, Links, Publication};
use maud::{Markup, html};

/// Text of the empty-result placeholder.
pub const NO_RESULTS: &str = "No publications found";
/// Text of the load-failure placeholder.
pub const LOAD_FAILED: &str = "Failed to load publications";

/// Markup plus the number of cards it contains.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub markup: Markup,
    pub count: usize,
}

impl Rendered {
    pub fn into_string(self) -> String {
        self.markup.into_string()
    }
}

/// Card renderer carrying the per-site fallbacks.
#[derive(Debug, Clone)]
pub struct Renderer {
    placeholder_thumbnail: String,
    thumbnail_alt: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            placeholder_thumbnail: config.placeholder_thumbnail.clone(),
            thumbnail_alt: config.thumbnail_alt.clone(),
        }
    }

    /// Render the working sequence. An empty sequence renders the
    /// "no results" placeholder and a count of zero.
    pub fn render(&self, publications: &[&Publication]) -> Rendered {
        if publications.is_empty() {
            return Rendered {
                markup: no_results(),
                count: 0,
            };
        }
        let markup = html! {
            @for publication in publications {
                (self.card(publication))
            }
        };
        Rendered {
            markup,
            count: publications.len(),
        }
    }

    /// Render one publication card.
    pub fn card(&self, publication: &Publication) -> Markup {
        html! {
            article.publication-card id=(publication.anchor()) {
                div.publication-thumbnail {
                    img src=(publication.thumbnail_src(&self.placeholder_thumbnail))
                        alt=(publication.thumbnail_alt(&self.thumbnail_alt))
                        loading="lazy";
                    @if let Some(animated) = publication.thumbnail_overlay() {
                        img.thumbnail-animated src=(animated) alt="" loading="lazy" aria-hidden="true";
                    }
                }
                div.publication-content {
                    h3.publication-title { (publication.title) }
                    div.publication-authors {
                        (render_authors(&publication.authors))
                    }
                    div.publication-venue {
                        strong { (publication.venue.display_name()) }
                        span { (publication.year) }
                    }
                    @if let Some(award) = publication.first_award() {
                        div.publication-award { (award) }
                    }
                    div.publication-links {
                        (render_links(&publication.links))
                    }
                }
            }
        }
    }
}

/// One author: a link when a website is known, plain text otherwise.
pub fn render_author(author: &Author) -> Markup {
    let class = author.is_primary_user.then_some("author-primary");
    html! {
        @if let Some(website) = author.website() {
            a href=(website) target="_blank" rel="noopener noreferrer" class=[class] { (author.name) }
        } @else {
            span class=[class] { (author.name) }
        }
    }
}

/// Comma-separated author list.
pub fn render_authors(authors: &[Author]) -> Markup {
    html! {
        @for (i, author) in authors.iter().enumerate() {
            @if i > 0 { ", " }
            (render_author(author))
        }
    }
}

/// Link buttons in display order.
pub fn render_links(links: &Links) -> Markup {
    html! {
        @for (kind, url) in links.ordered() {
            a.publication-link href=(url) target="_blank" rel="noopener noreferrer" {
                (kind.label())
            }
        }
    }
}

pub fn no_results() -> Markup {
    html! { div.no-results { (NO_RESULTS) } }
}

pub fn load_failed() -> Markup {
    html! { div.no-results { (LOAD_FAILED) } }
}

/// Status line for the assistive-technology announcement region.
pub fn status_message(count: usize) -> String {
    format!("Showing {count} publications")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Thumbnail, Venue};
    use crate::test_helpers::*;

    fn full_publication() -> Publication {
        let mut p = publication("flip", 2023, "Learning to Flip");
        p.authors = vec![
            Author {
                name: "Ada".into(),
                website: Some("https://ada.dev".into()),
                is_primary_user: true,
            },
            Author {
                name: "Bo".into(),
                website: None,
                is_primary_user: false,
            },
        ];
        p.venue = Venue {
            full_name: "Robotics: Science and Systems".into(),
            acronym: Some("RSS".into()),
            kind: None,
        };
        p.links = Links {
            publication: Some("https://doi.org/1".into()),
            preprint: Some("https://arxiv.org/abs/1".into()),
            code: Some("https://github.com/x".into()),
            ..Default::default()
        };
        p.awards = Some(vec!["Best Paper".into(), "Best Demo".into()]);
        p.thumbnail = Some(Thumbnail {
            static_src: Some("/img/flip.png".into()),
            animated: Some("/img/flip.gif".into()),
            alt: Some("A robot flipping".into()),
        });
        p
    }

    #[test]
    fn empty_sequence_renders_placeholder() {
        let rendered = Renderer::default().render(&[]);
        assert_eq!(rendered.count, 0);
        assert_eq!(
            rendered.into_string(),
            r#"<div class="no-results">No publications found</div>"#
        );
    }

    #[test]
    fn card_has_anchor_and_title() {
        let p = full_publication();
        let html = Renderer::default().card(&p).into_string();
        assert!(html.starts_with(r#"<article class="publication-card" id="pub-flip">"#));
        assert!(html.contains(r#"<h3 class="publication-title">Learning to Flip</h3>"#));
    }

    #[test]
    fn card_thumbnail_and_overlay() {
        let p = full_publication();
        let html = Renderer::default().card(&p).into_string();
        assert!(html.contains(r#"src="/img/flip.png" alt="A robot flipping" loading="lazy""#));
        assert!(html.contains(
            r#"<img class="thumbnail-animated" src="/img/flip.gif" alt="" loading="lazy" aria-hidden="true">"#
        ));
    }

    #[test]
    fn missing_thumbnail_uses_placeholder() {
        let p = publication("bare", 2020, "Bare");
        let html = Renderer::default().card(&p).into_string();
        assert!(html.contains(r#"src="/assets/images/publication-placeholder.svg""#));
        assert!(html.contains(r#"alt="Publication thumbnail""#));
        assert!(!html.contains("thumbnail-animated"));
    }

    #[test]
    fn placeholder_comes_from_config() {
        let config = RenderConfig {
            placeholder_thumbnail: "/static/none.png".into(),
            thumbnail_alt: "Cover".into(),
        };
        let html = Renderer::new(&config)
            .card(&publication("bare", 2020, "Bare"))
            .into_string();
        assert!(html.contains(r#"src="/static/none.png" alt="Cover""#));
    }

    #[test]
    fn authors_linked_and_marked() {
        let p = full_publication();
        let html = render_authors(&p.authors).into_string();
        assert_eq!(
            html,
            r#"<a href="https://ada.dev" target="_blank" rel="noopener noreferrer" class="author-primary">Ada</a>, <span>Bo</span>"#
        );
    }

    #[test]
    fn venue_line_prefers_acronym() {
        let p = full_publication();
        let html = Renderer::default().card(&p).into_string();
        assert!(html.contains(
            r#"<div class="publication-venue"><strong>RSS</strong><span>2023</span></div>"#
        ));
    }

    #[test]
    fn only_first_award_shown() {
        let p = full_publication();
        let html = Renderer::default().card(&p).into_string();
        assert!(html.contains(r#"<div class="publication-award">Best Paper</div>"#));
        assert!(!html.contains("Best Demo"));
    }

    #[test]
    fn no_award_badge_without_awards() {
        let html = Renderer::default()
            .card(&publication("a", 2020, "A"))
            .into_string();
        assert!(!html.contains("publication-award"));
    }

    #[test]
    fn links_rendered_in_order_paper_over_preprint() {
        let p = full_publication();
        let html = render_links(&p.links).into_string();
        assert!(html.contains("📄 Paper"));
        assert!(!html.contains("Preprint"));
        let paper = html.find("Paper").unwrap();
        let code = html.find("Code").unwrap();
        assert!(paper < code);
    }

    #[test]
    fn render_counts_cards() {
        let pubs = vec![publication("a", 2020, "A"), publication("b", 2021, "B")];
        let refs: Vec<&Publication> = pubs.iter().collect();
        let rendered = Renderer::default().render(&refs);
        assert_eq!(rendered.count, 2);
        assert_eq!(rendered.into_string().matches("<article").count(), 2);
    }

    #[test]
    fn text_is_escaped() {
        let p = publication("x", 2020, "<script>alert('xss')</script>");
        let html = Renderer::default().card(&p).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn status_message_counts() {
        assert_eq!(status_message(7), "Showing 7 publications");
    }
}
