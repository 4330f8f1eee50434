//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every publication is listed by positional index and title, with venue,
//! authors, classification and links as indented context lines:
//!
//! ```text
//! Publications
//! 001 Learning to Flip (2023)
//!     Id: flip
//!     Venue: RSS (conference)
//!     Authors: Ada*, Bo
//!     Award: Best Paper
//!     Links: Paper, Code
//! 002 Mapping the Unknown (2021)
//!     Id: slam
//!     Venue: Journal of Field Robotics (journal)
//!     Authors: Ada*
//!
//! 2 publications, 1 featured, 1 with awards, 2019-2023
//! ```
//!
//! The primary user is marked with `*`.
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::filter::VenueClassifier;
use crate::model::{LinkKind, Publication, VenueType};
use crate::render;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line: index, title and year. Untitled records show their id.
fn entity_header(index: usize, publication: &Publication) -> String {
    let title = if publication.title.is_empty() {
        format!("({})", publication.id)
    } else {
        publication.title.clone()
    };
    format!("{} {} ({})", format_index(index), title, publication.year)
}

fn kind_name(kind: VenueType) -> &'static str {
    match kind {
        VenueType::Conference => "conference",
        VenueType::Journal => "journal",
        VenueType::Workshop => "workshop",
        VenueType::Other => "other",
    }
}

/// Button label without its icon, e.g. "Paper".
fn link_name(kind: LinkKind) -> &'static str {
    let label = kind.label();
    label.split_once(' ').map_or(label, |(_, name)| name)
}

// ============================================================================
// Check output
// ============================================================================

/// Format the dataset inventory printed by `check`.
pub fn format_check_output(
    publications: &[Publication],
    classifier: &VenueClassifier,
) -> Vec<String> {
    let mut lines = vec!["Publications".to_string()];
    let ctx = indent(1);

    for (i, p) in publications.iter().enumerate() {
        lines.push(entity_header(i + 1, p));
        lines.push(format!("{ctx}Id: {}", p.id));

        let kinds: Vec<&str> = classifier.kinds(p).into_iter().map(kind_name).collect();
        let venue = p.venue.display_name();
        match (venue.is_empty(), kinds.is_empty()) {
            (true, _) => lines.push(format!("{ctx}Venue: (none)")),
            (false, true) => lines.push(format!("{ctx}Venue: {venue}")),
            (false, false) => {
                lines.push(format!("{ctx}Venue: {venue} ({})", kinds.join(", ")))
            }
        }

        if !p.authors.is_empty() {
            let authors: Vec<String> = p
                .authors
                .iter()
                .map(|a| {
                    if a.is_primary_user {
                        format!("{}*", a.name)
                    } else {
                        a.name.clone()
                    }
                })
                .collect();
            lines.push(format!("{ctx}Authors: {}", authors.join(", ")));
        }
        if let Some(award) = p.first_award() {
            lines.push(format!("{ctx}Award: {award}"));
        }
        let links: Vec<&str> = p
            .links
            .ordered()
            .into_iter()
            .map(|(kind, _)| link_name(kind))
            .collect();
        if !links.is_empty() {
            lines.push(format!("{ctx}Links: {}", links.join(", ")));
        }
    }

    lines.push(String::new());
    lines.push(summary_line(publications));
    lines
}

/// One-line dataset summary.
pub fn summary_line(publications: &[Publication]) -> String {
    let featured = publications.iter().filter(|p| p.is_featured()).count();
    let awarded = publications.iter().filter(|p| p.has_awards()).count();
    let years = publications.iter().map(|p| p.year);
    let span = match (years.clone().min(), years.max()) {
        (Some(lo), Some(hi)) if lo == hi => format!(", {lo}"),
        (Some(lo), Some(hi)) => format!(", {lo}-{hi}"),
        _ => String::new(),
    };
    format!(
        "{} publications, {} featured, {} with awards{}",
        publications.len(),
        featured,
        awarded,
        span
    )
}

pub fn print_check_output(publications: &[Publication], classifier: &VenueClassifier) {
    for line in format_check_output(publications, classifier) {
        println!("{}", line);
    }
}

// ============================================================================
// Render output
// ============================================================================

/// Summary printed to stderr after `render`, next to the announcement text.
pub fn format_render_summary(shown: usize, total: usize, view: Option<&str>) -> Vec<String> {
    let mut lines = vec![render::status_message(shown)];
    if shown < total {
        lines.push(format!("{}{} of {} match the filters", indent(1), shown, total));
    }
    if let Some(view) = view {
        lines.push(format!("{}View: {}", indent(1), view));
    }
    lines
}

pub fn print_render_summary(shown: usize, total: usize, view: Option<&str>) {
    for line in format_render_summary(shown, total, view) {
        eprintln!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Author, Links};
    use crate::test_helpers::*;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(123), "123");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn untitled_header_shows_id() {
        let p = publication("no-title", 2020, "");
        assert_eq!(entity_header(3, &p), "003 (no-title) (2020)");
    }

    #[test]
    fn link_name_strips_icon() {
        assert_eq!(link_name(LinkKind::CodeRos), "ROS Package");
        assert_eq!(link_name(LinkKind::Bibtex), "BibTeX");
    }

    #[test]
    fn check_output_lists_context_lines() {
        let mut p = publication("flip", 2023, "Learning to Flip");
        p.venue.acronym = Some("RSS".into());
        p.authors = vec![
            Author {
                name: "Ada".into(),
                website: None,
                is_primary_user: true,
            },
            Author {
                name: "Bo".into(),
                website: None,
                is_primary_user: false,
            },
        ];
        p.awards = Some(vec!["Best Paper".into()]);
        p.links = Links {
            publication: Some("https://doi.org/x".into()),
            code: Some("https://github.com/x".into()),
            ..Default::default()
        };

        let lines = format_check_output(&[p], &VenueClassifier::default());
        assert_eq!(
            lines,
            vec![
                "Publications",
                "001 Learning to Flip (2023)",
                "    Id: flip",
                "    Venue: RSS (conference)",
                "    Authors: Ada*, Bo",
                "    Award: Best Paper",
                "    Links: Paper, Code",
                "",
                "1 publications, 0 featured, 1 with awards, 2023",
            ]
        );
    }

    #[test]
    fn check_output_missing_venue() {
        let lines = format_check_output(
            &[publication("x", 2020, "X")],
            &VenueClassifier::default(),
        );
        assert!(lines.contains(&"    Venue: (none)".to_string()));
    }

    #[test]
    fn summary_spans_years() {
        let pubs = vec![publication("a", 2019, "A"), publication("b", 2023, "B")];
        assert_eq!(
            summary_line(&pubs),
            "2 publications, 0 featured, 0 with awards, 2019-2023"
        );
        assert_eq!(summary_line(&[]), "0 publications, 0 featured, 0 with awards");
    }

    #[test]
    fn render_summary_mentions_filtering() {
        assert_eq!(
            format_render_summary(2, 5, Some("grid")),
            vec!["Showing 2 publications", "    2 of 5 match the filters", "    View: grid"]
        );
        assert_eq!(format_render_summary(5, 5, None), vec!["Showing 5 publications"]);
    }
}
