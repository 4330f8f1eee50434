//! Host document abstraction.
//!
//! The pipeline and the view controller never own the page. They talk to it
//! through [`Document`]: look up a fixed set of elements, replace content,
//! toggle classes and attributes, read card geometry and write inline card
//! styles. A missing element is not an error; setters report `false` and the
//! caller skips the dependent feature.
//!
//! [`MemoryDocument`] is a complete in-process implementation. It keeps
//! element state in maps and simulates the two layouts of the results
//! container (a single stacked column for list view, a fixed-column grid when
//! the container carries `view-grid`) so geometry-driven code can run in
//! tests and from the CLI.

use std::collections::{BTreeMap, BTreeSet};

/// Elements the core knows about, by their DOM id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    SortSelect,
    FilterSelect,
    AuthorSelect,
    YearSelect,
    ViewList,
    ViewGrid,
    Results,
    Featured,
    Count,
    StatTotal,
    Announcement,
}

impl ElementId {
    pub const ALL: [ElementId; 11] = [
        ElementId::SortSelect,
        ElementId::FilterSelect,
        ElementId::AuthorSelect,
        ElementId::YearSelect,
        ElementId::ViewList,
        ElementId::ViewGrid,
        ElementId::Results,
        ElementId::Featured,
        ElementId::Count,
        ElementId::StatTotal,
        ElementId::Announcement,
    ];

    pub fn dom_id(self) -> &'static str {
        match self {
            ElementId::SortSelect => "sort-select",
            ElementId::FilterSelect => "filter-select",
            ElementId::AuthorSelect => "author-select",
            ElementId::YearSelect => "year-select",
            ElementId::ViewList => "view-list",
            ElementId::ViewGrid => "view-grid",
            ElementId::Results => "publications-container",
            ElementId::Featured => "featured-publications",
            ElementId::Count => "publication-count",
            ElementId::StatTotal => "stat-total",
            ElementId::Announcement => "filter-announcement",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.dom_id() == id)
    }
}

/// Bounding box of a rendered card, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Inline style overrides written on a card during a view transition.
///
/// `None` means the property is not set inline and layout uses the
/// stylesheet value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    pub transition: Option<String>,
    pub transform: Option<String>,
    pub transform_origin: Option<String>,
    pub position: Option<String>,
    pub z_index: Option<String>,
}

impl InlineStyle {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The page, as seen by the pipeline and view controller.
pub trait Document {
    fn has_element(&self, id: ElementId) -> bool;

    /// Replace the element's children with `html`.
    fn set_inner_html(&mut self, id: ElementId, html: &str) -> bool;

    fn set_text(&mut self, id: ElementId, text: &str) -> bool;

    fn set_class(&mut self, id: ElementId, class: &str, present: bool) -> bool;

    fn has_class(&self, id: ElementId, class: &str) -> bool;

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> bool;

    /// Broadcast a named event to other modules on the page.
    fn dispatch(&mut self, event: &str);

    /// Number of cards currently inside the results container.
    fn card_count(&self) -> usize;

    /// Layout box of the card at `index` under the current layout.
    fn card_rect(&self, index: usize) -> Option<Rect>;

    /// Overwrite the inline overrides of the card at `index`.
    fn set_card_style(&mut self, index: usize, style: &InlineStyle);

    /// Force a synchronous layout pass so pending style writes are painted.
    fn flush_layout(&mut self);
}

/// Class on the results container that selects the grid layout.
pub const GRID_CLASS: &str = "view-grid";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub html: String,
    pub text: String,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
}

/// Geometry of the simulated layouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub viewport_width: f64,
    pub gap: f64,
    pub list_card_height: f64,
    pub grid_columns: usize,
    pub grid_card_height: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            viewport_width: 1200.0,
            gap: 24.0,
            list_card_height: 180.0,
            grid_columns: 3,
            grid_card_height: 420.0,
        }
    }
}

/// In-memory [`Document`] with simulated list/grid layout.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: BTreeMap<ElementId, Element>,
    card_styles: Vec<InlineStyle>,
    events: Vec<String>,
    layout_flushes: usize,
    metrics: LayoutMetrics,
}

impl MemoryDocument {
    pub fn with_elements(ids: &[ElementId]) -> Self {
        let mut doc = Self::default();
        for id in ids {
            doc.elements.insert(*id, Element::default());
        }
        doc
    }

    /// The full publications page: sort/filter controls, view toggle,
    /// results container, counters and the announcement region.
    pub fn listing_page() -> Self {
        Self::with_elements(&[
            ElementId::SortSelect,
            ElementId::FilterSelect,
            ElementId::ViewList,
            ElementId::ViewGrid,
            ElementId::Results,
            ElementId::Count,
            ElementId::StatTotal,
            ElementId::Announcement,
        ])
    }

    /// A landing page with only the featured container.
    pub fn landing_page() -> Self {
        Self::with_elements(&[ElementId::Featured])
    }

    pub fn with_metrics(mut self, metrics: LayoutMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn html(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).map(|e| e.html.as_str())
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).map(|e| e.text.as_str())
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements
            .get(&id)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    /// Record ids of the cards inside `id`, in document order, read back
    /// from the `pub-{id}` anchors.
    pub fn card_ids(&self, id: ElementId) -> Vec<&str> {
        self.html(id)
            .map(|html| {
                html.split(r#"id="pub-"#)
                    .skip(1)
                    .filter_map(|rest| rest.split('"').next())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn card_style(&self, index: usize) -> Option<&InlineStyle> {
        self.card_styles.get(index)
    }

    /// Whether any card still carries inline overrides.
    pub fn has_inline_styles(&self) -> bool {
        self.card_styles.iter().any(|s| !s.is_empty())
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn layout_flushes(&self) -> usize {
        self.layout_flushes
    }

    fn is_grid(&self) -> bool {
        self.has_class(ElementId::Results, GRID_CLASS)
    }
}

impl Document for MemoryDocument {
    fn has_element(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    fn set_inner_html(&mut self, id: ElementId, html: &str) -> bool {
        let Some(element) = self.elements.get_mut(&id) else {
            return false;
        };
        element.html = html.to_string();
        element.text.clear();
        if id == ElementId::Results {
            let cards = html.matches("<article").count();
            self.card_styles = vec![InlineStyle::default(); cards];
        }
        true
    }

    fn set_text(&mut self, id: ElementId, text: &str) -> bool {
        let Some(element) = self.elements.get_mut(&id) else {
            return false;
        };
        element.text = text.to_string();
        true
    }

    fn set_class(&mut self, id: ElementId, class: &str, present: bool) -> bool {
        let Some(element) = self.elements.get_mut(&id) else {
            return false;
        };
        if present {
            element.classes.insert(class.to_string());
        } else {
            element.classes.remove(class);
        }
        true
    }

    fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements
            .get(&id)
            .is_some_and(|e| e.classes.contains(class))
    }

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> bool {
        let Some(element) = self.elements.get_mut(&id) else {
            return false;
        };
        element
            .attributes
            .insert(name.to_string(), value.to_string());
        true
    }

    fn dispatch(&mut self, event: &str) {
        self.events.push(event.to_string());
    }

    fn card_count(&self) -> usize {
        self.card_styles.len()
    }

    fn card_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.card_count() {
            return None;
        }
        let m = &self.metrics;
        let rect = if self.is_grid() {
            let columns = m.grid_columns.max(1);
            let gaps = m.gap * (columns as f64 - 1.0);
            let width = (m.viewport_width - gaps) / columns as f64;
            let (row, col) = (index / columns, index % columns);
            Rect {
                left: col as f64 * (width + m.gap),
                top: row as f64 * (m.grid_card_height + m.gap),
                width,
                height: m.grid_card_height,
            }
        } else {
            Rect {
                left: 0.0,
                top: index as f64 * (m.list_card_height + m.gap),
                width: m.viewport_width,
                height: m.list_card_height,
            }
        };
        Some(rect)
    }

    fn set_card_style(&mut self, index: usize, style: &InlineStyle) {
        if let Some(slot) = self.card_styles.get_mut(index) {
            *slot = style.clone();
        }
    }

    fn flush_layout(&mut self) {
        self.layout_flushes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_elements_report_false() {
        let mut doc = MemoryDocument::landing_page();
        assert!(!doc.has_element(ElementId::Results));
        assert!(!doc.set_inner_html(ElementId::Results, "<p></p>"));
        assert!(!doc.set_text(ElementId::Count, "3"));
        assert!(doc.set_inner_html(ElementId::Featured, "<p></p>"));
    }

    #[test]
    fn cards_counted_from_results_html() {
        let mut doc = MemoryDocument::listing_page();
        doc.set_inner_html(ElementId::Results, "<article></article><article></article>");
        assert_eq!(doc.card_count(), 2);
        doc.set_inner_html(ElementId::Results, "<div class=\"no-results\"></div>");
        assert_eq!(doc.card_count(), 0);
    }

    #[test]
    fn card_ids_follow_document_order() {
        let mut doc = MemoryDocument::listing_page();
        doc.set_inner_html(
            ElementId::Results,
            r#"<article class="publication-card" id="pub-b"></article><article class="publication-card" id="pub-a"></article>"#,
        );
        assert_eq!(doc.card_ids(ElementId::Results), vec!["b", "a"]);
        assert!(doc.card_ids(ElementId::Featured).is_empty());
    }

    #[test]
    fn list_layout_stacks_cards() {
        let mut doc = MemoryDocument::listing_page();
        doc.set_inner_html(ElementId::Results, &"<article></article>".repeat(3));
        let first = doc.card_rect(0).unwrap();
        let second = doc.card_rect(1).unwrap();
        assert_eq!(first.left, second.left);
        assert!(second.top > first.top);
        assert_eq!(first.width, 1200.0);
        assert_eq!(doc.card_rect(3), None);
    }

    #[test]
    fn grid_layout_uses_columns() {
        let mut doc = MemoryDocument::listing_page();
        doc.set_inner_html(ElementId::Results, &"<article></article>".repeat(4));
        doc.set_class(ElementId::Results, GRID_CLASS, true);
        let first = doc.card_rect(0).unwrap();
        let second = doc.card_rect(1).unwrap();
        let fourth = doc.card_rect(3).unwrap();
        assert_eq!(first.top, second.top);
        assert!(second.left > first.left);
        assert_eq!(fourth.left, 0.0);
        assert!(fourth.top > first.top);
        assert_eq!(first.width, 384.0);
    }

    #[test]
    fn dom_ids_round_trip() {
        for id in ElementId::ALL {
            assert_eq!(ElementId::from_dom_id(id.dom_id()), Some(id));
        }
        assert_eq!(ElementId::from_dom_id("nope"), None);
    }
}
