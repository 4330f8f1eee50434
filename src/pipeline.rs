//! Pipeline controller.
//!
//! Owns the loaded dataset plus the current sort and filter selection, and
//! re-renders the results whenever one of them changes. Every change runs the
//! whole pipeline again; there is no incremental patching and no debouncing:
//!
//! ```text
//! all publications → filter → sort → render → results container
//!                                             + counters + announcement
//!                                             + "publications:loaded" event
//! ```
//!
//! Filtering runs before sorting so comparators never see excluded records.
//!
//! ## Surfaces
//!
//! The publications page has sort and filter controls and gets the full
//! pipeline ([`Surface::Listing`]). Any other page (the landing page) only has
//! a featured container ([`Surface::Featured`]): records flagged `featured`,
//! newest first, or the newest few when nothing is flagged.

use crate::config::Config;
use crate::filter::{self, FilterCriteria, TypeFilter, VenueClassifier};
use crate::host::{Document, ElementId};
use crate::model::Publication;
use crate::render::{self, Renderer};
use crate::sort::{self, SortKey};
use tracing::{debug, error};

/// Event broadcast after cards are (re)inserted into the page.
pub const LOADED_EVENT: &str = "publications:loaded";

/// Which pipeline a page gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Full sort/filter list in the results container.
    Listing,
    /// Featured subset in the featured container.
    Featured,
}

impl Surface {
    /// Pages with both sort and filter controls get the full list.
    pub fn detect(document: &impl Document) -> Self {
        if document.has_element(ElementId::SortSelect)
            && document.has_element(ElementId::FilterSelect)
        {
            Surface::Listing
        } else {
            Surface::Featured
        }
    }

    pub fn container(self) -> ElementId {
        match self {
            Surface::Listing => ElementId::Results,
            Surface::Featured => ElementId::Featured,
        }
    }
}

/// Dataset and current selection.
#[derive(Debug, Clone)]
pub struct PipelineState {
    all: Vec<Publication>,
    sort: String,
    filters: FilterCriteria,
}

impl PipelineState {
    pub fn new(publications: Vec<Publication>) -> Self {
        Self {
            all: publications,
            sort: SortKey::default().as_str().to_string(),
            filters: FilterCriteria::all(),
        }
    }

    pub fn publications(&self) -> &[Publication] {
        &self.all
    }

    /// Current sort token. May be a token the sort engine does not know.
    pub fn sort(&self) -> &str {
        &self.sort
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }
}

/// The controller. One per page.
#[derive(Debug, Clone)]
pub struct Pipeline {
    state: PipelineState,
    surface: Surface,
    classifier: VenueClassifier,
    renderer: Renderer,
    featured_fallback: usize,
}

impl Pipeline {
    pub fn new(publications: Vec<Publication>, surface: Surface, config: &Config) -> Self {
        Self {
            state: PipelineState::new(publications),
            surface,
            classifier: VenueClassifier::from_config(&config.classifier),
            renderer: Renderer::new(&config.render),
            featured_fallback: config.featured.fallback_count,
        }
    }

    /// Take over the page with a freshly loaded dataset.
    ///
    /// An empty dataset means loading failed: the failure placeholder goes
    /// into whichever container the page has and no controller is returned.
    /// Otherwise the surface is detected and the first render happens.
    pub fn init(
        document: &mut impl Document,
        publications: Vec<Publication>,
        config: &Config,
    ) -> Option<Self> {
        if publications.is_empty() {
            error!("No publications loaded");
            let failed = render::load_failed().into_string();
            if !document.set_inner_html(ElementId::Results, &failed) {
                document.set_inner_html(ElementId::Featured, &failed);
            }
            return None;
        }

        let surface = Surface::detect(document);
        debug!(?surface, count = publications.len(), "Publications pipeline ready");
        let mut pipeline = Self::new(publications, surface, config);
        pipeline.recompute(document);
        Some(pipeline)
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn set_sort(&mut self, document: &mut impl Document, token: &str) -> usize {
        self.state.sort = token.to_string();
        self.recompute(document)
    }

    pub fn set_filter_type(&mut self, document: &mut impl Document, value: &str) -> usize {
        self.state.filters.kind = TypeFilter::from_token(value);
        self.recompute(document)
    }

    pub fn set_filter_author(&mut self, document: &mut impl Document, value: &str) -> usize {
        self.state.filters.author = FilterCriteria::slot(value);
        self.recompute(document)
    }

    pub fn set_filter_year(&mut self, document: &mut impl Document, value: &str) -> usize {
        self.state.filters.year = FilterCriteria::slot(value);
        self.recompute(document)
    }

    /// Handle a `change` event from one of the select controls.
    ///
    /// Returns `None` for elements that are not pipeline controls.
    pub fn on_change(
        &mut self,
        document: &mut impl Document,
        control: ElementId,
        value: &str,
    ) -> Option<usize> {
        let shown = match control {
            ElementId::SortSelect => self.set_sort(document, value),
            ElementId::FilterSelect => self.set_filter_type(document, value),
            ElementId::AuthorSelect => self.set_filter_author(document, value),
            ElementId::YearSelect => self.set_filter_year(document, value),
            _ => return None,
        };
        Some(shown)
    }

    /// Filtered and sorted working sequence for the listing surface.
    pub fn working_set(&self) -> Vec<&Publication> {
        let filtered = filter::filter(&self.state.all, &self.state.filters, &self.classifier);
        sort::sort(filtered, &self.state.sort)
    }

    /// Featured subset: flagged records newest first, or the newest few.
    pub fn featured(&self) -> Vec<&Publication> {
        select_featured(&self.state.all, self.featured_fallback)
    }

    /// Run the pipeline for the page's surface and render it.
    ///
    /// Returns the number of cards shown.
    pub fn recompute(&mut self, document: &mut impl Document) -> usize {
        let publications = match self.surface {
            Surface::Listing => self.working_set(),
            Surface::Featured => self.featured(),
        };
        debug!(
            surface = ?self.surface,
            sort = %self.state.sort,
            kind = %self.state.filters.kind,
            filtered = !self.state.filters.is_unconstrained(),
            shown = publications.len(),
            "Recomputed publications"
        );
        let rendered = self.renderer.render(&publications);
        let count = rendered.count;
        show(document, self.surface.container(), rendered);
        count
    }
}

/// Featured selection, always in `year-desc` order.
pub fn select_featured(publications: &[Publication], fallback: usize) -> Vec<&Publication> {
    let flagged: Vec<&Publication> = publications.iter().filter(|p| p.is_featured()).collect();
    if flagged.is_empty() {
        let mut newest = SortKey::YearDesc.apply(publications.iter().collect());
        newest.truncate(fallback);
        newest
    } else {
        SortKey::YearDesc.apply(flagged)
    }
}

/// Insert rendered cards into `container` and update the page around them.
fn show(document: &mut impl Document, container: ElementId, rendered: render::Rendered) {
    let count = rendered.count;
    if !document.set_inner_html(container, &rendered.into_string()) {
        debug!(container = container.dom_id(), "Container missing, nothing rendered");
        return;
    }
    let count_text = count.to_string();
    document.set_text(ElementId::Count, &count_text);
    document.set_text(ElementId::StatTotal, &count_text);
    document.set_text(ElementId::Announcement, &render::status_message(count));
    document.dispatch(LOADED_EVENT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryDocument;
    use crate::test_helpers::*;

    fn sample() -> Vec<Publication> {
        let mut journal = publication("j", 2021, "Journal Paper");
        journal.venue.full_name = "Journal of Field Robotics".into();
        let mut conf = with_authors(publication("c", 2023, "Conference Paper"), &["Ada"]);
        conf.venue.acronym = Some("ICRA".into());
        let mut award = publication("w", 2019, "Award Paper");
        award.awards = Some(vec!["Best Paper".into()]);
        vec![journal, conf, award]
    }

    fn listing(pubs: Vec<Publication>) -> (MemoryDocument, Pipeline) {
        let mut doc = MemoryDocument::listing_page();
        let pipeline = Pipeline::init(&mut doc, pubs, &Config::default()).unwrap();
        (doc, pipeline)
    }

    #[test]
    fn init_renders_listing_year_desc() {
        let (doc, pipeline) = listing(sample());
        assert_eq!(pipeline.surface(), Surface::Listing);
        assert_eq!(doc.card_ids(ElementId::Results), vec!["c", "j", "w"]);
        assert_eq!(doc.text(ElementId::Count), Some("3"));
        assert_eq!(doc.text(ElementId::StatTotal), Some("3"));
        assert_eq!(doc.text(ElementId::Announcement), Some("Showing 3 publications"));
        assert_eq!(doc.events(), &[LOADED_EVENT.to_string()]);
    }

    #[test]
    fn empty_dataset_shows_failure() {
        let mut doc = MemoryDocument::listing_page();
        assert!(Pipeline::init(&mut doc, vec![], &Config::default()).is_none());
        assert_eq!(
            doc.html(ElementId::Results),
            Some(r#"<div class="no-results">Failed to load publications</div>"#)
        );
        assert!(doc.events().is_empty());
    }

    #[test]
    fn empty_dataset_on_landing_page_uses_featured_container() {
        let mut doc = MemoryDocument::landing_page();
        assert!(Pipeline::init(&mut doc, vec![], &Config::default()).is_none());
        assert!(doc.html(ElementId::Featured).unwrap().contains("Failed to load"));
    }

    #[test]
    fn set_sort_rerenders() {
        let (mut doc, mut pipeline) = listing(sample());
        let shown = pipeline.set_sort(&mut doc, "title-asc");
        assert_eq!(shown, 3);
        assert_eq!(pipeline.state().sort(), "title-asc");
        assert_eq!(doc.card_ids(ElementId::Results), vec!["w", "c", "j"]);
        assert_eq!(doc.events().len(), 2);
    }

    #[test]
    fn set_filter_type_rerenders() {
        let (mut doc, mut pipeline) = listing(sample());
        assert_eq!(pipeline.set_filter_type(&mut doc, "conference"), 1);
        assert_eq!(doc.card_ids(ElementId::Results), vec!["c"]);
        assert_eq!(doc.text(ElementId::Count), Some("1"));

        assert_eq!(pipeline.set_filter_type(&mut doc, "award"), 1);
        assert_eq!(doc.card_ids(ElementId::Results), vec!["w"]);

        assert_eq!(pipeline.set_filter_type(&mut doc, "all"), 3);
    }

    #[test]
    fn no_matches_render_placeholder_and_zero() {
        let (mut doc, mut pipeline) = listing(sample());
        assert_eq!(pipeline.set_filter_type(&mut doc, "workshop"), 0);
        assert_eq!(
            doc.html(ElementId::Results),
            Some(r#"<div class="no-results">No publications found</div>"#)
        );
        assert_eq!(doc.text(ElementId::Count), Some("0"));
        assert_eq!(doc.text(ElementId::Announcement), Some("Showing 0 publications"));
    }

    #[test]
    fn author_and_year_slots() {
        let (mut doc, mut pipeline) = listing(sample());
        assert_eq!(pipeline.set_filter_author(&mut doc, "Ada"), 1);
        assert_eq!(pipeline.set_filter_year(&mut doc, "2021"), 0);
        assert_eq!(pipeline.set_filter_author(&mut doc, "all"), 1);
        assert_eq!(doc.card_ids(ElementId::Results), vec!["j"]);
    }

    #[test]
    fn on_change_routes_controls() {
        let (mut doc, mut pipeline) = listing(sample());
        assert_eq!(
            pipeline.on_change(&mut doc, ElementId::FilterSelect, "journal"),
            Some(1)
        );
        assert_eq!(pipeline.on_change(&mut doc, ElementId::Count, "x"), None);
    }

    #[test]
    fn unknown_sort_keeps_dataset_order() {
        let (mut doc, mut pipeline) = listing(sample());
        pipeline.set_sort(&mut doc, "citations");
        assert_eq!(doc.card_ids(ElementId::Results), vec!["j", "c", "w"]);
    }

    #[test]
    fn landing_page_uses_featured_surface() {
        let mut pubs = sample();
        pubs[0].featured = Some(true);
        pubs[2].featured = Some(true);
        let mut doc = MemoryDocument::landing_page();
        let pipeline = Pipeline::init(&mut doc, pubs, &Config::default()).unwrap();
        assert_eq!(pipeline.surface(), Surface::Featured);
        assert_eq!(doc.card_ids(ElementId::Featured), vec!["j", "w"]);
        assert_eq!(doc.events(), &[LOADED_EVENT.to_string()]);
    }

    #[test]
    fn featured_fallback_takes_newest_three() {
        let pubs = vec![
            publication("a", 2018, "A"),
            publication("b", 2022, "B"),
            publication("c", 2020, "C"),
            publication("d", 2024, "D"),
            publication("e", 2019, "E"),
        ];
        let featured = select_featured(&pubs, 3);
        let ids: Vec<&str> = featured.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "b", "c"]);
    }

    #[test]
    fn featured_flag_false_is_not_featured() {
        let mut pubs = vec![publication("a", 2018, "A"), publication("b", 2022, "B")];
        pubs[0].featured = Some(false);
        assert_eq!(select_featured(&pubs, 1).len(), 1);
        assert_eq!(select_featured(&pubs, 1)[0].id, "b");
    }

    #[test]
    fn surface_needs_both_controls() {
        let doc = MemoryDocument::with_elements(&[ElementId::SortSelect, ElementId::Results]);
        assert_eq!(Surface::detect(&doc), Surface::Featured);
    }
}
