//! Page wiring.
//!
//! Glues the loader, the pipeline controller and the view controller onto one
//! document, the way the page script does on load:
//!
//! 1. fetch the dataset;
//! 2. hand it to [`Pipeline::init`], which renders either the full list or the
//!    featured subset (or the failure placeholder);
//! 3. on the listing surface, attach the list/grid toggle.
//!
//! The host then forwards events: select changes to [`PublicationsPage::on_change`],
//! toggle clicks to [`PublicationsPage::on_view_click`], and every animation
//! frame to [`PublicationsPage::tick`].
//!
//! [`render_site`] runs the same sequence headless against a
//! [`MemoryDocument`] and returns the results container as markup. It backs
//! the `render` command.

use crate::config::Config;
use crate::host::{Document, ElementId, MemoryDocument};
use crate::loader::{self, Fetch, FileFetcher};
use crate::pipeline::{Pipeline, Surface};
use crate::store::{self, MemoryStore, PreferenceStore, StoreError};
use crate::view::{ViewMode, ViewModeController};
use maud::{Markup, PreEscaped, html};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// A mounted publications page.
#[derive(Debug, Clone)]
pub struct PublicationsPage {
    pub pipeline: Pipeline,
    /// Present only on the listing surface with toggle buttons.
    pub view: Option<ViewModeController>,
}

impl PublicationsPage {
    /// Load the dataset and mount onto `document`.
    ///
    /// Returns `None` when nothing could be loaded; the document then shows
    /// the failure placeholder.
    pub fn mount(
        document: &mut impl Document,
        store: &impl PreferenceStore,
        fetcher: &impl Fetch,
        config: &Config,
    ) -> Option<Self> {
        let publications = loader::load(fetcher, &config.dataset.path);
        let pipeline = Pipeline::init(document, publications, config)?;
        let view = match pipeline.surface() {
            Surface::Listing => ViewModeController::attach(document, store, &config.view),
            Surface::Featured => None,
        };
        Some(Self { pipeline, view })
    }

    /// Forward a select change. A re-render replaces every card, so any
    /// transition still running on the old cards is dropped.
    pub fn on_change(
        &mut self,
        document: &mut impl Document,
        control: ElementId,
        value: &str,
    ) -> Option<usize> {
        let shown = self.pipeline.on_change(document, control, value)?;
        if let Some(view) = self.view.as_mut() {
            view.reset();
        }
        Some(shown)
    }

    /// Handle a click on one of the toggle buttons.
    pub fn on_view_click(
        &mut self,
        document: &mut impl Document,
        store: &mut impl PreferenceStore,
        button: ElementId,
        now: Duration,
    ) {
        let mode = match button {
            ElementId::ViewList => ViewMode::List,
            ElementId::ViewGrid => ViewMode::Grid,
            _ => return,
        };
        if let Some(view) = self.view.as_mut() {
            view.set_mode(document, store, mode, now);
        }
    }

    pub fn tick(&mut self, document: &mut impl Document, now: Duration) {
        if let Some(view) = self.view.as_mut() {
            view.tick(document, now);
        }
    }
}

// ============================================================================
// Headless rendering
// ============================================================================

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("could not load publications from {0}")]
    NoPublications(String),
    #[error("preference store error: {0}")]
    Store(#[from] StoreError),
}

/// Control values for a headless render. `None` leaves the control at its
/// initial value.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub sort: Option<String>,
    pub kind: Option<String>,
    pub author: Option<String>,
    pub year: Option<String>,
    /// Render the landing page's featured container instead of the list.
    pub featured: bool,
    /// Presentation for this render only; the saved preference is untouched.
    pub view: Option<ViewMode>,
}

/// Result of [`render_site`].
#[derive(Debug, Clone)]
pub struct SiteRender {
    /// The container element, with its classes, wrapping the cards.
    pub html: String,
    pub shown: usize,
    pub total: usize,
    /// Final view mode; `None` on the featured surface.
    pub view: Option<ViewMode>,
}

/// Mount the site at `root` onto an in-memory page, apply `options` as a
/// visitor would, and return the results container.
pub fn render_site(
    root: &Path,
    config: &Config,
    options: &RenderOptions,
) -> Result<SiteRender, SiteError> {
    let mut document = if options.featured {
        MemoryDocument::landing_page()
    } else {
        MemoryDocument::listing_page()
    };

    // Copy the saved mode into a throwaway store so clicks never persist.
    let key = &config.view.storage_key;
    let mut prefs = MemoryStore::default();
    if let Some(mode) = store::site_store(root).get(key) {
        prefs.set(key, &mode)?;
    }

    let fetcher = FileFetcher::new(root);
    let mut page = PublicationsPage::mount(&mut document, &prefs, &fetcher, config)
        .ok_or_else(|| SiteError::NoPublications(config.dataset.path.clone()))?;

    if !options.featured {
        let controls = [
            (ElementId::SortSelect, &options.sort),
            (ElementId::FilterSelect, &options.kind),
            (ElementId::AuthorSelect, &options.author),
            (ElementId::YearSelect, &options.year),
        ];
        for (control, value) in controls {
            if let Some(value) = value {
                page.on_change(&mut document, control, value);
            }
        }
    }

    if let Some(mode) = options.view {
        let button = match mode {
            ViewMode::List => ElementId::ViewList,
            ViewMode::Grid => ElementId::ViewGrid,
        };
        page.on_view_click(&mut document, &mut prefs, button, Duration::ZERO);
        // Play the transition out so no inline styles remain.
        page.tick(&mut document, Duration::ZERO);
        page.tick(&mut document, Duration::from_millis(config.view.cleanup_ms));
    }

    let container = page.pipeline.surface().container();
    let shown = match page.pipeline.surface() {
        Surface::Listing => page.pipeline.working_set().len(),
        Surface::Featured => page.pipeline.featured().len(),
    };
    let view = page.view.as_ref().map(|v| v.mode());
    debug!(shown, ?view, "Rendered site");

    Ok(SiteRender {
        html: container_markup(&document, container).into_string(),
        shown,
        total: page.pipeline.state().publications().len(),
        view,
    })
}

/// The element `id` as markup: its DOM id, its classes, and its content.
pub fn container_markup(document: &MemoryDocument, id: ElementId) -> Markup {
    let element = document.element(id);
    let class = element
        .map(|e| e.classes.iter().map(String::as_str).collect::<Vec<_>>().join(" "))
        .filter(|c| !c.is_empty());
    let content = element.map(|e| e.html.as_str()).unwrap_or_default();
    html! {
        div id=(id.dom_id()) class=[class] { (PreEscaped(content)) }
    }
}
