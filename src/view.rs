//! List/grid view mode and its transition.
//!
//! The results container has two presentations, toggled by the `view-list`
//! and `view-grid` buttons. The choice is remembered in the preference store
//! and restored on the next visit.
//!
//! ## FLIP transition
//!
//! Switching layouts is a class change, and the layout engine cannot tween
//! between the two. The controller fakes continuous motion with
//! first-last-invert-play:
//!
//! ```text
//! First   snapshot card boxes under the old layout
//! Last    apply the class change, snapshot again
//! Invert  transform each card back onto its old box, transitions off
//!         (flush layout so the rewound frame is painted)
//! Play    next frame: transition the transform back to identity
//! Settle  after the cleanup delay: strip every inline override
//! ```
//!
//! Only the first `max_animated_cards` cards animate; the rest jump straight
//! to their new place with the class change.
//!
//! The phases form a state machine, [`FlipPhase`], driven by the host calling
//! [`ViewModeController::tick`] once per frame with a monotonic timestamp.
//! A toggle that arrives before the previous transition settles cancels it
//! first: the in-flight cards have their overrides stripped, which is their
//! terminal geometry, and the new transition starts from there. Transitions
//! never overlap, so no cleanup can clobber a newer run's styles.

use crate::config::ViewConfig;
use crate::host::{Document, ElementId, GRID_CLASS, InlineStyle, Rect};
use crate::store::PreferenceStore;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// Presentation of the results container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::List => "list",
            ViewMode::Grid => "grid",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewMode::List => ViewMode::Grid,
            ViewMode::Grid => ViewMode::List,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ViewMode::List => "List view",
            ViewMode::Grid => "Grid view",
        }
    }

    fn button(self) -> ElementId {
        match self {
            ViewMode::List => ElementId::ViewList,
            ViewMode::Grid => ElementId::ViewGrid,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(ViewMode::List),
            "grid" => Ok(ViewMode::Grid),
            other => Err(format!("unknown view mode '{other}' (expected list or grid)")),
        }
    }
}

/// Phase of the current (or last) transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipPhase {
    /// No transition has run yet.
    Idle,
    /// Inverted transforms applied; waiting for the next frame.
    Rewound,
    /// Playing towards identity since `started`.
    Animating { started: Duration },
    /// Overrides stripped; layout is back to normal.
    Settled,
}

impl FlipPhase {
    pub fn in_flight(self) -> bool {
        matches!(self, FlipPhase::Rewound | FlipPhase::Animating { .. })
    }
}

/// Transform that maps a card's `last` box back onto its `first` box.
///
/// Translation is measured between top-left corners, matching a
/// `top left` transform origin. A zero-sized last box scales by 1.
pub fn invert_transform(first: &Rect, last: &Rect) -> String {
    let dx = first.left - last.left;
    let dy = first.top - last.top;
    let sx = if last.width > 0.0 { first.width / last.width } else { 1.0 };
    let sy = if last.height > 0.0 { first.height / last.height } else { 1.0 };
    format!("translate({dx}px, {dy}px) scale({sx}, {sy})")
}

const IDENTITY_TRANSFORM: &str = "translate(0, 0) scale(1, 1)";

/// Owns the view mode and drives transitions on the results container.
#[derive(Debug, Clone)]
pub struct ViewModeController {
    mode: ViewMode,
    settings: ViewConfig,
    phase: FlipPhase,
    /// Cards carrying overrides from the current transition.
    animated: usize,
}

impl ViewModeController {
    /// Attach to the page, restoring the saved mode.
    ///
    /// Returns `None` when the toggle buttons or the results container are
    /// missing; the feature is simply inactive then. The restored mode is
    /// applied without animation, announcement, or a store write.
    pub fn attach(
        document: &mut impl Document,
        store: &impl PreferenceStore,
        settings: &ViewConfig,
    ) -> Option<Self> {
        let required = [ElementId::ViewList, ElementId::ViewGrid, ElementId::Results];
        if let Some(missing) = required.iter().find(|id| !document.has_element(**id)) {
            debug!(element = missing.dom_id(), "View toggle inactive");
            return None;
        }

        let mode = restore_mode(store, &settings.storage_key);
        let controller = Self {
            mode,
            settings: settings.clone(),
            phase: FlipPhase::Idle,
            animated: 0,
        };
        controller.apply_mode(document);
        Some(controller)
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn phase(&self) -> FlipPhase {
        self.phase
    }

    /// Switch to the other mode.
    pub fn toggle(
        &mut self,
        document: &mut impl Document,
        store: &mut impl PreferenceStore,
        now: Duration,
    ) {
        self.set_mode(document, store, self.mode.toggled(), now);
    }

    /// Switch to `mode` (a click on one of the toggle buttons).
    ///
    /// Selecting the current mode still persists, announces, and replays the
    /// transition, which then has nothing to move.
    pub fn set_mode(
        &mut self,
        document: &mut impl Document,
        store: &mut impl PreferenceStore,
        mode: ViewMode,
        now: Duration,
    ) {
        if self.phase.in_flight() {
            debug!(phase = ?self.phase, "Cancelling in-flight view transition");
            self.settle(document);
        }

        self.mode = mode;
        if self.settings.animate {
            self.start_transition(document);
        } else {
            self.apply_mode(document);
        }
        debug!(mode = %mode, ?now, "View mode changed");

        if let Err(e) = store.set(&self.settings.storage_key, mode.as_str()) {
            warn!(error = %e, "Could not save view preference");
        }
        document.set_text(
            ElementId::Announcement,
            &format!("Switched to {mode} view"),
        );
    }

    /// Drop the current transition after the results were re-rendered.
    ///
    /// Fresh cards carry no inline overrides, and the card indices of the
    /// old run no longer refer to them, so nothing is written.
    pub fn reset(&mut self) {
        if self.phase.in_flight() {
            debug!(phase = ?self.phase, "Results re-rendered mid-transition");
            self.phase = FlipPhase::Settled;
        }
        self.animated = 0;
    }

    /// Advance the transition. Call once per frame.
    pub fn tick(&mut self, document: &mut impl Document, now: Duration) {
        match self.phase {
            FlipPhase::Rewound => {
                let style = self.playing_style();
                for index in 0..self.animated {
                    document.set_card_style(index, &style);
                }
                self.phase = FlipPhase::Animating { started: now };
            }
            FlipPhase::Animating { started } => {
                let cleanup = Duration::from_millis(self.settings.cleanup_ms);
                if now.saturating_sub(started) >= cleanup {
                    self.settle(document);
                }
            }
            FlipPhase::Idle | FlipPhase::Settled => {}
        }
    }

    /// Apply classes and toggle-button state for the current mode.
    fn apply_mode(&self, document: &mut impl Document) {
        document.set_class(ElementId::Results, GRID_CLASS, self.mode == ViewMode::Grid);
        for mode in [ViewMode::List, ViewMode::Grid] {
            let button = mode.button();
            let active = mode == self.mode;
            document.set_class(button, "active", active);
            document.set_attribute(button, "aria-pressed", if active { "true" } else { "false" });
            let label = if active {
                format!("{} (selected)", mode.label())
            } else {
                mode.label().to_string()
            };
            document.set_attribute(button, "aria-label", &label);
        }
    }

    fn start_transition(&mut self, document: &mut impl Document) {
        let count = document.card_count().min(self.settings.max_animated_cards);

        let first: Vec<Option<Rect>> = (0..count).map(|i| document.card_rect(i)).collect();
        self.apply_mode(document);
        let last: Vec<Option<Rect>> = (0..count).map(|i| document.card_rect(i)).collect();

        for (index, boxes) in first.iter().zip(&last).enumerate() {
            let (Some(first), Some(last)) = boxes else {
                continue;
            };
            let style = InlineStyle {
                transition: Some("none".to_string()),
                transform: Some(invert_transform(first, last)),
                transform_origin: Some("top left".to_string()),
                position: Some("relative".to_string()),
                z_index: Some("10".to_string()),
            };
            document.set_card_style(index, &style);
        }
        document.flush_layout();

        self.animated = count;
        self.phase = FlipPhase::Rewound;
    }

    fn playing_style(&self) -> InlineStyle {
        let seconds = self.settings.duration_ms as f64 / 1000.0;
        InlineStyle {
            transition: Some(format!("transform {seconds}s {}", self.settings.easing)),
            transform: Some(IDENTITY_TRANSFORM.to_string()),
            transform_origin: Some("top left".to_string()),
            position: Some("relative".to_string()),
            z_index: Some("10".to_string()),
        }
    }

    /// Strip all overrides written by the current transition.
    fn settle(&mut self, document: &mut impl Document) {
        let cleared = InlineStyle::default();
        for index in 0..self.animated {
            document.set_card_style(index, &cleared);
        }
        self.animated = 0;
        self.phase = FlipPhase::Settled;
    }
}

/// Saved mode, defaulting to list when unset or unrecognised.
pub fn restore_mode(store: &impl PreferenceStore, key: &str) -> ViewMode {
    store
        .get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}
