//! # publist
//!
//! Renders a curated list of research publications into a page: load a JSON
//! dataset, let the visitor sort and filter it, insert publication cards, and
//! switch between a list and a grid presentation that is remembered across
//! visits.
//!
//! # Architecture: One-Way Pipeline
//!
//! ```text
//! Loader      /data/publications.json  →  Vec<Publication>
//! Filter      type / author / year     →  Vec<&Publication>
//! Sort        one of four orderings    →  Vec<&Publication>
//! Render      maud card markup         →  results container
//! ```
//!
//! The [`pipeline::Pipeline`] owns the dataset and the current selection and
//! re-runs filter → sort → render on every change. The
//! [`view::ViewModeController`] works on the rendered cards independently:
//! it toggles the layout class, persists the choice, and animates the switch.
//!
//! The page itself, the preference storage and dataset retrieval are
//! collaborators behind traits ([`host::Document`], [`store::PreferenceStore`],
//! [`loader::Fetch`]), so the whole core runs against in-memory
//! implementations in tests and from the CLI.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | Publication record types and per-field fallbacks |
//! | [`loader`] | Dataset retrieval and decoding; failures become an empty list |
//! | [`filter`] | Filter criteria and the best-effort venue classifier |
//! | [`sort`] | The four named orderings |
//! | [`render`] | Card markup via Maud |
//! | [`pipeline`] | Controller state, recompute, featured selection |
//! | [`view`] | List/grid mode and the FLIP transition state machine |
//! | [`page`] | Mounts loader, pipeline and view controller onto a document; headless site render |
//! | [`host`] | `Document` trait and the in-memory document |
//! | [`store`] | `PreferenceStore` trait, memory and JSON-file stores |
//! | [`config`] | `publist.toml` loading, merging and validation |
//! | [`logging`] | `tracing` subscriber setup for the CLI |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Borrowed Working Sequences
//!
//! Records are loaded once and never mutated. Filtering and sorting work on
//! `Vec<&Publication>`, so a recompute copies pointers, not records, and
//! "no record fabricated" holds by construction.
//!
//! ## Best-Effort Records
//!
//! The dataset is hand-edited JSON. Missing nested fields get defaults, and a
//! record that cannot be decoded at all is skipped with a warning. One bad
//! entry never blanks the page.
//!
//! ## Transitions Are Explicit State
//!
//! The list/grid animation spans several frames. Rather than chaining
//! callbacks, the controller keeps a phase (`Idle → Rewound → Animating →
//! Settled`) and the host drives it with `tick(now)`. A second toggle mid-way
//! cancels the first run before starting, so two runs never write the same
//! card's styles.

pub mod config;
pub mod filter;
pub mod host;
pub mod loader;
pub mod logging;
pub mod model;
pub mod output;
pub mod page;
pub mod pipeline;
pub mod render;
pub mod sort;
pub mod store;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
