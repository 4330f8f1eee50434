//! Dataset retrieval.
//!
//! The dataset is one JSON document, either `{ "publications": [...] }` or a
//! bare array. Retrieval goes through the [`Fetch`] trait so the host decides
//! where bytes come from; [`FileFetcher`] serves a site directory from disk.
//!
//! Loading never fails the page. [`load`] logs the problem and hands back an
//! empty sequence, and the caller renders the failure placeholder. Callers
//! that need to know *why* use [`try_load`].
//!
//! Records are decoded one by one: an element that cannot be decoded at all
//! is skipped with a warning so the rest of the list still renders.

use crate::model::Publication;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected dataset shape: {0}")]
    Shape(&'static str),
}

/// A fetched document: status code plus body.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieval of a site-relative resource.
pub trait Fetch {
    fn fetch(&self, path: &str) -> Result<Response, LoadError>;
}

/// Serves site-relative paths from a root directory.
///
/// A missing file answers 404 like a static file server would.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl Fetch for FileFetcher {
    fn fetch(&self, path: &str) -> Result<Response, LoadError> {
        let file = self.resolve(path);
        match std::fs::read(&file) {
            Ok(body) => Ok(Response::ok(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Response {
                status: 404,
                body: Vec::new(),
            }),
            Err(e) => Err(LoadError::Transport(e)),
        }
    }
}

/// Fetch and decode the dataset, reporting failures.
pub fn try_load(fetcher: &impl Fetch, path: &str) -> Result<Vec<Publication>, LoadError> {
    let response = fetcher.fetch(path)?;
    if !response.is_success() {
        return Err(LoadError::Status(response.status));
    }
    let publications = parse_dataset(&response.body)?;
    debug!(path, count = publications.len(), "Loaded publications");
    Ok(publications)
}

/// Fetch and decode the dataset. Any failure is logged and yields an empty list.
pub fn load(fetcher: &impl Fetch, path: &str) -> Vec<Publication> {
    match try_load(fetcher, path) {
        Ok(publications) => publications,
        Err(e) => {
            error!(path, error = %e, "Error fetching publications");
            Vec::new()
        }
    }
}

/// Decode a dataset document.
///
/// Unwraps a top-level `publications` array when present, otherwise expects
/// the document itself to be the array.
pub fn parse_dataset(bytes: &[u8]) -> Result<Vec<Publication>, LoadError> {
    let document: serde_json::Value = serde_json::from_slice(bytes)?;
    let items = match document {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("publications") {
            Some(serde_json::Value::Array(items)) => items,
            Some(_) => return Err(LoadError::Shape("`publications` is not an array")),
            None => return Err(LoadError::Shape("no `publications` array")),
        },
        _ => return Err(LoadError::Shape("expected an object or an array")),
    };

    let mut publications = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Publication>(item) {
            Ok(p) => publications.push(p),
            Err(e) => warn!(index, error = %e, "Skipping unreadable publication record"),
        }
    }
    warn_duplicate_ids(&publications);
    Ok(publications)
}

fn warn_duplicate_ids(publications: &[Publication]) {
    let mut seen = HashSet::new();
    for p in publications {
        if !seen.insert(p.id.as_str()) {
            warn!(id = %p.id, "Duplicate publication id; card anchors will collide");
        }
    }
}

/// Load the dataset from a site directory on disk.
pub fn load_from_dir(root: &Path, path: &str) -> Vec<Publication> {
    load(&FileFetcher::new(root), path)
}
