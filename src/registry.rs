//! Page registry and request path resolution.
//!
//! The registry is an ordered list of [`PageRecord`]s plus a path → position
//! index built once at construction. Order is significant: it is the
//! navigation menu order and the build emission order.
//!
//! ## Resolution
//!
//! Request paths are normalized before lookup:
//!
//! ```text
//! /quick-start.html  →  quick-start
//! /quick-start       →  quick-start
//! /                  →  <home>
//! /index, index.html →  <home>
//! /docs/extra        →  docs/extra   (no match: exact lookup only)
//! ```

use crate::types::PageRecord;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate page path '{0}'")]
    DuplicatePath(String),
    #[error("Invalid page path '{0}': {1}")]
    InvalidPath(String, &'static str),
    #[error("Home page '{0}' is not registered")]
    UnknownHome(String),
}

/// Immutable, ordered set of pages.
#[derive(Debug, Clone)]
pub struct Registry {
    pages: Vec<PageRecord>,
    index: HashMap<String, usize>,
    home: usize,
}

impl Registry {
    /// Build a registry, rejecting duplicate or malformed paths.
    ///
    /// `home` names the page that `/` and `/index` resolve to.
    pub fn new(pages: Vec<PageRecord>, home: &str) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(pages.len());
        for (pos, page) in pages.iter().enumerate() {
            check_path(&page.path, home)?;
            if index.insert(page.path.clone(), pos).is_some() {
                return Err(RegistryError::DuplicatePath(page.path.clone()));
            }
        }
        let home = *index
            .get(home)
            .ok_or_else(|| RegistryError::UnknownHome(home.to_string()))?;
        Ok(Self { pages, index, home })
    }

    /// All pages in registration order.
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The designated home page.
    pub fn home(&self) -> &PageRecord {
        &self.pages[self.home]
    }

    /// Exact lookup by registered path.
    pub fn get(&self, path: &str) -> Option<&PageRecord> {
        self.index.get(path).map(|&pos| &self.pages[pos])
    }

    /// Pages listed in the navigation bar, in order. Never includes home.
    pub fn nav_pages(&self) -> impl Iterator<Item = &PageRecord> {
        let home = self.home;
        self.pages
            .iter()
            .enumerate()
            .filter(move |(pos, page)| *pos != home && page.nav)
            .map(|(_, page)| page)
    }

    /// Resolve a request path to a page.
    ///
    /// Returns `None` for anything that is not exactly a registered page
    /// after normalization, including static assets.
    pub fn resolve(&self, request_path: &str) -> Option<&PageRecord> {
        self.get(&normalize_path(request_path, &self.home().path))
    }
}

/// Normalize a request path into a registry key.
///
/// 1. strip a trailing `.html`
/// 2. `/` and `/index` (and `index`, the empty path) map to `home`
/// 3. strip the leading `/`
///
/// Normalizing an already normalized key returns it unchanged.
pub fn normalize_path(request_path: &str, home: &str) -> String {
    let path = request_path
        .strip_suffix(".html")
        .unwrap_or(request_path);
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() || path == "index" {
        home.to_string()
    } else {
        path.to_string()
    }
}

fn check_path(path: &str, home: &str) -> Result<(), RegistryError> {
    let reason = if path.is_empty() {
        Some("must not be empty")
    } else if path.contains('/') || path.contains('\\') {
        Some("must be a single segment")
    } else if path.ends_with(".html") {
        Some("must not end with .html")
    } else if path == "index" && home != "index" {
        Some("'index' is reserved for the home page")
    } else if path.starts_with('.') {
        Some("must not start with '.'")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(RegistryError::InvalidPath(path.to_string(), reason)),
        None => Ok(()),
    }
}
