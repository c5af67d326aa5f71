//! Content loading and validation.
//!
//! Reads `<content_dir>/pages.toml`, pulls in the files it references, and
//! produces the [`Site`]: configuration plus an immutable [`Registry`].
//!
//! ## Content Layout
//!
//! ```text
//! content/
//! ├── pages.toml          # Ordered page list; order = nav order = build order
//! ├── guides/
//! │   ├── quick-start.md  # Referenced by `template.file` of guide pages
//! │   └── ...
//! └── reference.toml      # Referenced by `template.file` of the reference page
//! ```
//!
//! ## pages.toml
//!
//! ```toml
//! home = "index"              # Page served for `/` (default "index")
//!
//! [[pages]]
//! path = "quick-start"
//! title = "Quick Start"
//! template = { kind = "guide", file = "guides/quick-start.md" }
//!
//! [[pages]]
//! path = "jump-demo"
//! title = "Jump"
//! nav = false
//! [pages.template]
//! kind = "demo"
//! video = "static/example-jump.webm"
//! source = "https://github.com/jasonliang-dev/spry/tree/master/examples/jump"
//! mount = "static/jump.zip"
//! width = 500
//! height = 700
//! text = "- `A` and `D` to move left/right"
//! ```
//!
//! ## Validation
//!
//! Everything that would make a page unrenderable is rejected here, before
//! any output is produced:
//! - unknown template kinds and missing required options (TOML errors)
//! - duplicate or malformed paths, unknown home page
//! - guides with neither or both of `file` and `body`
//! - demos with a zero width or height
//! - an index `get_started` link to a page that does not exist
//! - unreadable guide or reference files

use crate::config::SiteConfig;
use crate::registry::{Registry, RegistryError};
use crate::types::{ApiReference, PageRecord, Template};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the page list within the content directory.
pub const PAGES_FILENAME: &str = "pages.toml";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("Page '{page}': {message}")]
    Invalid { page: String, message: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PagesFile {
    #[serde(default = "default_home")]
    home: String,
    #[serde(default)]
    pages: Vec<PageRecord>,
}

fn default_home() -> String {
    "index".to_string()
}

/// A loaded site: everything the renderer and both drivers need.
#[derive(Debug, Clone)]
pub struct Site {
    /// Project root; config directories are relative to it.
    pub root: PathBuf,
    pub config: SiteConfig,
    pub registry: Registry,
}

impl Site {
    /// Load and validate the content of the project at `root`.
    pub fn load(root: &Path, config: SiteConfig) -> Result<Self, ContentError> {
        let content_dir = root.join(&config.build.content_dir);
        let registry = load_registry(&content_dir)?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
            registry,
        })
    }

    /// Static asset directory on disk.
    pub fn static_root(&self) -> PathBuf {
        self.root.join(&self.config.build.static_dir)
    }

    /// Build output directory on disk.
    pub fn output_root(&self) -> PathBuf {
        self.root.join(&self.config.build.output_dir)
    }
}

/// Read `pages.toml` from `content_dir` and build the registry.
pub fn load_registry(content_dir: &Path) -> Result<Registry, ContentError> {
    let pages_path = content_dir.join(PAGES_FILENAME);
    let file: PagesFile = read_toml(&pages_path)?;

    let mut pages = file.pages;
    for page in &mut pages {
        resolve_page(page, content_dir)?;
    }

    let registry = Registry::new(pages, &file.home)?;
    check_links(&registry)?;
    Ok(registry)
}

/// Validate one page and load the files its template points to.
fn resolve_page(page: &mut PageRecord, content_dir: &Path) -> Result<(), ContentError> {
    let invalid = |message: &str| ContentError::Invalid {
        page: page.path.clone(),
        message: message.to_string(),
    };

    match &mut page.template {
        Template::Index(_) => {}
        Template::Guide(guide) => {
            if guide.file.is_some() && guide.body.is_some() {
                return Err(invalid("guide has both `file` and `body`"));
            }
            if let Some(file) = &guide.file {
                let body = read_file(&content_dir.join(file))?;
                guide.body = Some(body);
            } else if guide.body.is_none() {
                return Err(invalid("guide needs either `file` or `body`"));
            }
        }
        Template::Demo(demo) => {
            if demo.width == 0 || demo.height == 0 {
                return Err(invalid("demo width and height must be non-zero"));
            }
        }
        Template::Reference(reference) => {
            let api: ApiReference = read_toml(&content_dir.join(&reference.file))?;
            reference.sections = api.sections;
        }
    }
    Ok(())
}

/// Internal links that must point at registered pages.
fn check_links(registry: &Registry) -> Result<(), ContentError> {
    for page in registry.pages() {
        if let Template::Index(index) = &page.template
            && registry.get(&index.get_started).is_none()
        {
            return Err(ContentError::Invalid {
                page: page.path.clone(),
                message: format!("get_started links to unknown page '{}'", index.get_started),
            });
        }
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<String, ContentError> {
    fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let text = read_file(path)?;
    toml::from_str(&text).map_err(|source| ContentError::Toml {
        path: path.to_path_buf(),
        source,
    })
}
