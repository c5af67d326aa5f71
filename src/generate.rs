//! Static site generation.
//!
//! Build mode renders every registered page once, in registry order, and
//! mirrors the static asset tree next to the pages.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html            # home page
//! ├── quick-start.html      # one file per registered page
//! ├── docs.html
//! └── static/               # verbatim copy of <root>/static
//!     ├── style.css
//!     └── ...
//! ```
//!
//! The output directory is deleted and recreated on every run, so files left
//! by a previous build never survive into the next one.

use crate::content::Site;
use crate::render::render_page;
use crate::types::{PageRecord, Template};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk static directory: {0}")]
    WalkDir(#[from] walkdir::Error),
    #[error("Static directory {0} does not exist")]
    MissingStatic(PathBuf),
    #[error("Output directory {0} would overwrite the project")]
    UnsafeOutput(PathBuf),
}

/// One page written by [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub title: String,
    /// Template kind, e.g. `guide`.
    pub kind: &'static str,
    /// Content file the page was rendered from, relative to the project
    /// root. Index and demo pages, and guides with an inline body, have none.
    pub source: Option<PathBuf>,
    /// Path of the written HTML file.
    pub file: PathBuf,
}

/// What a build produced, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub pages: Vec<GeneratedPage>,
    /// Number of static files copied.
    pub assets: usize,
}

/// Build the whole site into `site.output_root()`.
pub fn generate(site: &Site) -> Result<BuildReport, GenerateError> {
    let output_dir = site.output_root();
    check_output_dir(site, &output_dir)?;
    let static_root = site.static_root();
    if !static_root.is_dir() {
        return Err(GenerateError::MissingStatic(static_root));
    }

    if output_dir.exists() {
        fs::remove_dir_all(&output_dir)?;
    }
    fs::create_dir_all(&output_dir)?;

    let mut pages = Vec::with_capacity(site.registry.len());
    let content_dir = Path::new(&site.config.build.content_dir);
    for page in site.registry.pages() {
        let html = render_page(site, page);
        let file = output_dir.join(page.file_name());
        fs::write(&file, html.into_string())?;
        pages.push(GeneratedPage {
            title: page.title.clone(),
            kind: page.template.kind(),
            source: template_source(page, content_dir),
            file,
        });
    }

    let assets = copy_tree(&static_root, &output_dir.join(&site.config.build.static_dir))?;

    Ok(BuildReport {
        output_dir,
        pages,
        assets,
    })
}

/// The content file behind a page, if it has one.
fn template_source(page: &PageRecord, content_dir: &Path) -> Option<PathBuf> {
    match &page.template {
        Template::Guide(guide) => guide.file.as_ref().map(|file| content_dir.join(file)),
        Template::Reference(reference) => Some(content_dir.join(&reference.file)),
        Template::Index(_) | Template::Demo(_) => None,
    }
}

/// Refuse output directories that would delete the project or its inputs.
///
/// Paths are compared after resolving them against the project root, so
/// `./content`, `content/../content`, and an absolute path to the root are
/// caught the same way as the plain spellings. The output may not be the
/// root, may not contain the content or static directory, and may not sit
/// inside the static directory (the copy would walk into itself).
fn check_output_dir(site: &Site, output_dir: &Path) -> Result<(), GenerateError> {
    let root = fs::canonicalize(&site.root)?;
    let build = &site.config.build;
    let out = resolve(&root.join(&build.output_dir));
    let content = resolve(&root.join(&build.content_dir));
    let assets = resolve(&root.join(&build.static_dir));

    let clobbers = root.starts_with(&out)
        || content.starts_with(&out)
        || assets.starts_with(&out)
        || out.starts_with(&assets);
    if clobbers {
        return Err(GenerateError::UnsafeOutput(output_dir.to_path_buf()));
    }
    Ok(())
}

/// Absolute form of `path` with `.` and `..` collapsed and symlinks resolved
/// as far as the path exists.
fn resolve(path: &Path) -> PathBuf {
    let lexical = collapse(path);
    let mut existing = lexical.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(real) = existing.canonicalize() {
            return missing.iter().rev().fold(real, |acc, name| acc.join(name));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => return lexical,
        }
    }
}

fn collapse(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Copy every file under `src` to the same relative path under `dst`.
/// Returns the number of files copied.
fn copy_tree(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
