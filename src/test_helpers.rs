//! Shared test utilities for the spry-site test suite.
//!
//! Provides the on-disk fixture site and in-memory builders for pages,
//! registries, and API entries.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let site = Site::load(tmp.path(), SiteConfig::default()).unwrap();
//!
//! let site = sample_site();   // same shape, no filesystem
//! let entry = entry("spry.dt").returns_single("number");
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::content::Site;
use crate::registry::Registry;
use crate::types::{
    ApiArg, ApiEntry, ApiSection, Card, DemoOptions, GuideOptions, IndexOptions, LabeledReturn,
    PageRecord, ReferenceOptions, Returns, Snippet, Template,
};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can build into or mutate without
/// affecting other tests or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Page builders
// =========================================================================

/// A guide page with an inline body.
pub fn guide_page(path: &str, title: &str) -> PageRecord {
    PageRecord {
        path: path.to_string(),
        title: title.to_string(),
        nav: true,
        template: Template::Guide(GuideOptions {
            file: None,
            body: Some(format!("# {title}\n\nSome *prose*.")),
            next: vec![],
        }),
    }
}

/// In-memory equivalent of the fixture site's page list.
pub fn sample_pages() -> Vec<PageRecord> {
    vec![
        PageRecord {
            path: "index".to_string(),
            title: "Home".to_string(),
            nav: true,
            template: Template::Index(IndexOptions {
                tagline: "Spry is a delightfully small 2D game framework.".to_string(),
                get_started: "quick-start".to_string(),
                repository: "https://github.com/jasonliang-dev/spry".to_string(),
                showcase: true,
                snippets: vec![Snippet {
                    title: "Hello, World!".to_string(),
                    text: None,
                    code: "\n      function spry.frame(dt)\n        font:draw('Hello', 100, 100)\n      end\n    "
                        .to_string(),
                }],
            }),
        },
        PageRecord {
            path: "quick-start".to_string(),
            title: "Quick Start".to_string(),
            nav: true,
            template: Template::Guide(GuideOptions {
                file: Some(PathBuf::from("guides/quick-start.md")),
                body: Some("# Getting Started\n\nDownload Spry.".to_string()),
                next: vec![Card {
                    title: "API Reference".to_string(),
                    text: "\n      Every function in one place.\n    ".to_string(),
                    link: "docs.html".to_string(),
                    link_text: "Explore API".to_string(),
                }],
            }),
        },
        guide_page("hot-reload", "Hot Reloading"),
        PageRecord {
            path: "plane-demo".to_string(),
            title: "Planes".to_string(),
            nav: false,
            template: Template::Demo(DemoOptions {
                video: "static/example-ships.webm".to_string(),
                source: "https://github.com/jasonliang-dev/spry/tree/master/examples/planes"
                    .to_string(),
                mount: "static/planes.zip".to_string(),
                width: 800,
                height: 600,
                text: "\n          - `W` to accelerate\n          - Spacebar to shoot\n        "
                    .to_string(),
            }),
        },
        PageRecord {
            path: "docs".to_string(),
            title: "API Reference".to_string(),
            nav: true,
            template: Template::Reference(ReferenceOptions {
                file: PathBuf::from("reference.toml"),
                sections: sample_sections(),
            }),
        },
    ]
}

pub fn sample_registry() -> Registry {
    Registry::new(sample_pages(), "index").unwrap()
}

/// A site with default config over [`sample_registry`]. Root is unused by
/// the renderer.
pub fn sample_site() -> Site {
    Site {
        root: PathBuf::from("."),
        config: SiteConfig::default(),
        registry: sample_registry(),
    }
}

// =========================================================================
// API entry builders
// =========================================================================

pub fn sample_sections() -> Vec<ApiSection> {
    vec![
        ApiSection {
            title: "Core Functions".to_string(),
            entries: vec![
                entry("spry.quit").desc("Exit the program."),
                entry("spry.platform").returns_single("string"),
            ],
        },
        ApiSection {
            title: "Image".to_string(),
            entries: vec![
                entry("spry.image_load")
                    .arg(arg("path", "string", "Path to the image file."))
                    .returns_labeled(&[("on success", "Image"), ("on failure", "nil, string")]),
                entry("Image:draw")
                    .arg(arg("x", "number", "The x position to draw at.").default("0"))
                    .arg(arg("y", "number", "The y position to draw at.").default("0")),
            ],
        },
    ]
}

/// An entry with a name and nothing else.
pub fn entry(name: &str) -> ApiEntry {
    ApiEntry {
        name: name.to_string(),
        desc: String::new(),
        example: String::new(),
        args: vec![],
        returns: Returns::Nothing,
    }
}

pub fn arg(name: &str, ty: &str, desc: &str) -> ApiArg {
    ApiArg {
        name: name.to_string(),
        ty: Some(ty.to_string()),
        desc: desc.to_string(),
        default: None,
    }
}

impl ApiEntry {
    pub fn desc(mut self, desc: &str) -> Self {
        self.desc = desc.to_string();
        self
    }

    pub fn example(mut self, example: &str) -> Self {
        self.example = example.to_string();
        self
    }

    pub fn arg(mut self, arg: ApiArg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn returns_single(mut self, ty: &str) -> Self {
        self.returns = Returns::Single(ty.to_string());
        self
    }

    pub fn returns_labeled(mut self, alts: &[(&str, &str)]) -> Self {
        self.returns = Returns::Labeled(
            alts.iter()
                .map(|(label, ty)| LabeledReturn {
                    label: label.to_string(),
                    ty: ty.to_string(),
                })
                .collect(),
        );
        self
    }
}

impl ApiArg {
    pub fn default(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    pub fn untyped(mut self) -> Self {
        self.ty = None;
        self
    }
}
