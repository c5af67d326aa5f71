//! Content model shared by the loader, registry, and renderers.
//!
//! Everything here deserializes straight from the content files. A page's
//! template is a tagged union, so every renderer receives exactly the
//! options it needs and a missing field is a load error rather than a
//! render-time surprise.

use serde::Deserialize;
use std::path::PathBuf;

/// One routable, renderable page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageRecord {
    /// URL slug and output filename stem. Unique within the registry.
    pub path: String,
    /// Shown in `<title>` and the navigation bar.
    pub title: String,
    /// Whether the page is listed in the navigation bar.
    #[serde(default = "default_true")]
    pub nav: bool,
    pub template: Template,
}

fn default_true() -> bool {
    true
}

impl PageRecord {
    /// Output filename in build mode.
    pub fn file_name(&self) -> String {
        format!("{}.html", self.path)
    }
}

/// Template kind plus its options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Template {
    Index(IndexOptions),
    Guide(GuideOptions),
    Demo(DemoOptions),
    Reference(ReferenceOptions),
}

impl Template {
    /// The `kind` tag as written in `pages.toml`.
    pub fn kind(&self) -> &'static str {
        match self {
            Template::Index(_) => "index",
            Template::Guide(_) => "guide",
            Template::Demo(_) => "demo",
            Template::Reference(_) => "reference",
        }
    }
}

/// Home page: tagline, call to action, demo showcase, code snippets.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexOptions {
    /// Markdown rendered as the large intro paragraph.
    pub tagline: String,
    /// Page path the "get started" button points to.
    pub get_started: String,
    /// Project repository URL.
    pub repository: String,
    /// Show a video tile for every demo page.
    #[serde(default = "default_true")]
    pub showcase: bool,
    #[serde(default)]
    pub snippets: Vec<Snippet>,
}

/// A short titled code sample on the home page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snippet {
    pub title: String,
    #[serde(default)]
    pub text: Option<String>,
    pub code: String,
}

/// Long-form Markdown article.
///
/// Exactly one of `file` and `body` is given in `pages.toml`. The loader
/// reads `file` into `body`, so renderers only ever look at `body`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuideOptions {
    /// Markdown file relative to the content directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub body: Option<String>,
    /// "What next?" cards shown after the article.
    #[serde(default)]
    pub next: Vec<Card>,
}

impl GuideOptions {
    /// Markdown source. Empty until the loader has resolved `file`.
    pub fn markdown(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    pub title: String,
    pub text: String,
    pub link: String,
    pub link_text: String,
}

/// Playable web build of an example game.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemoOptions {
    /// Looping preview video, used by the home page showcase.
    pub video: String,
    /// Source repository URL.
    pub source: String,
    /// Asset archive the web runtime mounts.
    pub mount: String,
    pub width: u32,
    pub height: u32,
    /// Markdown shown above the canvas (controls, warnings).
    pub text: String,
}

/// API reference page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceOptions {
    /// Reference TOML relative to the content directory.
    pub file: PathBuf,
    /// Filled in by the loader from `file`.
    #[serde(skip)]
    pub sections: Vec<ApiSection>,
}

/// Top level of a reference file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiReference {
    #[serde(default)]
    pub sections: Vec<ApiSection>,
}

/// A titled group of API entries ("Core Functions", "Image", ...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    pub title: String,
    #[serde(default)]
    pub entries: Vec<ApiEntry>,
}

/// One documented function or method.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiEntry {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub args: Vec<ApiArg>,
    #[serde(default)]
    pub returns: Returns,
}

/// One row of an arguments table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiArg {
    /// Argument name. A leading `.` marks a field of the preceding table.
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    #[serde(default)]
    pub desc: String,
    /// Rendered verbatim, so both `0.2` and `'Spry'` are written as strings.
    #[serde(default)]
    pub default: Option<String>,
}

/// What a function returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawReturns")]
pub enum Returns {
    #[default]
    Nothing,
    Single(String),
    /// Alternatives distinguished by a label, e.g. "on success" / "on failure".
    Labeled(Vec<LabeledReturn>),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabeledReturn {
    pub label: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReturns {
    Single(String),
    Labeled(Vec<LabeledReturn>),
}

impl From<RawReturns> for Returns {
    fn from(raw: RawReturns) -> Self {
        match raw {
            RawReturns::Single(ty) if ty.trim().is_empty() => Returns::Nothing,
            RawReturns::Single(ty) => Returns::Single(ty),
            RawReturns::Labeled(alts) if alts.is_empty() => Returns::Nothing,
            RawReturns::Labeled(alts) => Returns::Labeled(alts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_defaults_to_nothing_when_absent() {
        let entry: ApiEntry = toml::from_str(r#"name = "spry.quit""#).unwrap();
        assert_eq!(entry.returns, Returns::Nothing);
        assert!(entry.args.is_empty());
    }

    #[test]
    fn returns_single_from_string() {
        let entry: ApiEntry = toml::from_str(
            r#"
name = "spry.dt"
returns = "number"
"#,
        )
        .unwrap();
        assert_eq!(entry.returns, Returns::Single("number".to_string()));
    }

    #[test]
    fn returns_empty_string_is_nothing() {
        let entry: ApiEntry = toml::from_str("name = \"f\"\nreturns = \"\"\n").unwrap();
        assert_eq!(entry.returns, Returns::Nothing);
    }

    #[test]
    fn returns_labeled_keeps_order() {
        let entry: ApiEntry = toml::from_str(
            r#"
name = "spry.widget_load"
returns = [
  { label = "on success", type = "Widget" },
  { label = "on failure", type = "nil, string" },
]
"#,
        )
        .unwrap();
        let Returns::Labeled(alts) = entry.returns else {
            panic!("expected labeled returns");
        };
        assert_eq!(alts[0].label, "on success");
        assert_eq!(alts[0].ty, "Widget");
        assert_eq!(alts[1].label, "on failure");
        assert_eq!(alts[1].ty, "nil, string");
    }

    #[test]
    fn arg_type_and_default_are_optional() {
        let arg: ApiArg = toml::from_str("name = \"dt\"\ndesc = \"Delta time.\"\n").unwrap();
        assert_eq!(arg.ty, None);
        assert_eq!(arg.default, None);

        let arg: ApiArg =
            toml::from_str("name = \"sx\"\ntype = \"number\"\ndefault = \"1\"\n").unwrap();
        assert_eq!(arg.ty.as_deref(), Some("number"));
        assert_eq!(arg.default.as_deref(), Some("1"));
    }

    #[test]
    fn page_template_is_tagged_by_kind() {
        let page: PageRecord = toml::from_str(
            r#"
path = "plane-demo"
title = "Planes"
nav = false

[template]
kind = "demo"
video = "static/example-ships.webm"
source = "https://example.com/planes"
mount = "static/planes.zip"
width = 800
height = 600
text = "- Spacebar to shoot"
"#,
        )
        .unwrap();
        assert!(!page.nav);
        assert_eq!(page.template.kind(), "demo");
        let Template::Demo(demo) = &page.template else {
            panic!("expected demo");
        };
        assert_eq!((demo.width, demo.height), (800, 600));
    }

    #[test]
    fn page_nav_defaults_to_true() {
        let page: PageRecord = toml::from_str(
            r##"
path = "hot-reload"
title = "Hot Reloading"
template = { kind = "guide", body = "# Hot Reloading" }
"##,
        )
        .unwrap();
        assert!(page.nav);
        assert_eq!(page.file_name(), "hot-reload.html");
    }

    #[test]
    fn unknown_template_kind_rejected() {
        let result: Result<PageRecord, _> = toml::from_str(
            r#"
path = "blog"
title = "Blog"
template = { kind = "blog" }
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn demo_missing_required_field_rejected() {
        let result: Result<PageRecord, _> = toml::from_str(
            r#"
path = "jump-demo"
title = "Jump"
template = { kind = "demo", video = "v.webm", source = "s", mount = "m.zip", width = 500, text = "" }
"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("height"), "{err}");
    }
}
