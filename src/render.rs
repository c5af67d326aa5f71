//! HTML page rendering.
//!
//! Turns a [`PageRecord`] into a complete HTML document. Every page shares
//! one shell:
//!
//! ```text
//! <head>     metadata, fonts, stylesheets, theme-init script
//! <nav>      fixed bar: brand → home, one link per nav page, theme toggle
//! <div>      body offset by the nav height ← template sub-renderer output
//! <footer>   copyright + configured links
//! ```
//!
//! The body comes from the sub-renderer selected by the page's
//! [`Template`] variant:
//!
//! | Kind | Body |
//! |------|------|
//! | `index` | tagline, call-to-action links, demo showcase, code snippets |
//! | `guide` | Markdown article, optional "What next?" cards |
//! | `demo` | description, canvas placeholder, runtime bootstrap script |
//! | `reference` | API entries (see [`crate::reference`]) |
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) like the rest of the crate's HTML:
//! interpolated strings are escaped, only Markdown output and fixed inline
//! scripts go through `PreEscaped`. Multi-line content is run through
//! [`dedent`] before it is treated as Markdown or code.

use crate::content::Site;
use crate::reference;
use crate::text::dedent;
use crate::types::{DemoOptions, GuideOptions, IndexOptions, PageRecord, Template};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};

const FONTS_URL: &str = "https://fonts.googleapis.com/css2?family=Poppins:wght@400;600;700&family=Roboto+Mono:wght@400;600;700&display=swap";

/// Applies the saved or preferred color scheme before first paint, and
/// defines the toggle used by the nav button.
const THEME_SCRIPT: &str = r#"
  const doc = document.documentElement
  const prefersDark = localStorage.theme === undefined && window.matchMedia('(prefers-color-scheme: dark)').matches
  if (localStorage.theme === 'dark' || prefersDark) {
    doc.classList.add('dark-mode')
    document.getElementById('hljs-dark').removeAttribute('disabled')
  } else {
    document.getElementById('hljs-light').removeAttribute('disabled')
  }

  function toggleTheme() {
    const doc = document.documentElement
    if (doc.classList.contains('dark-mode')) {
      doc.classList.remove('dark-mode')
      localStorage.theme = 'light'
      document.getElementById('hljs-light').removeAttribute('disabled')
      document.getElementById('hljs-dark').setAttribute('disabled', 'disabled')
    } else {
      doc.classList.add('dark-mode')
      localStorage.theme = 'dark'
      document.getElementById('hljs-dark').removeAttribute('disabled')
      document.getElementById('hljs-light').setAttribute('disabled', 'disabled')
    }
  }
"#;

const SUN_ICON: &str = r#"<svg class="icon-light" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 20" fill="currentColor" width="20" height="20"><path d="M10 2a.75.75 0 01.75.75v1.5a.75.75 0 01-1.5 0v-1.5A.75.75 0 0110 2zM10 15a.75.75 0 01.75.75v1.5a.75.75 0 01-1.5 0v-1.5A.75.75 0 0110 15zM10 7a3 3 0 100 6 3 3 0 000-6z"/></svg>"#;

const MOON_ICON: &str = r#"<svg class="icon-dark" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 20" fill="currentColor" width="20" height="20"><path fill-rule="evenodd" d="M7.455 2.004a.75.75 0 01.26.77 7 7 0 009.958 7.967.75.75 0 011.067.853A8.5 8.5 0 116.647 1.921a.75.75 0 01.808.083z" clip-rule="evenodd"/></svg>"#;

const ARROW_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 20" fill="currentColor" width="20" height="20"><path fill-rule="evenodd" d="M7.21 14.77a.75.75 0 01.02-1.06L11.168 10 7.23 6.29a.75.75 0 111.04-1.08l4.5 4.25a.75.75 0 010 1.08l-4.5 4.25a.75.75 0 01-1.06-.02z" clip-rule="evenodd"/></svg>"#;

/// Render a complete HTML document for `page`.
pub fn render_page(site: &Site, page: &PageRecord) -> Markup {
    base_document(site, page, render_body(site, page))
}

/// Dispatch to the sub-renderer for the page's template.
fn render_body(site: &Site, page: &PageRecord) -> Markup {
    match &page.template {
        Template::Index(index) => render_index(site, index),
        Template::Guide(guide) => render_guide(guide),
        Template::Demo(demo) => render_demo(site, page, demo),
        Template::Reference(options) => reference::render_reference(&options.sections),
    }
}

/// Convert Markdown to HTML.
///
/// Content is trusted: raw HTML in the source (embedded `<video>` tags in
/// guides, for instance) passes through.
pub fn markdown(source: &str) -> Markup {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(source, options);
    let mut body = String::new();
    md_html::push_html(&mut body, parser);
    PreEscaped(body)
}

/// `<title>` text: the site name alone on the home page.
pub fn page_title(site: &Site, page: &PageRecord) -> String {
    let name = &site.config.site.name;
    if page.path == site.registry.home().path {
        name.clone()
    } else {
        format!("{} | {}", page.title, name)
    }
}

// ============================================================================
// Shell
// ============================================================================

/// Renders the document shell around a page body.
fn base_document(site: &Site, page: &PageRecord, content: Markup) -> Markup {
    let meta = &site.config.site;
    let assets = &site.config.build.static_dir;
    let nav_height = &site.config.theme.nav_height;
    let title = page_title(site, page);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta http-equiv="Content-Type" content="text/html; charset=utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="title" content=(meta.name);
                meta name="description" content=(meta.description);
                meta name="keywords" content=(meta.keywords);
                meta name="robots" content="index, follow";
                meta name="author" content=(meta.author);
                meta property="og:title" content=(title);
                meta property="og:site_name" content=(meta.name);
                meta property="og:url" content=(meta.url);
                meta property="og:description" content=(meta.description);
                meta property="og:type" content="website";
                title { (title) }
                link rel="preconnect" href="https://fonts.googleapis.com";
                link rel="preconnect" href="https://fonts.gstatic.com" crossorigin;
                link rel="stylesheet" href=(FONTS_URL);
                @if let Some(id) = &meta.analytics_id {
                    (analytics(id))
                }
                link id="hljs-light" rel="stylesheet" href={ (assets) "/atom-one-light.min.css" } disabled;
                link id="hljs-dark" rel="stylesheet" href={ (assets) "/default-dark.min.css" } disabled;
                script src={ (assets) "/highlight.min.js" } {}
                link rel="stylesheet" href={ (assets) "/style.css" };
                script { (PreEscaped(THEME_SCRIPT)) }
            }
            body {
                (render_nav(site, page, nav_height))
                div.page style={ "margin-top: " (nav_height) } {
                    (content)
                    (footer(site))
                }
                script { "hljs.highlightAll()" }
            }
        }
    }
}

/// Google tag snippet.
fn analytics(id: &str) -> Markup {
    let script = format!(
        "\n  window.dataLayer = window.dataLayer || [];\n  function gtag(){{dataLayer.push(arguments);}}\n  gtag('js', new Date());\n  gtag('config', {});\n",
        js_string(id)
    );
    html! {
        script async src={ "https://www.googletagmanager.com/gtag/js?id=" (id) } {}
        script { (PreEscaped(script)) }
    }
}

/// Renders the fixed navigation bar.
///
/// Links follow registry order; the home page is the brand link rather than
/// a menu entry.
pub fn render_nav(site: &Site, current: &PageRecord, nav_height: &str) -> Markup {
    let home = site.registry.home();
    html! {
        header.site-nav style={ "height: " (nav_height) "; z-index: 100" } {
            div.nav-inner {
                a.brand href=(home.file_name()) { (site.config.site.name) }
                nav.nav-links {
                    @for page in site.registry.nav_pages() {
                        @let is_current = page.path == current.path;
                        a class=[is_current.then_some("current")] href=(page.file_name()) {
                            (page.title)
                        }
                    }
                }
                button.theme-toggle type="button" onclick="toggleTheme()" aria-label="Toggle color theme" {
                    (PreEscaped(SUN_ICON))
                    (PreEscaped(MOON_ICON))
                }
            }
        }
    }
}

fn footer(site: &Site) -> Markup {
    let meta = &site.config.site;
    html! {
        footer.site-footer {
            div.copyright { (meta.copyright) }
            @for link in &meta.footer_links {
                a href=(link.href) { (link.title) }
            }
        }
    }
}

// ============================================================================
// Sub-renderers
// ============================================================================

/// Home page body.
fn render_index(site: &Site, index: &IndexOptions) -> Markup {
    let name = &site.config.site.name;
    let get_started = format!("{}.html", index.get_started);
    let demos: Vec<(&PageRecord, &DemoOptions)> = site
        .registry
        .pages()
        .iter()
        .filter_map(|page| match &page.template {
            Template::Demo(demo) => Some((page, demo)),
            _ => None,
        })
        .collect();

    html! {
        section.intro {
            div.tagline { (markdown(&dedent(&index.tagline))) }
            a.button.primary href=(get_started) {
                "Get started with " (name)
                (PreEscaped(ARROW_ICON))
            }
            br;
            a.button href=(index.repository) { "View on GitHub" }
        }
        @if index.showcase && !demos.is_empty() {
            section.showcase {
                @for (page, demo) in &demos {
                    a.showcase-tile href=(page.file_name()) {
                        div.showcase-title { h3 { (page.title) } }
                        video autoplay muted loop playsinline {
                            source src=(demo.video) type="video/webm";
                        }
                    }
                }
            }
        }
        @if !index.snippets.is_empty() {
            section.snippets {
                @for snippet in &index.snippets {
                    h4 { (snippet.title) }
                    @if let Some(text) = &snippet.text {
                        (markdown(&dedent(text)))
                    }
                    (code_block(&snippet.code))
                }
                a.more href=(get_started) {
                    "Create a game using " (name)
                    (PreEscaped(ARROW_ICON))
                }
            }
        }
    }
}

/// Guide body: the article, then any "What next?" cards.
fn render_guide(guide: &GuideOptions) -> Markup {
    html! {
        article.prose {
            (markdown(&dedent(guide.markdown())))
        }
        @if !guide.next.is_empty() {
            section.what-next {
                h2 { "What next?" }
                div.cards {
                    @for card in &guide.next {
                        div.card {
                            h3 { (card.title) }
                            p { (dedent(&card.text)) }
                            a href=(card.link) {
                                (card.link_text)
                                (PreEscaped(ARROW_ICON))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Demo body: canvas placeholder plus the runtime bootstrap.
fn render_demo(site: &Site, page: &PageRecord, demo: &DemoOptions) -> Markup {
    let home = site.registry.home();
    let runtime = format!("{}/spry.js", site.config.build.static_dir);
    html! {
        div.demo style={ "width: " (demo.width) "px" } {
            div.prose {
                h1 { (page.title) }
                (markdown(&dedent(&demo.text)))
            }
            canvas id="canvas"
                tabindex="-1"
                oncontextmenu="event.preventDefault()"
                width=(demo.width)
                height=(demo.height)
                style={ "width: " (demo.width) "px; height: " (demo.height) "px" } {}
            div.demo-links {
                a href=(home.file_name()) { "Back to home" }
                a href=(demo.source) { "View source code" }
            }
        }
        script type="text/javascript" { (PreEscaped(demo_script(demo))) }
        script src=(runtime) type="text/javascript" {}
    }
}

/// Globals the web runtime reads at startup.
fn demo_script(demo: &DemoOptions) -> String {
    format!(
        "\n  var canvas = document.getElementById('canvas')\n  var Module = {{ canvas }}\n  var spryMount = {}\n  var spryWidth = {}\n  var spryHeight = {}\n",
        js_string(&demo.mount),
        demo.width,
        demo.height,
    )
}

/// A highlighted Lua code block from an indented snippet.
pub fn code_block(code: &str) -> Markup {
    html! {
        pre {
            code.language-lua { (dedent(code)) }
        }
    }
}

/// JavaScript string literal, safe to embed in a `<script>` element.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}

// ============================================================================
// Tests
// ============================================================================
