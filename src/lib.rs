//! # Spry Site
//!
//! Static site generator and development server for the website of Spry, a
//! small 2D game framework. The site is a fixed set of pages (a landing
//! page, guides, playable demos, and an API reference) described by data
//! files and rendered to HTML.
//!
//! # Architecture: One Renderer, Two Drivers
//!
//! ```text
//!                 ┌──────────────┐
//! config.toml ──▶ │              │
//! pages.toml  ──▶ │  Site::load  │ ──▶ Registry (ordered pages + path index)
//! guides/*.md ──▶ │              │
//! reference   ──▶ └──────────────┘
//!                        │
//!        ┌───────────────┴────────────────┐
//!        ▼                                ▼
//!   build: every page              serve: one page per request
//!   render_page → dist/<p>.html    resolve(path) → render_page → 200
//!   copy static/ → dist/static/    else static/ file → 200, else 404
//! ```
//!
//! Both drivers share the resolver and the renderer, so a page served in
//! development is byte-for-byte the file a build writes.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, stock defaults, merging, validation |
//! | [`types`] | Content model: page records, template options, API entries |
//! | [`content`] | Reads `pages.toml` and the guide / reference files it names |
//! | [`registry`] | Ordered page registry and request path normalization |
//! | [`render`] | Page shell and the index, guide, and demo bodies (Maud) |
//! | [`reference`] | API reference body: argument tables and return shapes |
//! | [`text`] | Indentation stripping, anchors, signatures |
//! | [`generate`] | Build mode: write every page and copy static assets |
//! | [`serve`] | Serve mode: `tiny_http` request loop |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## Content as Data
//!
//! Pages are records in `content/pages.toml`, each with a tagged `template`
//! table. Deserialization does the validation: an unknown template kind or a
//! missing option is a load error naming the file, never a broken page.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Malformed markup
//! is a compile error, interpolation is escaped, and there is no template
//! directory to ship. Markdown goes through `pulldown-cmark` and is inserted
//! pre-escaped.
//!
//! ## Explicit Configuration
//!
//! The resolved [`config::SiteConfig`] is stored on [`content::Site`] and
//! handed to everything that needs it. There are no globals.

pub mod config;
pub mod content;
pub mod generate;
pub mod output;
pub mod reference;
pub mod registry;
pub mod render;
pub mod serve;
pub mod text;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
