//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is organized around pages, not files. Each page leads with its
//! position and title; template kind, sources, and output files follow as
//! secondary context. The same header is used by `check` and `build`, so a
//! page looks the same in both reports.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Pages
//! 001 Home (index, home)
//! 002 Quick Start (guide)
//!     Source: guides/quick-start.md
//! 003 Planes (demo, hidden)
//!     Mount: static/planes.zip
//! 004 API Reference (reference)
//!     Source: reference.toml (2 sections, 4 entries)
//!
//! Static
//!     static/
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 Home (index) → dist/index.html
//! 002 Quick Start (guide) content/guides/quick-start.md → dist/quick-start.html
//! Static static/ → dist/static/ (3 files)
//! Generated 2 pages, 3 static files in dist
//! ```
//!
//! ## Serve
//!
//! ```text
//! Serving http://127.0.0.1:8000
//! GET /quick-start 200
//! GET /favicon.ico 404
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>` or `String`)
//! for testability and a `print_*` wrapper that writes to stdout or stderr.
//! Format functions are pure: no I/O, no side effects.

use crate::content::Site;
use crate::generate::BuildReport;
use crate::types::{PageRecord, Template};
use std::fmt::Display;
use std::net::SocketAddr;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Page header: position, title, and a parenthesized detail.
///
/// ```text
/// 002 Quick Start (guide)
/// ```
fn page_header(pos: usize, title: &str, detail: &str) -> String {
    format!("{} {} ({})", format_index(pos), title, detail)
}

/// `1 file`, `3 files`.
fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Template kind plus `home` / `hidden` markers.
fn page_flags(page: &PageRecord, home: &str) -> String {
    let mut flags = vec![page.template.kind()];
    if page.path == home {
        flags.push("home");
    } else if !page.nav {
        flags.push("hidden");
    }
    flags.join(", ")
}

// ============================================================================
// Check output
// ============================================================================

/// Format the content inventory shown by `check`.
pub fn format_check_output(site: &Site) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    let home = &site.registry.home().path;

    for (i, page) in site.registry.pages().iter().enumerate() {
        lines.push(page_header(i + 1, &page.title, &page_flags(page, home)));

        match &page.template {
            Template::Index(_) => {}
            Template::Guide(guide) => {
                if let Some(file) = &guide.file {
                    lines.push(format!("    Source: {}", file.display()));
                }
            }
            Template::Demo(demo) => {
                lines.push(format!("    Mount: {}", demo.mount));
            }
            Template::Reference(reference) => {
                let entries: usize = reference.sections.iter().map(|s| s.entries.len()).sum();
                lines.push(format!(
                    "    Source: {} ({}, {})",
                    reference.file.display(),
                    count(reference.sections.len(), "section", "sections"),
                    count(entries, "entry", "entries"),
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push("Static".to_string());
    lines.push(format!("    {}/", site.config.build.static_dir));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(site: &Site) {
    for line in format_check_output(site) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format the build report: one line per written page mapping its source to
/// the output file, then the static copy and a summary.
pub fn format_build_output(report: &BuildReport, static_dir: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.pages.len() + 2);
    for (i, page) in report.pages.iter().enumerate() {
        let header = page_header(i + 1, &page.title, page.kind);
        let line = match &page.source {
            Some(source) => format!(
                "{} {} \u{2192} {}",
                header,
                source.display(),
                page.file.display()
            ),
            None => format!("{} \u{2192} {}", header, page.file.display()),
        };
        lines.push(line);
    }
    lines.push(format!(
        "Static {}/ \u{2192} {}/ ({})",
        static_dir,
        report.output_dir.join(static_dir).display(),
        count(report.assets, "file", "files")
    ));
    lines.push(format!(
        "Generated {}, {} in {}",
        count(report.pages.len(), "page", "pages"),
        count(report.assets, "static file", "static files"),
        report.output_dir.display()
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport, static_dir: &str) {
    for line in format_build_output(report, static_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Serve output
// ============================================================================

/// Startup lines, noting when the configured port was busy.
pub fn format_serve_banner(addr: &SocketAddr, requested_port: u16) -> Vec<String> {
    let mut lines = Vec::new();
    if addr.port() != requested_port {
        lines.push(format!(
            "Port {} in use, using {} instead",
            requested_port,
            addr.port()
        ));
    }
    lines.push(format!("Serving http://{}", addr));
    lines
}

pub fn print_serve_banner(addr: &SocketAddr, requested_port: u16) {
    for line in format_serve_banner(addr, requested_port) {
        println!("{}", line);
    }
}

/// One access-log line.
pub fn format_request_line(method: &str, path: &str, status: u16) -> String {
    format!("{} {} {}", method, path, status)
}

pub fn print_request(method: &str, path: &str, status: u16) {
    println!("{}", format_request_line(method, path, status));
}

pub fn print_serve_error(err: &dyn Display) {
    eprintln!("Request error: {}", err);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GeneratedPage;
    use crate::test_helpers::sample_site;
    use std::path::PathBuf;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn page_flags_mark_home_and_hidden() {
        let site = sample_site();
        let flags = |path: &str| page_flags(site.registry.get(path).unwrap(), "index");
        assert_eq!(flags("index"), "index, home");
        assert_eq!(flags("plane-demo"), "demo, hidden");
        assert_eq!(flags("docs"), "reference");
    }

    #[test]
    fn check_lists_pages_in_order_with_flags() {
        let lines = format_check_output(&sample_site());
        assert_eq!(lines[0], "Pages");
        assert_eq!(lines[1], "001 Home (index, home)");
        assert_eq!(lines[2], "002 Quick Start (guide)");
        assert_eq!(lines[3], "    Source: guides/quick-start.md");
        assert_eq!(lines[4], "003 Hot Reloading (guide)");
        assert_eq!(lines[5], "004 Planes (demo, hidden)");
        assert_eq!(lines[6], "    Mount: static/planes.zip");
        assert_eq!(lines[7], "005 API Reference (reference)");
        assert_eq!(lines[8], "    Source: reference.toml (2 sections, 4 entries)");
    }

    #[test]
    fn check_ends_with_static_dir() {
        let lines = format_check_output(&sample_site());
        let n = lines.len();
        assert_eq!(lines[n - 2], "Static");
        assert_eq!(lines[n - 1], "    static/");
    }

    fn report() -> BuildReport {
        BuildReport {
            output_dir: PathBuf::from("dist"),
            pages: vec![
                GeneratedPage {
                    title: "Home".to_string(),
                    kind: "index",
                    source: None,
                    file: PathBuf::from("dist/index.html"),
                },
                GeneratedPage {
                    title: "Quick Start".to_string(),
                    kind: "guide",
                    source: Some(PathBuf::from("content/guides/quick-start.md")),
                    file: PathBuf::from("dist/quick-start.html"),
                },
            ],
            assets: 1,
        }
    }

    #[test]
    fn build_output_one_line_per_page() {
        let lines = format_build_output(&report(), "static");
        assert_eq!(lines[0], "001 Home (index) \u{2192} dist/index.html");
        assert_eq!(
            lines[1],
            "002 Quick Start (guide) content/guides/quick-start.md \u{2192} dist/quick-start.html"
        );
        assert_eq!(lines[2], "Static static/ \u{2192} dist/static/ (1 file)");
        assert_eq!(lines[3], "Generated 2 pages, 1 static file in dist");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn serve_banner_notes_port_fallback() {
        let addr: SocketAddr = "127.0.0.1:8000".parse().unwrap();
        assert_eq!(
            format_serve_banner(&addr, 8000),
            vec!["Serving http://127.0.0.1:8000"]
        );

        let addr: SocketAddr = "127.0.0.1:8002".parse().unwrap();
        let lines = format_serve_banner(&addr, 8000);
        assert_eq!(lines[0], "Port 8000 in use, using 8002 instead");
        assert_eq!(lines[1], "Serving http://127.0.0.1:8002");
    }

    #[test]
    fn request_line() {
        assert_eq!(format_request_line("GET", "/docs", 200), "GET /docs 200");
        assert_eq!(
            format_request_line("GET", "/missing", 404),
            "GET /missing 404"
        );
    }
}
