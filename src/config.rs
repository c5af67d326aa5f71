//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives at
//! the project root and is optional: stock defaults cover every value, and a
//! user file only needs the keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Spry"
//! description = "Spry is a delightfully small 2D game framework ..."
//! keywords = "game, development, love2d, lua, framework"
//! author = "Jason Liang"
//! url = "https://jasonliang.js.org/spry/"
//! copyright = "© 2023 Jason Liang"
//! # analytics_id = "G-XXXXXXXXXX"   # Google tag id, omitted when unset
//!
//! [[site.footer_links]]          # replaces the whole default list
//! title = "API Reference"
//! href = "docs.html"
//!
//! [[site.footer_links]]
//! title = "GitHub"
//! href = "https://github.com/jasonliang-dev/spry"
//!
//! [build]
//! content_dir = "content"   # pages.toml, guides, reference data
//! static_dir = "static"     # copied verbatim to <output_dir>/<static_dir>
//! output_dir = "dist"       # wiped and recreated on every build
//!
//! [theme]
//! nav_height = "3.5rem"     # height of the fixed navigation bar (CSS length)
//!
//! [serve]
//! interface = "127.0.0.1"
//! port = 8000
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// Name of the configuration file at the project root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// This is the single process-wide configuration value. It is handed to the
/// content loader, the renderer, and both drivers explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Metadata emitted in every page head and footer.
    pub site: SiteMeta,
    /// Input and output directory layout.
    pub build: BuildConfig,
    /// Layout constants shared by every page.
    pub theme: ThemeConfig,
    /// Development server settings.
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        for (key, dir) in [
            ("build.content_dir", &self.build.content_dir),
            ("build.static_dir", &self.build.static_dir),
            ("build.output_dir", &self.build.output_dir),
        ] {
            if dir.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        // The static dir doubles as a URL prefix, so it has to be a plain
        // relative path.
        let static_dir = Path::new(&self.build.static_dir);
        if !static_dir
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(ConfigError::Validation(
                "build.static_dir must be a relative path without '..'".into(),
            ));
        }
        if self.theme.nav_height.trim().is_empty() {
            return Err(ConfigError::Validation(
                "theme.nav_height must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Metadata for the `<head>` and footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Site name: brand link text and `<title>` suffix.
    pub name: String,
    /// `description` and `og:description` meta content.
    pub description: String,
    pub keywords: String,
    pub author: String,
    /// Canonical site URL for `og:url`.
    pub url: String,
    /// Footer copyright line.
    pub copyright: String,
    /// Google tag id. The analytics snippet is only emitted when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_id: Option<String>,
    /// Extra links shown in the footer, in order.
    pub footer_links: Vec<Link>,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            name: "Spry".to_string(),
            description: "Spry is a delightfully small 2D game framework made for rapid \
                          prototyping and game jams. Inspired by LÖVE."
                .to_string(),
            keywords: "game, development, love2d, lua, framework".to_string(),
            author: "Jason Liang".to_string(),
            url: "https://jasonliang.js.org/spry/".to_string(),
            copyright: "© 2023 Jason Liang".to_string(),
            analytics_id: None,
            footer_links: vec![
                Link {
                    title: "API Reference".to_string(),
                    href: "docs.html".to_string(),
                },
                Link {
                    title: "GitHub".to_string(),
                    href: "https://github.com/jasonliang-dev/spry".to_string(),
                },
            ],
        }
    }
}

/// A titled hyperlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub title: String,
    pub href: String,
}

/// Directory layout, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory holding `pages.toml` and the files it references.
    pub content_dir: String,
    /// Static asset directory. Copied verbatim on build, served raw on serve.
    pub static_dir: String,
    /// Build output directory. Deleted and recreated on every build.
    pub output_dir: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: "content".to_string(),
            static_dir: "static".to_string(),
            output_dir: "dist".to_string(),
        }
    }
}

/// Layout constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Height of the fixed navigation bar. The page body is offset by the
    /// same amount.
    pub nav_height: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            nav_height: "3.5rem".to_string(),
        }
    }
}

/// Development server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServeConfig {
    /// Interface address to bind.
    pub interface: String,
    /// First port to try. Up to nine following ports are tried when busy.
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the project root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Spry Site Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site metadata (page head, navigation brand, footer)
# ---------------------------------------------------------------------------
[site]
name = "Spry"
description = "Spry is a delightfully small 2D game framework made for rapid prototyping and game jams. Inspired by LÖVE."
keywords = "game, development, love2d, lua, framework"
author = "Jason Liang"
url = "https://jasonliang.js.org/spry/"
copyright = "© 2023 Jason Liang"

# Google tag id. No analytics snippet is emitted when unset.
# analytics_id = "G-XXXXXXXXXX"

[[site.footer_links]]
title = "API Reference"
href = "docs.html"

[[site.footer_links]]
title = "GitHub"
href = "https://github.com/jasonliang-dev/spry"

# ---------------------------------------------------------------------------
# Directory layout (relative to the project root)
# ---------------------------------------------------------------------------
[build]
# Holds pages.toml and the guide / reference files it points to.
content_dir = "content"

# Copied verbatim to <output_dir>/<static_dir> on build, served raw on serve.
static_dir = "static"

# WARNING: deleted and recreated on every build.
output_dir = "dist"

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[theme]
# Height of the fixed navigation bar (CSS length).
nav_height = "3.5rem"

# ---------------------------------------------------------------------------
# Development server
# ---------------------------------------------------------------------------
[serve]
interface = "127.0.0.1"
# If the port is busy the next nine ports are tried in turn.
port = 8000
"##
}
