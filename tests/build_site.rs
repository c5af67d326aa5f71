//! End-to-end: load the fixture project, build it, and serve it from the
//! same loaded site.

use spry_site::config::{self, CONFIG_FILENAME};
use spry_site::content::{ContentError, Site};
use spry_site::generate::generate;
use spry_site::serve::respond;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

fn fixture_project() -> TempDir {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    let tmp = TempDir::new().unwrap();
    for entry in WalkDir::new(&src) {
        let entry = entry.unwrap();
        let target = tmp.path().join(entry.path().strip_prefix(&src).unwrap());
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
    tmp
}

fn load(root: &Path) -> Site {
    let config = config::load_config(root).unwrap();
    Site::load(root, config).unwrap()
}

#[test]
fn build_then_serve_agree() {
    let tmp = fixture_project();
    let site = load(tmp.path());
    let report = generate(&site).unwrap();
    assert_eq!(report.pages.len(), site.registry.len());

    for page in site.registry.pages() {
        let built = fs::read(tmp.path().join("dist").join(page.file_name())).unwrap();
        let served = respond(&site, &format!("/{}", page.path)).unwrap();
        assert_eq!(served.status, 200);
        assert_eq!(served.body, built, "{}", page.path);
    }
}

#[test]
fn built_static_assets_match_served_assets() {
    let tmp = fixture_project();
    let site = load(tmp.path());
    generate(&site).unwrap();

    let built = fs::read(tmp.path().join("dist/static/style.css")).unwrap();
    let served = respond(&site, "/static/style.css").unwrap();
    assert_eq!(served.body, built);
    assert_eq!(served.content_type, Some("text/css"));
}

#[test]
fn built_pages_link_to_each_other() {
    let tmp = fixture_project();
    let site = load(tmp.path());
    generate(&site).unwrap();

    let dist = tmp.path().join("dist");
    let home = fs::read_to_string(dist.join("index.html")).unwrap();
    for link in ["quick-start.html", "hot-reload.html", "docs.html", "plane-demo.html"] {
        assert!(home.contains(&format!(r#"href="{link}""#)), "{link}");
        assert!(dist.join(link).is_file(), "{link}");
    }
}

#[test]
fn reference_page_from_toml() {
    let tmp = fixture_project();
    let site = load(tmp.path());
    let reply = respond(&site, "/docs.html").unwrap();
    let html = String::from_utf8(reply.body).unwrap();

    assert!(html.contains("spry.image_load(path)"));
    assert!(html.contains("Image:draw(x, y)"));
    assert!(html.contains("<th>Default</th>"));
    assert!(html.contains("Returns nothing."));
    assert!(html.contains("on failure"));
}

#[test]
fn config_file_changes_output_location_and_name() {
    let tmp = fixture_project();
    fs::write(
        tmp.path().join(CONFIG_FILENAME),
        "[site]\nname = \"Spry Docs\"\n\n[build]\noutput_dir = \"public\"\n",
    )
    .unwrap();
    let site = load(tmp.path());
    generate(&site).unwrap();

    let html = fs::read_to_string(tmp.path().join("public/index.html")).unwrap();
    assert!(html.contains("<title>Spry Docs</title>"));
    assert!(!tmp.path().join("dist").exists());
}

#[test]
fn broken_content_fails_to_load() {
    let tmp = fixture_project();
    fs::remove_file(tmp.path().join("content/guides/quick-start.md")).unwrap();
    let config = config::load_config(tmp.path()).unwrap();
    let err = Site::load(tmp.path(), config).unwrap_err();
    assert!(matches!(err, ContentError::Io { .. }), "{err}");
    assert!(err.to_string().contains("quick-start.md"), "{err}");
}

#[test]
fn shipped_content_loads_and_renders() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let site = load(root);
    assert_eq!(site.registry.home().path, "index");

    let nav: Vec<&str> = site
        .registry
        .nav_pages()
        .map(|page| page.path.as_str())
        .collect();
    assert_eq!(
        nav,
        ["quick-start", "ufo-game", "hot-reload", "distribution", "docs"]
    );

    let docs = respond(&site, "/docs").unwrap();
    let html = String::from_utf8(docs.body).unwrap();
    assert!(html.contains("spry.conf(t)"));
    assert!(html.contains("G-1691VYRF8G"));

    let demo = respond(&site, "/jump-demo.html").unwrap();
    assert_eq!(demo.status, 200);
}
