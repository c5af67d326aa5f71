//! Development server.
//!
//! Renders pages on demand instead of reading a build output directory, so
//! edits to `static/` show up on the next request. Content files are read
//! once at startup.
//!
//! ## Request Resolution
//!
//! ```text
//! GET /quick-start?x=1
//!   1. drop the query, percent-decode     → /quick-start
//!   2. registered page?                   → 200 text/html, rendered page
//!   3. file under the static directory?   → 200 raw bytes, type by extension
//!   4. otherwise                          → 404 text/plain "'/quick-start' Not Found"
//! ```
//!
//! One request is handled to completion before the next is accepted.
//! [`respond`] is pure apart from reading static files, and is what the
//! tests drive; [`serve`] only moves bytes between it and `tiny_http`.

use crate::content::Site;
use crate::output;
use crate::render::render_page;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Number of successive ports tried before giving up.
const MAX_PORT_RETRIES: u16 = 10;

const HTML_TYPE: &str = "text/html; charset=utf-8";

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Invalid interface address '{interface}': {source}")]
    Interface {
        interface: String,
        #[source]
        source: AddrParseError,
    },
    #[error("Failed to bind after {attempts} attempts (ports {first}-{last}): {message}")]
    Bind {
        attempts: u16,
        first: u16,
        last: u16,
        message: String,
    },
}

/// A response before it is handed to the HTTP library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    /// `None` sends no `Content-Type` header at all.
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
}

impl Reply {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: Some(HTML_TYPE),
            body: body.into_bytes(),
        }
    }

    fn not_found(path: &str) -> Self {
        Self {
            status: 404,
            content_type: Some("text/plain"),
            body: format!("'{path}' Not Found").into_bytes(),
        }
    }
}

/// Bind and serve until the process is interrupted.
pub fn serve(site: &Site) -> Result<(), ServeError> {
    let serve = &site.config.serve;
    let interface: IpAddr = serve
        .interface
        .parse()
        .map_err(|source| ServeError::Interface {
            interface: serve.interface.clone(),
            source,
        })?;

    let (server, addr) = try_bind_port(interface, serve.port, MAX_PORT_RETRIES)?;
    output::print_serve_banner(&addr, serve.port);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(site, request) {
            output::print_serve_error(&e);
        }
    }
    Ok(())
}

/// Bind `interface:base_port`, moving to the next port while it is in use.
fn try_bind_port(
    interface: IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr), ServeError> {
    let mut last_error = String::new();
    let mut last_port = base_port;
    let mut attempts = 0;
    for port in candidate_ports(base_port, max_retries) {
        let addr = SocketAddr::new(interface, port);
        attempts += 1;
        match Server::http(addr) {
            Ok(server) => return Ok((server, addr)),
            Err(e) => {
                last_error = e.to_string();
                last_port = port;
            }
        }
    }
    Err(ServeError::Bind {
        attempts,
        first: base_port,
        last: last_port,
        message: last_error,
    })
}

/// `base`, `base + 1`, ... up to `count` ports, stopping at the top of the
/// port range.
fn candidate_ports(base: u16, count: u16) -> impl Iterator<Item = u16> {
    (0..count).map_while(move |offset| base.checked_add(offset))
}

fn handle_request(site: &Site, request: Request) -> io::Result<()> {
    let method = request.method().to_string();
    let url = request.url().to_string();

    let reply = match respond(site, &url) {
        Ok(reply) => reply,
        Err(e) => {
            output::print_serve_error(&e);
            Reply {
                status: 500,
                content_type: Some("text/plain"),
                body: b"Internal Server Error".to_vec(),
            }
        }
    };
    output::print_request(&method, &request_path(&url), reply.status);

    let mut response = Response::from_data(reply.body).with_status_code(StatusCode(reply.status));
    if let Some(content_type) = reply.content_type
        && let Ok(header) = Header::from_bytes("Content-Type", content_type)
    {
        response.add_header(header);
    }
    request.respond(response)
}

/// Build the reply for a raw request URL.
pub fn respond(site: &Site, url: &str) -> io::Result<Reply> {
    let path = request_path(url);

    if let Some(page) = site.registry.resolve(&path) {
        return Ok(Reply::html(render_page(site, page).into_string()));
    }

    if let Some(file) = static_file(site, &path) {
        return Ok(Reply {
            status: 200,
            content_type: content_type(&file),
            body: fs::read(&file)?,
        });
    }

    Ok(Reply::not_found(&path))
}

/// Percent-decoded path with the query string removed.
pub fn request_path(url: &str) -> String {
    let raw = url.split_once('?').map_or(url, |(path, _)| path);
    urlencoding::decode(raw)
        .unwrap_or(Cow::Borrowed(raw))
        .into_owned()
}

/// An existing file inside the static directory named by `path`.
///
/// Only plain relative components are accepted, so `..` and absolute paths
/// never escape the static directory.
fn static_file(site: &Site, path: &str) -> Option<PathBuf> {
    let relative = Path::new(path.trim_start_matches('/'));
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    if !relative.starts_with(&site.config.build.static_dir) {
        return None;
    }
    let file = site.root.join(relative);
    file.is_file().then_some(file)
}

/// MIME type by file extension. Unlisted extensions get no header.
pub fn content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let content_type = match ext.as_str() {
        "css" => "text/css",
        "js" => "text/javascript",
        "wasm" => "application/wasm",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webm" => "video/webm",
        "zip" => "application/zip",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "ttf" => "font/ttf",
        "woff2" => "font/woff2",
        "html" => HTML_TYPE,
        _ => return None,
    };
    Some(content_type)
}
