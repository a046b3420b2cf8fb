//! Static file serving module
//!
//! Maps a request onto the root directory: root confinement, index documents,
//! directory listings, conditional requests and MIME detection.

use crate::handler::listing;
use crate::handler::path::{PathRejection, RequestPath};
use crate::handler::router::RequestContext;
use crate::http::{self, date, mime};
use crate::logger;
use crate::http::ResponseBody;
use hyper::Response;
use percent_encoding::utf8_percent_encode;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default documents tried, in order, for directory requests
const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Outcome of looking a path up below the root
#[derive(Debug)]
pub enum Lookup {
    File(PathBuf, Metadata),
    Directory(PathBuf),
    NotFound,
    /// Resolves (through symlinks) to somewhere outside the root
    Forbidden(PathBuf),
}

/// Resolve `candidate` and check it stays inside `root`.
///
/// `root` must already be canonical.
pub async fn lookup(root: &Path, candidate: &Path) -> Lookup {
    // Missing files are common (404), no need to log
    let Ok(resolved) = fs::canonicalize(candidate).await else {
        return Lookup::NotFound;
    };
    if !resolved.starts_with(root) {
        return Lookup::Forbidden(resolved);
    }

    match fs::metadata(&resolved).await {
        Ok(meta) if meta.is_dir() => Lookup::Directory(resolved),
        Ok(meta) if meta.is_file() => Lookup::File(resolved, meta),
        _ => Lookup::NotFound,
    }
}

/// Serve the request path from `root`
pub async fn serve(ctx: &RequestContext<'_>, root: &Path) -> Response<ResponseBody> {
    let request_path = match RequestPath::parse(ctx.path) {
        Ok(p) => p,
        Err(rejection) => {
            match rejection {
                PathRejection::InvalidEncoding => {
                    logger::log_warning(&format!("Invalid path encoding: {}", ctx.path));
                }
                PathRejection::InvalidSegment(segment) => {
                    logger::log_warning(&format!("Invalid path segment '{segment}' in {}", ctx.path));
                }
            }
            return http::build_400_response();
        }
    };

    match lookup(root, &request_path.to_fs_path(root)).await {
        Lookup::File(file, meta) => {
            // `/file.txt/` names a directory that does not exist
            if request_path.has_trailing_slash() {
                return http::build_404_response();
            }
            serve_file(ctx, &file, &meta).await
        }
        Lookup::Directory(dir) => serve_directory(ctx, root, &dir, &request_path).await,
        Lookup::NotFound => http::build_404_response(),
        Lookup::Forbidden(resolved) => {
            log_blocked(ctx.path, &resolved);
            http::build_403_response()
        }
    }
}

/// Serve a directory: redirect to the slash form, then index file, then listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    root: &Path,
    dir: &Path,
    request_path: &RequestPath,
) -> Response<ResponseBody> {
    if !request_path.has_trailing_slash() {
        // Built from the normalized path: a raw `//host` would read as another origin
        let path = format!("{}/", request_path.display_path().trim_end_matches('/'));
        let path = utf8_percent_encode(&path, listing::HREF_SAFE);
        let location = match ctx.query {
            Some(q) => format!("{path}?{q}"),
            None => path.to_string(),
        };
        return http::build_redirect_response(&location);
    }

    for index_file in INDEX_FILES {
        match lookup(root, &dir.join(index_file)).await {
            Lookup::File(file, meta) => return serve_file(ctx, &file, &meta).await,
            Lookup::Forbidden(resolved) => {
                log_blocked(ctx.path, &resolved);
                return http::build_403_response();
            }
            Lookup::Directory(_) | Lookup::NotFound => {}
        }
    }

    match listing::read_entries(dir).await {
        Ok(entries) => {
            let html = listing::render(&request_path.display_path(), &entries);
            http::build_html_response(html, ctx.is_head)
        }
        Err(e) => {
            logger::log_warning(&format!("Cannot list directory '{}': {e}", dir.display()));
            http::build_not_found_response("No permission to list directory")
        }
    }
}

/// Serve a regular file with `Last-Modified` and `If-Modified-Since` support
async fn serve_file(ctx: &RequestContext<'_>, file: &Path, meta: &Metadata) -> Response<ResponseBody> {
    let modified = meta.modified().ok();
    let last_modified = modified.map(date::format_http_date);

    // If-None-Match takes precedence; without ETags it never matches
    if !ctx.has_if_none_match {
        if let Some(modified) = modified {
            if date::not_modified_since(modified, ctx.if_modified_since.as_deref()) {
                return http::build_304_response(last_modified.as_deref().unwrap_or_default());
            }
        }
    }

    let content_type = mime::get_content_type(file.extension().and_then(|e| e.to_str()));

    // Opening up front proves the file is readable, also for HEAD
    let handle = match fs::File::open(file).await {
        Ok(handle) => handle,
        Err(e) => {
            log_read_error(file, &e);
            return http::build_not_found_response("File not found");
        }
    };

    let body = if ctx.is_head {
        http::response::empty()
    } else {
        http::response::file_stream(handle)
    };
    http::build_file_response(body, meta.len(), content_type, last_modified.as_deref())
}

fn log_blocked(request_path: &str, resolved: &Path) {
    logger::log_warning(&format!(
        "Path traversal attempt blocked: {request_path} -> {}",
        resolved.display()
    ));
}

fn log_read_error(file: &Path, err: &std::io::Error) {
    logger::log_error(&format!("Failed to read file '{}': {err}", file.display()));
}
