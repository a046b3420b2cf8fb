//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, header
//! extraction, dispatch to static file serving and access logging.

use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::handler::static_files;
use crate::http::{self, ResponseBody};
use crate::logger::{self, AccessLogEntry};
use hyper::header::{HeaderValue, CONTENT_LENGTH, IF_MODIFIED_SINCE, IF_NONE_MATCH, SERVER};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const SERVER_NAME: &str = concat!("loopback-fileserver/", env!("CARGO_PKG_VERSION"));

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) path
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
    pub has_if_none_match: bool,
}

impl<'a> RequestContext<'a> {
    pub fn from_parts(parts: &'a Parts) -> Self {
        let headers = &parts.headers;
        Self {
            path: parts.uri.path(),
            query: parts.uri.query(),
            is_head: parts.method == Method::HEAD,
            if_modified_since: headers
                .get(IF_MODIFIED_SINCE)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string),
            has_if_none_match: headers.contains_key(IF_NONE_MATCH),
        }
    }
}

/// Serves files below one root directory.
///
/// Holds the resolved root; shared read-only by every request.
#[derive(Debug, Clone)]
pub struct StaticHandler {
    root: PathBuf,
}

impl StaticHandler {
    /// Resolve the configured root to an absolute, canonical directory
    pub fn new(config: &Config) -> Result<Self> {
        let root_err = |source| ServerError::RootDirectory {
            path: PathBuf::from(&config.server.root),
            source,
        };

        let root = std::fs::canonicalize(&config.server.root).map_err(root_err)?;
        if !root.is_dir() {
            return Err(root_err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a directory",
            )));
        }

        Ok(Self { root })
    }

    /// Absolute served root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Handle one request from `peer`, writing the access log line afterwards
    pub async fn handle<B>(
        &self,
        req: Request<B>,
        peer: SocketAddr,
    ) -> std::result::Result<Response<ResponseBody>, Infallible> {
        // The body is never read
        let (parts, _) = req.into_parts();
        let mut entry = AccessLogEntry::from_request(peer, &parts.method, &parts.uri, parts.version);

        let response = self.respond(&parts).await;

        entry.status = response.status().as_u16();
        entry.body_bytes = sent_body_bytes(&parts.method, &response);
        logger::log_access(&entry);

        Ok(response)
    }

    /// Build the response for a request without logging it
    pub async fn respond(&self, parts: &Parts) -> Response<ResponseBody> {
        let mut response = match &parts.method {
            &Method::GET | &Method::HEAD => {
                let ctx = RequestContext::from_parts(parts);
                static_files::serve(&ctx, &self.root).await
            }
            method => {
                logger::log_warning(&format!("Unsupported method: {method}"));
                http::build_501_response()
            }
        };

        response
            .headers_mut()
            .insert(SERVER, HeaderValue::from_static(SERVER_NAME));
        response
    }
}

/// Body size for the access log, taken from `Content-Length`
fn sent_body_bytes(method: &Method, response: &Response<ResponseBody>) -> Option<u64> {
    if method == Method::HEAD || response.status() == StatusCode::NOT_MODIFIED {
        return None;
    }
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .filter(|&n| n > 0)
}
