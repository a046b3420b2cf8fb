//! HTTP response building module
//!
//! Provides builders for the status codes the file server emits. Bodies are
//! boxed so file content can be streamed while error pages stay in memory.

use futures::TryStreamExt;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use hyper::{Response, StatusCode};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Body type of every response
pub type ResponseBody = UnsyncBoxBody<Bytes, std::io::Error>;

/// In-memory body
pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into()).map_err(|never| match never {}).boxed_unsync()
}

pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new().map_err(|never| match never {}).boxed_unsync()
}

/// Body that reads `file` chunk by chunk as the client consumes it
pub fn file_stream(file: File) -> ResponseBody {
    StreamBody::new(ReaderStream::new(file).map_ok(Frame::data)).boxed_unsync()
}

/// Build 200 response carrying file content
///
/// `content_length` is the file size; for `HEAD` the body is empty but the
/// length still describes the file.
pub fn build_file_response(
    body: ResponseBody,
    content_length: u64,
    content_type: &str,
    last_modified: Option<&str>,
) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length);

    if let Some(last_modified) = last_modified {
        builder = builder.header("Last-Modified", last_modified);
    }

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(empty())
    })
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<ResponseBody> {
    let content_length = content.len();
    let body = if is_head { empty() } else { full(content) };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(empty())
        })
}

/// Build 301 redirect response (directory without trailing slash)
pub fn build_redirect_response(location: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header("Location", location)
        .header("Content-Length", 0)
        .body(empty())
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(empty())
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(last_modified: &str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("Last-Modified", last_modified)
        .body(empty())
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(empty())
        })
}

/// Build 400 Bad Request response
pub fn build_400_response() -> Response<ResponseBody> {
    build_status_response(StatusCode::BAD_REQUEST, None)
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<ResponseBody> {
    build_status_response(StatusCode::FORBIDDEN, None)
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<ResponseBody> {
    build_status_response(StatusCode::NOT_FOUND, None)
}

/// Build 404 response with an explanatory message instead of the reason phrase
pub fn build_not_found_response(message: &str) -> Response<ResponseBody> {
    build_status_response(StatusCode::NOT_FOUND, Some(message))
}

/// Build 501 Not Implemented response for unsupported methods
pub fn build_501_response() -> Response<ResponseBody> {
    let mut resp = build_status_response(StatusCode::NOT_IMPLEMENTED, None);
    resp.headers_mut().insert(
        hyper::header::ALLOW,
        hyper::header::HeaderValue::from_static("GET, HEAD"),
    );
    resp
}

/// Plain text error body, e.g. `404 Not Found`
fn build_status_response(status: StatusCode, message: Option<&str>) -> Response<ResponseBody> {
    let text = match message {
        Some(m) => format!("{} {m}", status.as_u16()),
        None => format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Error")
        ),
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", text.len())
        .body(full(text.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(full(text))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_string(resp: Response<ResponseBody>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_404_body() {
        let resp = build_404_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(resp).await, "404 Not Found");
    }

    #[tokio::test]
    async fn test_not_found_message() {
        let resp = build_not_found_response("File not found");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(resp).await, "404 File not found");
    }

    #[test]
    fn test_501_allow_header() {
        let resp = build_501_response();
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(resp.headers()["allow"], "GET, HEAD");
    }

    #[tokio::test]
    async fn test_empty_body_keeps_length() {
        let resp = build_file_response(
            empty(),
            5,
            "text/plain",
            Some("Sun, 06 Nov 1994 08:49:37 GMT"),
        );
        assert_eq!(resp.headers()["content-length"], "5");
        assert_eq!(body_string(resp).await, "");
    }

    #[tokio::test]
    async fn test_file_stream_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        // Larger than one ReaderStream chunk
        let content: Vec<u8> = (0..20_000u32).map(|i| u8::try_from(i % 251).unwrap()).collect();
        std::fs::write(&path, &content).unwrap();

        let file = File::open(&path).await.unwrap();
        let resp = build_file_response(file_stream(file), content.len() as u64, "application/octet-stream", None);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes.as_ref(), content.as_slice());
    }

    #[test]
    fn test_redirect_location() {
        let resp = build_redirect_response("/docs/");
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["location"], "/docs/");
    }
}
