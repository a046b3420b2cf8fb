//! Access log format module
//!
//! One line per request in Common Log Format:
//! `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`

use chrono::Local;
use hyper::{Method, StatusCode, Uri, Version};
use std::fmt;
use std::net::SocketAddr;

const CLF_TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// One served request, recorded after the response is built
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: SocketAddr,
    pub time: chrono::DateTime<Local>,
    pub method: String,
    /// Request target as sent (path plus query)
    pub target: String,
    pub http_version: &'static str,
    pub status: u16,
    /// Response body size; `None` when nothing is sent (HEAD, 304)
    pub body_bytes: Option<u64>,
}

impl AccessLogEntry {
    /// Capture the request side of an entry; status and size are filled in later
    pub fn from_request(remote_addr: SocketAddr, method: &Method, uri: &Uri, version: Version) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method: method.to_string(),
            target: uri
                .path_and_query()
                .map_or_else(|| uri.path().to_string(), ToString::to_string),
            http_version: version_str(version),
            status: StatusCode::OK.as_u16(),
            body_bytes: None,
        }
    }
}

impl fmt::Display for AccessLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - - [{}] \"{} {} HTTP/{}\" {} ",
            self.remote_addr.ip(),
            self.time.format(CLF_TIME_FORMAT),
            self.method,
            self.target,
            self.http_version,
            self.status,
        )?;
        match self.body_bytes {
            Some(n) => write!(f, "{n}"),
            None => f.write_str("-"),
        }
    }
}

fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let uri: Uri = "/docs/index.html?x=1".parse().unwrap();
        let mut entry = AccessLogEntry::from_request(
            "127.0.0.1:50000".parse().unwrap(),
            &Method::GET,
            &uri,
            Version::HTTP_11,
        );
        entry.status = 200;
        entry.body_bytes = Some(512);
        entry
    }

    #[test]
    fn test_common_format() {
        let log = create_test_entry().to_string();
        assert!(log.starts_with("127.0.0.1 - - ["));
        assert!(log.ends_with("] \"GET /docs/index.html?x=1 HTTP/1.1\" 200 512"));
    }

    #[test]
    fn test_missing_size_dash() {
        let mut entry = create_test_entry();
        entry.status = 304;
        entry.body_bytes = None;
        assert!(entry.to_string().ends_with("304 -"));
    }

    #[test]
    fn test_http_10() {
        let uri: Uri = "/".parse().unwrap();
        let entry = AccessLogEntry::from_request(
            "127.0.0.1:1".parse().unwrap(),
            &Method::HEAD,
            &uri,
            Version::HTTP_10,
        );
        assert!(entry.to_string().contains("\"HEAD / HTTP/1.0\""));
    }
}
