//! Request path resolution
//!
//! Turns the raw request path into a list of safe segments below the root.
//! `..` can never climb above the root here; symlink escapes are caught later
//! by comparing canonical paths.

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

/// Request path after decoding and normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    segments: Vec<String>,
    trailing_slash: bool,
}

/// Why a request path was rejected before touching the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathRejection {
    /// Percent-decoding produced invalid UTF-8
    InvalidEncoding,
    /// A segment carries a separator or NUL byte
    InvalidSegment(String),
}

impl RequestPath {
    /// Decode and normalize the path component of a request target.
    ///
    /// # Examples
    /// ```
    /// use loopback_fileserver::handler::path::RequestPath;
    ///
    /// let p = RequestPath::parse("/a/./b/../c.txt").unwrap();
    /// assert_eq!(p.display_path(), "/a/c.txt");
    ///
    /// let p = RequestPath::parse("/../secret.txt").unwrap();
    /// assert_eq!(p.display_path(), "/secret.txt");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, PathRejection> {
        let decoded = percent_decode_str(raw)
            .decode_utf8()
            .map_err(|_| PathRejection::InvalidEncoding)?;

        let mut segments: Vec<String> = Vec::new();
        for segment in decoded.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s if s.contains('\\') || s.contains('\0') => {
                    return Err(PathRejection::InvalidSegment(s.to_string()));
                }
                s => segments.push(s.to_string()),
            }
        }

        Ok(Self {
            segments,
            trailing_slash: raw.ends_with('/'),
        })
    }

    /// Whether the request named a directory explicitly (`/docs/`)
    pub const fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Filesystem path under `root`; not yet checked for existence or symlinks
    pub fn to_fs_path(&self, root: &Path) -> PathBuf {
        self.segments
            .iter()
            .fold(root.to_path_buf(), |acc, segment| acc.join(segment))
    }

    /// Normalized, decoded URL path, e.g. `/docs/guide`
    pub fn display_path(&self) -> String {
        let mut out = format!("/{}", self.segments.join("/"));
        if self.trailing_slash && !self.is_root() {
            out.push('/');
        }
        out
    }
}
