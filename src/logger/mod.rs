//! Logger module
//!
//! Provides logging utilities for the file server:
//! - Startup and shutdown banner
//! - Access logging in Common Log Format
//! - Error and warning logging
//!
//! Informational and access lines go to stdout, errors and warnings to stderr.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use std::path::Path;

pub const SHUTDOWN_LINE: &str = "Server stopped.";

/// Write to info log
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

/// Write to access log
fn write_access(message: &str) {
    println!("{message}");
}

pub fn serving_directory_line(root: &Path) -> String {
    format!("Serving files from directory: {}", root.display())
}

pub fn serving_url_line(addr: &SocketAddr) -> String {
    format!("Serving at http://{addr}")
}

pub fn log_serving_directory(root: &Path) {
    write_info(&serving_directory_line(root));
}

pub fn log_serving_url(addr: &SocketAddr) {
    write_info(&serving_url_line(addr));
}

pub fn log_shutdown() {
    write_info(&format!("\n{SHUTDOWN_LINE}"));
}

pub fn log_interrupt_received() {
    write_info("[SIGNAL] Interrupt received, finishing current request");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_access(entry: &AccessLogEntry) {
    write_access(&entry.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_lines() {
        assert_eq!(
            serving_directory_line(Path::new("/srv/www")),
            "Serving files from directory: /srv/www"
        );
        assert_eq!(
            serving_url_line(&"127.0.0.1:8000".parse().unwrap()),
            "Serving at http://127.0.0.1:8000"
        );
        assert_eq!(SHUTDOWN_LINE, "Server stopped.");
    }
}
