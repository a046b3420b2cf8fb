// Configuration module entry point
// Assembles the immutable startup configuration

mod types;

use std::net::SocketAddr;
use std::path::Path;

use crate::error::{Result, ServerError};

pub use types::{Config, ServerConfig};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ROOT: &str = ".";

impl Config {
    /// Build the fixed startup configuration.
    ///
    /// Only built-in defaults are used: no file, environment or command line
    /// source is consulted.
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.root", DEFAULT_ROOT)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Socket address to listen on. Anything but a loopback address is refused.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.server.host, self.server.port);
        let addr: SocketAddr = addr_str
            .parse()
            .map_err(|e: std::net::AddrParseError| ServerError::InvalidAddress {
                addr: addr_str.clone(),
                reason: e.to_string(),
            })?;

        if !addr.ip().is_loopback() {
            return Err(ServerError::NonLoopback(addr));
        }
        Ok(addr)
    }

    #[must_use]
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        self.server.root = root.as_ref().to_string_lossy().into_owned();
        self
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::load().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.root, ".");
    }

    #[test]
    fn test_default_socket_addr() {
        let cfg = Config::load().unwrap();
        assert_eq!(
            cfg.socket_addr().unwrap(),
            "127.0.0.1:8000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_wildcard_refused() {
        let mut cfg = Config::load().unwrap();
        cfg.server.host = "0.0.0.0".to_string();
        assert!(matches!(cfg.socket_addr(), Err(ServerError::NonLoopback(_))));
    }

    #[test]
    fn test_invalid_host() {
        let mut cfg = Config::load().unwrap();
        cfg.server.host = "localhost.invalid".to_string();
        assert!(matches!(
            cfg.socket_addr(),
            Err(ServerError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_builders() {
        let cfg = Config::load().unwrap().with_root("/srv/www").with_port(0);
        assert_eq!(cfg.server.root, "/srv/www");
        assert_eq!(cfg.server.port, 0);
    }
}
