// Server module entry point
// Binds the loopback listener and runs the accept loop until interrupted

pub mod connection;
pub mod listener;
pub mod signal;

// Rust does not allow `loop` as a module name (keyword), use server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::Result;
use crate::handler::StaticHandler;
use crate::logger;

pub use listener::create_loopback_listener;
pub use signal::{start_signal_handler, SignalHandler};

/// Loopback static file server.
///
/// Owns the listening socket; it is closed when `run` returns or when the
/// server is dropped without running.
pub struct Server {
    listener: TcpListener,
    handler: StaticHandler,
    local_addr: SocketAddr,
}

impl Server {
    /// Resolve the root, then bind the listener. Must be called from within a
    /// Tokio runtime.
    pub fn bind(config: &Config) -> Result<Self> {
        let addr = config.socket_addr()?;
        let handler = StaticHandler::new(config)?;
        let listener = create_loopback_listener(addr)?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            listener,
            handler,
            local_addr,
        })
    }

    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Absolute directory being served
    pub fn root(&self) -> &Path {
        self.handler.root()
    }

    /// Print the banner and serve until `signals` requests shutdown
    pub async fn run(self, signals: Arc<SignalHandler>) {
        logger::log_serving_directory(self.handler.root());
        logger::log_serving_url(&self.local_addr);

        server_loop::run_accept_loop(&self.listener, &self.handler, &signals).await;

        drop(self.listener);
        logger::log_shutdown();
    }
}
