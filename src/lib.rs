//! Static file server bound to the loopback interface.
//!
//! Serves the process working directory on `http://127.0.0.1:8000` until
//! interrupted.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use error::{Result, ServerError};
pub use server::Server;
