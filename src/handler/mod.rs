//! Request handler module
//!
//! Maps requests onto files below the served root.

pub mod listing;
pub mod path;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::{RequestContext, StaticHandler};
