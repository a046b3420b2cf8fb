//! HTTP protocol layer module
//!
//! Response builders, MIME detection and HTTP date handling, decoupled from
//! file resolution.

pub mod date;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_304_response, build_400_response, build_403_response, build_404_response,
    build_501_response, build_file_response, build_html_response, build_not_found_response,
    build_redirect_response, ResponseBody,
};
