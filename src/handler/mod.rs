//! Request handler module
//!
//! Responsible for request routing dispatch and business logic processing:
//! the two JSON identification endpoints plus sandboxed static file serving.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
