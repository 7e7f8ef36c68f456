//! HTTP protocol layer module
//!
//! Protocol-level helpers decoupled from business logic: MIME detection and
//! plain response builders shared by the static handler and the router.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_403_response, build_404_response, build_413_response, build_file_response,
    build_options_response,
};
