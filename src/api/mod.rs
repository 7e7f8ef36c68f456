// API module entry
// The two JSON identification endpoints and their wire types

mod handlers;
mod response;
mod types;

pub use handlers::{handle_identify, handle_upload};
