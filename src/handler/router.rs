//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Matches the two JSON endpoints
//! by method and path; everything else falls through to static resolution.

use crate::api;
use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::borrow::Cow;
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for static serving
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub access_log: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let access_log = state.config.logging.access_log;
    if access_log {
        logger::log_request(&method, req.uri(), req.version());
    }
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return Ok(resp);
    }

    match (method, path.as_str()) {
        (Method::POST, "/api/upload") => api::handle_upload(req, state).await,
        (Method::POST, "/api/identify") => api::handle_identify(req, state).await,
        (Method::OPTIONS, _) => Ok(http::build_options_response(state.config.http.enable_cors)),
        (method, _) => {
            let normalized = normalize_static_path(&path);
            let ctx = RequestContext {
                path: &normalized,
                is_head: method == Method::HEAD,
                access_log,
            };
            Ok(static_files::serve(&ctx, &state.config.resources.static_dir).await)
        }
    }
}

/// Default empty paths to the homepage and append `.html` to extensionless
/// non-root paths, so `/about` serves `about.html`
///
/// The dot check runs on the whole path, not the last segment, so traversal
/// attempts like `/../secret` keep their spelling and hit the sandbox guard.
fn normalize_static_path(path: &str) -> Cow<'_, str> {
    if path.is_empty() || path == "/" {
        return Cow::Borrowed("/index.html");
    }
    if path.contains('.') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{path}.html"))
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_defaults_to_index() {
        assert_eq!(normalize_static_path(""), "/index.html");
        assert_eq!(normalize_static_path("/"), "/index.html");
    }

    #[test]
    fn test_extensionless_path_gets_html_appended() {
        assert_eq!(normalize_static_path("/api-docs"), "/api-docs.html");
        assert_eq!(normalize_static_path("/guides/start"), "/guides/start.html");
    }

    #[test]
    fn test_path_with_extension_is_untouched() {
        assert_eq!(normalize_static_path("/style.css"), "/style.css");
        assert_eq!(normalize_static_path("/img/pika.png"), "/img/pika.png");
    }

    #[test]
    fn test_traversal_spelling_is_preserved() {
        assert_eq!(
            normalize_static_path("/../../etc/passwd"),
            "/../../etc/passwd"
        );
    }
}
