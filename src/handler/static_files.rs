//! Static file serving module
//!
//! Maps request paths to files under a single sandboxed root directory and
//! builds the response. The resolver is a standalone function so path
//! handling can be tested without a socket.

use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Why a path could not be resolved to a servable file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// Resolved path escapes the sandboxed root
    Forbidden,
    /// Missing file, or any filesystem error collapsed to "can't serve this"
    NotFound,
}

/// Resolve a request path to a file under `root`
///
/// Percent-escapes are decoded and the candidate is canonicalized before the
/// prefix check, so encoded `..` segments cannot slip past the sandbox. A
/// path naming a directory resolves to its `index.html`.
pub fn resolve_path(root: &Path, request_path: &str) -> Result<PathBuf, ResolveError> {
    let decoded = urlencoding::decode(request_path).map_err(|_| ResolveError::NotFound)?;
    let relative = decoded.trim_start_matches('/');

    let root_canonical = root.canonicalize().map_err(|_| ResolveError::NotFound)?;
    let mut candidate = root_canonical.join(relative);

    if candidate.is_dir() {
        candidate = candidate.join("index.html");
    }

    // Canonicalization resolves `.`/`..`; failure means the file is absent
    let resolved = candidate.canonicalize().map_err(|_| ResolveError::NotFound)?;

    if !resolved.starts_with(&root_canonical) {
        return Err(ResolveError::Forbidden);
    }
    if !resolved.is_file() {
        return Err(ResolveError::NotFound);
    }

    Ok(resolved)
}

/// Serve a static file from the sandboxed root
pub async fn serve(ctx: &RequestContext<'_>, static_dir: &str) -> Response<Full<Bytes>> {
    let file_path = match resolve_path(Path::new(static_dir), ctx.path) {
        Ok(p) => p,
        Err(ResolveError::Forbidden) => {
            logger::log_warning(&format!("Path traversal attempt blocked: {}", ctx.path));
            return http::build_403_response();
        }
        Err(ResolveError::NotFound) => return http::build_404_response(),
    };

    // Read errors after resolution are still a uniform 404
    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return http::build_404_response();
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));

    if ctx.access_log {
        logger::log_response(content.len());
    }

    http::build_file_response(content, content_type, ctx.is_head)
}
