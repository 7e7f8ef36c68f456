//! JSON endpoint handlers
//!
//! Boundary functions collect the request body and convert every failure into
//! a structured JSON error response, so nothing propagates past a handler.
//! The actual request-to-result mapping lives in plain async functions over
//! bytes, testable without standing up a socket.

use crate::api::response::{error_response, success_response};
use crate::api::types::{ApiError, IdentifyRequest};
use crate::config::AppState;
use crate::identify::{self, Identification};
use crate::logger;
use futures_util::stream;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};
use multer::Multipart;
use std::convert::Infallible;
use std::sync::Arc;

/// `POST /api/upload` — multipart form with an `image` field
pub async fn handle_upload(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let result = match collect_body(req).await {
        Some(body) => identify_upload(content_type.as_deref(), body, &state).await,
        None => Err(ApiError::ProcessingImage),
    };
    Ok(log_and_respond("/api/upload", &result))
}

/// `POST /api/identify` — JSON body `{imageUrl}`
pub async fn handle_identify(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let result = match collect_body(req).await {
        Some(body) => identify_from_url(&body, &state).await,
        None => Err(ApiError::ProcessingRequest),
    };
    Ok(log_and_respond("/api/identify", &result))
}

/// Read the whole request body
async fn collect_body(req: Request<hyper::body::Incoming>) -> Option<Bytes> {
    match req.into_body().collect().await {
        Ok(collected) => Some(collected.to_bytes()),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            None
        }
    }
}

fn log_and_respond(
    path: &str,
    result: &Result<Identification, ApiError>,
) -> Response<Full<Bytes>> {
    match result {
        Ok(identification) => {
            logger::log_api_request("POST", path, 200);
            success_response(identification)
        }
        Err(err) => {
            logger::log_api_request("POST", path, err.status().as_u16());
            error_response(err)
        }
    }
}

/// Map an upload request body to an identification result
///
/// The image bytes are extracted but never inspected; identification is a
/// random mapping by contract.
async fn identify_upload(
    content_type: Option<&str>,
    body: Bytes,
    state: &AppState,
) -> Result<Identification, ApiError> {
    let boundary = content_type
        .ok_or(ApiError::ProcessingImage)
        .and_then(|ct| multer::parse_boundary(ct).map_err(|_| ApiError::ProcessingImage))?;

    let body_stream = stream::once(async move { Ok::<Bytes, Infallible>(body) });
    let mut multipart = Multipart::new(body_stream, boundary);

    let mut image: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::ProcessingImage)?
    {
        if field.name() == Some("image") {
            let bytes = field.bytes().await.map_err(|_| ApiError::ProcessingImage)?;
            image = Some(bytes);
            break;
        }
    }

    let image = image.ok_or(ApiError::NoImage)?;
    Ok(identify::identify(&image, state).await)
}

/// Map an identify request body to an identification result
///
/// URL validation is syntactic only; the image is never fetched.
async fn identify_from_url(body: &[u8], state: &AppState) -> Result<Identification, ApiError> {
    let request: IdentifyRequest =
        serde_json::from_slice(body).map_err(|_| ApiError::ProcessingRequest)?;

    if request.image_url.is_empty() {
        return Err(ApiError::NoUrl);
    }
    url::Url::parse(&request.image_url).map_err(|_| ApiError::InvalidUrl)?;

    Ok(identify::identify(&[], state).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: &str = "------------------------d74496d66958873e";

    fn multipart_body(field_name: &str, payload: &[u8]) -> (String, Bytes) {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"pika.png\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(payload);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        (
            format!("multipart/form-data; boundary={BOUNDARY}"),
            Bytes::from(body),
        )
    }

    #[tokio::test]
    async fn test_upload_with_image_field() {
        let state = AppState::for_tests();
        let (content_type, body) = multipart_body("image", b"\x89PNG fake bytes");

        let result = identify_upload(Some(&content_type), body, &state)
            .await
            .unwrap();
        assert!(state.catalog.contains(&result.pokemon));
        assert!((0.85..0.99).contains(&result.confidence));
    }

    #[tokio::test]
    async fn test_upload_without_image_field() {
        let state = AppState::for_tests();
        let (content_type, body) = multipart_body("avatar", b"some bytes");

        let err = identify_upload(Some(&content_type), body, &state)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::NoImage);
        assert_eq!(err.code(), "NO_IMAGE");
    }

    #[tokio::test]
    async fn test_upload_without_multipart_content_type() {
        let state = AppState::for_tests();
        let err = identify_upload(Some("application/json"), Bytes::from("{}"), &state)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::ProcessingImage);

        let err = identify_upload(None, Bytes::new(), &state).await.unwrap_err();
        assert_eq!(err, ApiError::ProcessingImage);
    }

    #[tokio::test]
    async fn test_identify_with_valid_url() {
        let state = AppState::for_tests();
        let result = identify_from_url(br#"{"imageUrl":"https://example.com/cat.png"}"#, &state)
            .await
            .unwrap();
        assert!(state.catalog.contains(&result.pokemon));
        assert!((0.85..0.99).contains(&result.confidence));
    }

    #[tokio::test]
    async fn test_identify_missing_or_empty_url() {
        let state = AppState::for_tests();
        for body in [&b"{}"[..], br#"{"imageUrl":""}"#] {
            let err = identify_from_url(body, &state).await.unwrap_err();
            assert_eq!(err, ApiError::NoUrl);
        }
    }

    #[tokio::test]
    async fn test_identify_invalid_url() {
        let state = AppState::for_tests();
        let err = identify_from_url(br#"{"imageUrl":"not a url"}"#, &state)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::InvalidUrl);
        assert_eq!(err.code(), "INVALID_URL");
    }

    #[tokio::test]
    async fn test_identify_malformed_json() {
        let state = AppState::for_tests();
        let err = identify_from_url(b"not json at all", &state).await.unwrap_err();
        assert_eq!(err, ApiError::ProcessingRequest);
        assert_eq!(err.code(), "PROCESSING_ERROR");
        assert_eq!(err.to_string(), "Failed to process request");
    }

    #[tokio::test]
    async fn test_upload_failures_name_the_image() {
        let state = AppState::for_tests();
        let err = identify_upload(Some("text/plain"), Bytes::from("x"), &state)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "PROCESSING_ERROR");
        assert_eq!(err.to_string(), "Failed to process image");
    }

    #[tokio::test]
    async fn test_repeated_calls_stay_in_catalog() {
        // Randomness is part of the contract; assert membership, not equality
        let state = AppState::for_tests();
        let ids: Vec<u32> = state.catalog.iter().map(|p| p.id).collect();
        for _ in 0..20 {
            let result = identify_from_url(br#"{"imageUrl":"https://example.com/a.png"}"#, &state)
                .await
                .unwrap();
            assert!(ids.contains(&result.pokemon.id));
        }
    }
}
