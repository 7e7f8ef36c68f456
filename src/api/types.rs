// API type definitions
// Request body shapes and the error taxonomy for the two JSON endpoints

use hyper::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Body of `POST /api/identify`
///
/// `imageUrl` is defaulted so that a missing field reports `NO_URL` instead
/// of failing JSON deserialization.
#[derive(Debug, Deserialize)]
pub struct IdentifyRequest {
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
}

/// Everything the JSON endpoints can report back to the client
///
/// Each variant maps to a stable machine-readable code plus an HTTP status;
/// the display string is the human-readable `error` field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("No image provided")]
    NoImage,
    #[error("No image URL provided")]
    NoUrl,
    #[error("Invalid image URL format")]
    InvalidUrl,
    /// Unexpected failure while handling an upload
    #[error("Failed to process image")]
    ProcessingImage,
    /// Unexpected failure while handling an identify request
    #[error("Failed to process request")]
    ProcessingRequest,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NoImage | Self::NoUrl | Self::InvalidUrl => StatusCode::BAD_REQUEST,
            Self::ProcessingImage | Self::ProcessingRequest => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoImage => "NO_IMAGE",
            Self::NoUrl => "NO_URL",
            Self::InvalidUrl => "INVALID_URL",
            Self::ProcessingImage | Self::ProcessingRequest => "PROCESSING_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(ApiError::NoImage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NoUrl.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidUrl.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::ProcessingImage.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::ProcessingRequest.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_processing_messages_differ_per_endpoint() {
        // Both share the stable code; the human-readable message names the
        // upload or the identify path respectively
        assert_eq!(ApiError::ProcessingImage.code(), "PROCESSING_ERROR");
        assert_eq!(ApiError::ProcessingRequest.code(), "PROCESSING_ERROR");
        assert_eq!(
            ApiError::ProcessingImage.to_string(),
            "Failed to process image"
        );
        assert_eq!(
            ApiError::ProcessingRequest.to_string(),
            "Failed to process request"
        );
    }

    #[test]
    fn test_missing_image_url_defaults_to_empty() {
        let req: IdentifyRequest = serde_json::from_str("{}").unwrap();
        assert!(req.image_url.is_empty());
    }

    #[test]
    fn test_image_url_field_name() {
        let req: IdentifyRequest =
            serde_json::from_str(r#"{"imageUrl":"https://example.com/cat.png"}"#).unwrap();
        assert_eq!(req.image_url, "https://example.com/cat.png");
    }
}
