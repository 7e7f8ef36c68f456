// API response utility functions module

use crate::api::types::ApiError;
use crate::identify::Identification;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

#[derive(Serialize)]
struct SuccessBody<'a> {
    success: bool,
    pokemon: &'a Identification,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    code: &'static str,
}

/// 200 response wrapping an identification result
pub fn success_response(identification: &Identification) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &SuccessBody {
            success: true,
            pokemon: identification,
        },
    )
}

/// Structured error response per the API error taxonomy
pub fn error_response(err: &ApiError) -> Response<Full<Bytes>> {
    json_response(
        err.status(),
        &ErrorBody {
            success: false,
            error: err.to_string(),
            code: err.code(),
        },
    )
}

/// Build JSON response
fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(
                    r#"{"success":false,"error":"Internal server error","code":"PROCESSING_ERROR"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_success_body_shape() {
        let pokemon = catalog::catalog().remove(0);
        let identification = Identification {
            pokemon,
            confidence: 0.9,
        };
        let resp = success_response(&identification);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "application/json");

        let body = serde_json::to_value(&SuccessBody {
            success: true,
            pokemon: &identification,
        })
        .unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["pokemon"]["id"], 25);
        assert_eq!(body["pokemon"]["confidence"], 0.9);
    }

    #[test]
    fn test_error_body_shape() {
        let resp = error_response(&ApiError::NoImage);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = serde_json::to_value(&ErrorBody {
            success: false,
            error: ApiError::NoImage.to_string(),
            code: ApiError::NoImage.code(),
        })
        .unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "No image provided");
        assert_eq!(body["code"], "NO_IMAGE");
    }
}
