//! # Panic Recovery
//!
//! Converts handler panics into a generic JSON 500 so a single bad
//! request cannot take the process down. Wired through
//! `tower_http::catch_panic::CatchPanicLayer::custom` in `lib.rs`.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{ErrorBody, ErrorDetail};

/// Build the 500 response for a recovered panic.
///
/// The panic payload is logged server-side and never echoed back.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "non-string panic payload".to_string()
    };
    tracing::error!(panic = %detail, "recovered from panic in request handler");

    let body = ErrorBody {
        error: ErrorDetail {
            code: "INTERNAL_ERROR".to_string(),
            message: "An internal error occurred".to_string(),
            details: None,
        },
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn panic_payload_not_echoed_to_client() {
        let response = handle_panic(Box::new("secret internal state".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "An internal error occurred");
        assert!(!String::from_utf8_lossy(&bytes).contains("secret internal state"));
    }

    #[tokio::test]
    async fn non_string_payload_still_produces_500() {
        let response = handle_panic(Box::new(42u32));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
