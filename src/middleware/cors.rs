//! # CORS Middleware
//!
//! Permissive cross-origin headers on every response, with `OPTIONS`
//! preflight short-circuited to `204 No Content`. Hand-rolled rather
//! than `tower_http::cors::CorsLayer` because the contract pins the
//! preflight status and the exact header list (Apollo Studio expects
//! `Apollo-Query-Plan-Experimental` to be allowed).

use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "POST, GET, OPTIONS, PUT, DELETE";
const ALLOW_HEADERS: &str = "Accept, Content-Type, Content-Length, Accept-Encoding, \
     X-CSRF-Token, Authorization, Apollo-Query-Plan-Experimental";
// 24 hours.
const MAX_AGE: &str = "86400";

/// Inject CORS headers; answer preflight requests without routing.
pub async fn cors_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(MAX_AGE),
    );
}
