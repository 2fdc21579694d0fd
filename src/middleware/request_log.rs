//! # Request Logging
//!
//! One structured log line per request: method, path, remote address,
//! status code, and latency, emitted after the response regardless of
//! outcome. Sits outside panic recovery, so recovered panics are
//! observed as 500s.

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Log every request after it completes.
pub async fn request_log_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    // ConnectInfo is absent when the service is driven without a real
    // socket (e.g. in tests).
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let start = Instant::now();
    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %path,
        remote = %remote,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "request processed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::middleware::from_fn;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    #[tokio::test]
    async fn response_passes_through_unchanged() {
        let app = Router::new()
            .route("/test", get(|| async { "ok" }))
            .layer(from_fn(request_log_middleware));

        let response = app
            .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
