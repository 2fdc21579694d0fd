//! # ecommerce-api — GraphQL backend scaffold
//!
//! Early-stage e-commerce backend: an `async-graphql` schema served
//! over Axum, persisting to MongoDB. The GraphQL surface is still
//! scaffold-level (`ping`, `version`, `noop`); the wiring around it is
//! complete — configuration, structured logging, CORS, panic recovery,
//! persisted-query caching, stub bearer auth, and graceful shutdown.
//!
//! ## Routes
//!
//! | Route              | Handler                      | Notes                       |
//! |--------------------|------------------------------|-----------------------------|
//! | `GET /health`      | [`routes::health`]           | always 200, per-service map |
//! | `GET\|POST /graphql` | [`routes::graphql`]        | GraphQL execution           |
//! | `GET\|POST /playground` | [`routes::graphql`]     | development only            |
//! | `GET /`            | [`routes::root`]             | redirect in development     |
//! | anything else      | [`routes::fallback`]         | JSON 404                    |
//!
//! `OPTIONS` on any path is answered by the CORS middleware with 204.
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → RequestLog → CatchPanic → CORS → Handler
//! ```

pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod validation;

use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router with all routes and middleware.
///
/// The playground (and the root redirect pointing at it) is mounted
/// only when the configured environment is development.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/graphql",
            get(routes::graphql::graphql_handler).post(routes::graphql::graphql_handler),
        )
        .route("/", get(routes::root));

    if state.config.environment.is_development() {
        router = router.route(
            "/playground",
            get(routes::graphql::playground).post(routes::graphql::playground),
        );
    }

    router
        .fallback(routes::fallback)
        .layer(from_fn(middleware::cors::cors_middleware))
        .layer(CatchPanicLayer::custom(middleware::recovery::handle_panic))
        .layer(from_fn(middleware::request_log::request_log_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
