//! # HTTP Routes
//!
//! Route handlers outside the middleware chain: GraphQL execution and
//! playground ([`graphql`]), health probe ([`health`]), plus the root
//! and 404 handlers defined here.

pub mod graphql;
pub mod health;

use axum::extract::State;
use axum::http::Uri;
use axum::response::{IntoResponse, Redirect, Response};

use crate::error::AppError;
use crate::state::AppState;

/// `GET /` — redirect to the playground in development, static text
/// otherwise.
pub async fn root(State(state): State<AppState>) -> Response {
    if state.config.environment.is_development() {
        Redirect::temporary("/playground").into_response()
    } else {
        "E-Commerce Backend API".into_response()
    }
}

/// Catch-all 404 with the shared JSON error body.
pub async fn fallback(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
