//! # GraphQL Endpoint
//!
//! The `/graphql` execution handler and the development playground.
//! The handler extracts a bearer token (header, query parameter, or
//! cookie), verifies it, and attaches the derived identity to the
//! request data. Verification failure never blocks execution — the
//! request proceeds unauthenticated and resolvers decide for
//! themselves.
//!
//! GET, POST JSON, and multipart transports all arrive through the
//! `async-graphql-axum` extractor.

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::auth;
use crate::state::AppState;

/// Query-string parameters the auth boundary cares about. GraphQL's own
/// GET parameters (`query`, `variables`, ...) are handled separately by
/// the transport extractor.
#[derive(Debug, Default, Deserialize)]
pub struct AuthParams {
    pub token: Option<String>,
}

/// `GET|POST /graphql` — execute a GraphQL request.
pub async fn graphql_handler(
    State(state): State<AppState>,
    Query(params): Query<AuthParams>,
    jar: CookieJar,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    if let Some(token) = auth::bearer_token(&headers, params.token.as_deref(), &jar) {
        match auth::verify_token(&token) {
            Ok(user) => {
                tracing::info!(user_id = %user.user_id, "authenticated graphql request");
                request = request.data(user);
            }
            Err(err) => {
                tracing::warn!(error = %err, "token verification failed, proceeding unauthenticated");
            }
        }
    }

    state.schema.execute(request).await.into()
}

/// `GET|POST /playground` — interactive query UI, mounted only in
/// development.
pub async fn playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
