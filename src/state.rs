//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Everything here is read-only after
//! startup and cheap to clone: the schema and config are behind `Arc`s
//! and the `Database` handle clones a pooled client reference.

use std::sync::Arc;

use mongodb::Database;

use crate::config::AppConfig;
use crate::graphql::AppSchema;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The executable GraphQL schema.
    pub schema: AppSchema,
    /// Startup configuration.
    pub config: Arc<AppConfig>,
    /// Handle to the configured database, used by the health probe.
    pub db: Database,
}

impl AppState {
    pub fn new(schema: AppSchema, config: Arc<AppConfig>, db: Database) -> Self {
        Self { schema, config, db }
    }
}
