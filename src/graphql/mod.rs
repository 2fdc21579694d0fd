//! # GraphQL Schema Assembly
//!
//! Builds the executable schema: resolvers, observability extensions,
//! and the automatic persisted queries (APQ) extension backed by
//! [`QueryCache`]. Introspection stays enabled so Apollo Studio and the
//! playground can load the schema.
//!
//! Schema data carries [`BuildInfo`] (served by the `version` resolver)
//! and the `mongodb::Database` handle for the resolvers to come.

pub mod extensions;
pub mod resolvers;

use std::time::Duration;

use async_graphql::extensions::apollo_persisted_queries::ApolloPersistedQueries;
use async_graphql::{EmptySubscription, Schema};
use chrono::{DateTime, Utc};
use mongodb::Database;

use crate::cache::QueryCache;
use crate::config::Environment;
use resolvers::{MutationRoot, QueryRoot};

/// TTL for cached persisted queries.
pub const PERSISTED_QUERY_TTL: Duration = Duration::from_secs(60 * 60);

/// The application's executable schema type.
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Immutable build/deployment snapshot captured once at startup.
///
/// Injected into schema data so the `version` resolver never reads the
/// process environment at call time.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Crate version from `CARGO_PKG_VERSION`.
    pub version: String,
    /// Process start instant, standing in for a build timestamp.
    pub build_date: DateTime<Utc>,
    /// Configured environment tag.
    pub environment: String,
}

impl BuildInfo {
    /// Capture the build snapshot for the given environment.
    pub fn capture(environment: &Environment) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            build_date: Utc::now(),
            environment: environment.as_str().to_string(),
        }
    }
}

/// Assemble the executable schema with extensions and shared data.
pub fn build_schema(build: BuildInfo, cache: QueryCache, db: Database) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .extension(extensions::OperationLogger)
        .extension(extensions::ResponseTiming)
        .extension(ApolloPersistedQueries::new(cache))
        .data(build)
        .data(db)
        .finish()
}
