//! # GraphQL Resolvers
//!
//! Scaffold-stage resolvers: `ping`, `version`, and a `noop` mutation.
//! None touch the database yet; the `Database` handle lives in schema
//! data for the domain resolvers to come.

use async_graphql::{Context, Object, Result, SimpleObject};
use chrono::{DateTime, SecondsFormat, Utc};

use super::BuildInfo;

/// Build metadata served by the `version` query.
#[derive(Debug, SimpleObject)]
pub struct Version {
    /// Semantic version of the running binary.
    pub number: String,
    /// When this process started.
    pub build_date: DateTime<Utc>,
    /// Deployment environment tag.
    pub environment: String,
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Liveness probe through the GraphQL layer.
    async fn ping(&self) -> String {
        format!(
            "GraphQL Server is running! Current time: {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }

    /// Build metadata, sourced from the startup snapshot.
    async fn version(&self, ctx: &Context<'_>) -> Result<Version> {
        let build = ctx.data::<BuildInfo>()?;
        Ok(Version {
            number: build.version.clone(),
            build_date: build.build_date,
            environment: build.environment.clone(),
        })
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Placeholder mutation that does nothing and returns null.
    async fn noop(&self) -> Option<bool> {
        None
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::{EmptySubscription, Schema};
    use chrono::Utc;

    use super::*;

    fn test_schema() -> Schema<QueryRoot, MutationRoot, EmptySubscription> {
        let build = BuildInfo {
            version: "0.1.0".to_string(),
            build_date: Utc::now(),
            environment: "development".to_string(),
        };
        Schema::build(QueryRoot, MutationRoot, EmptySubscription)
            .data(build)
            .finish()
    }

    #[tokio::test]
    async fn ping_returns_prefixed_timestamp() {
        let schema = test_schema();
        let response = schema.execute("{ ping }").await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().unwrap();
        let ping = data["ping"].as_str().unwrap();
        assert!(ping.starts_with("GraphQL Server is running! Current time: "));
        // RFC 3339, seconds precision, UTC designator.
        assert!(ping.ends_with('Z'), "got: {ping}");
    }

    #[tokio::test]
    async fn version_reads_the_startup_snapshot() {
        let schema = test_schema();
        let response = schema
            .execute("{ version { number buildDate environment } }")
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().unwrap();
        assert_eq!(data["version"]["number"], "0.1.0");
        assert_eq!(data["version"]["environment"], "development");
        assert!(data["version"]["buildDate"].is_string());
    }

    #[tokio::test]
    async fn noop_mutation_returns_null() {
        let schema = test_schema();
        let response = schema.execute("mutation { noop }").await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().unwrap();
        assert!(data["noop"].is_null());
    }
}
