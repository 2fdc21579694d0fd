//! # GraphQL Observability Extensions
//!
//! Two pure observability wrappers around operation execution:
//!
//! - [`OperationLogger`] logs operation start and completion with the
//!   operation type, name, and elapsed time.
//! - [`ResponseTiming`] attaches a per-phase timing breakdown to the
//!   response `extensions` under the `timing` key.
//!
//! Neither touches the response `data` field. Each factory creates one
//! extension instance per request, so the per-phase state is request
//! scoped; the `parking_lot::Mutex` only bridges the `&self` hooks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_graphql::extensions::{
    Extension, ExtensionContext, ExtensionFactory, NextExecute, NextParseQuery, NextRequest,
    NextValidation,
};
use async_graphql::parser::types::{ExecutableDocument, OperationType};
use async_graphql::{value, Response, ServerError, ServerResult, ValidationResult, Variables};
use parking_lot::Mutex;

// ── Operation logging ───────────────────────────────────────────────────────

/// Factory for the operation start/completion logger.
pub struct OperationLogger;

impl ExtensionFactory for OperationLogger {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(OperationLoggerExt {
            operation_type: Mutex::new(None),
        })
    }
}

struct OperationLoggerExt {
    operation_type: Mutex<Option<OperationType>>,
}

#[async_trait::async_trait]
impl Extension for OperationLoggerExt {
    async fn parse_query(
        &self,
        ctx: &ExtensionContext<'_>,
        query: &str,
        variables: &Variables,
        next: NextParseQuery<'_>,
    ) -> ServerResult<ExecutableDocument> {
        let document = next.run(ctx, query, variables).await?;
        let ty = document.operations.iter().next().map(|(_, op)| op.node.ty);
        *self.operation_type.lock() = ty;
        Ok(document)
    }

    async fn execute(
        &self,
        ctx: &ExtensionContext<'_>,
        operation_name: Option<&str>,
        next: NextExecute<'_>,
    ) -> Response {
        let operation_type = match *self.operation_type.lock() {
            Some(ty) => ty.to_string(),
            None => "unknown".to_string(),
        };
        let name = operation_name.unwrap_or("<anonymous>");
        tracing::info!(
            operation_type = %operation_type,
            operation_name = %name,
            "graphql operation started"
        );

        let start = Instant::now();
        let response = next.run(ctx, operation_name).await;

        tracing::info!(
            operation_type = %operation_type,
            operation_name = %name,
            elapsed_ms = start.elapsed().as_millis() as u64,
            errors = response.errors.len(),
            "graphql operation completed"
        );
        response
    }
}

// ── Response timing ─────────────────────────────────────────────────────────

/// Factory for the response timing annotator.
pub struct ResponseTiming;

impl ExtensionFactory for ResponseTiming {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(ResponseTimingExt {
            phases: Mutex::new(PhaseTimings::default()),
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct PhaseTimings {
    parsing: Duration,
    validation: Duration,
    execution: Duration,
}

struct ResponseTimingExt {
    phases: Mutex<PhaseTimings>,
}

#[async_trait::async_trait]
impl Extension for ResponseTimingExt {
    async fn request(&self, ctx: &ExtensionContext<'_>, next: NextRequest<'_>) -> Response {
        let start = Instant::now();
        let response = next.run(ctx).await;
        let total = start.elapsed();
        let phases = *self.phases.lock();

        response.extension(
            "timing",
            value!({
                "parsing": phases.parsing.as_millis() as u64,
                "validation": phases.validation.as_millis() as u64,
                "execution": phases.execution.as_millis() as u64,
                "total": total.as_millis() as u64,
            }),
        )
    }

    async fn parse_query(
        &self,
        ctx: &ExtensionContext<'_>,
        query: &str,
        variables: &Variables,
        next: NextParseQuery<'_>,
    ) -> ServerResult<ExecutableDocument> {
        let start = Instant::now();
        let result = next.run(ctx, query, variables).await;
        self.phases.lock().parsing = start.elapsed();
        result
    }

    async fn validation(
        &self,
        ctx: &ExtensionContext<'_>,
        next: NextValidation<'_>,
    ) -> Result<ValidationResult, Vec<ServerError>> {
        let start = Instant::now();
        let result = next.run(ctx).await;
        self.phases.lock().validation = start.elapsed();
        result
    }

    async fn execute(
        &self,
        ctx: &ExtensionContext<'_>,
        operation_name: Option<&str>,
        next: NextExecute<'_>,
    ) -> Response {
        let start = Instant::now();
        let response = next.run(ctx, operation_name).await;
        self.phases.lock().execution = start.elapsed();
        response
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::{EmptyMutation, EmptySubscription, Object, Schema};

    use super::*;

    struct Query;

    #[Object]
    impl Query {
        async fn value(&self) -> i32 {
            7
        }
    }

    #[tokio::test]
    async fn timing_extension_attached_to_responses() {
        let schema = Schema::build(Query, EmptyMutation, EmptySubscription)
            .extension(ResponseTiming)
            .finish();

        let response = schema.execute("{ value }").await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let json = serde_json::to_value(&response).unwrap();
        let timing = &json["extensions"]["timing"];
        for phase in ["parsing", "validation", "execution", "total"] {
            assert!(timing[phase].is_u64(), "missing phase {phase}: {timing}");
        }
    }

    #[tokio::test]
    async fn timing_does_not_disturb_data() {
        let schema = Schema::build(Query, EmptyMutation, EmptySubscription)
            .extension(ResponseTiming)
            .extension(OperationLogger)
            .finish();

        let response = schema.execute("query Named { value }").await;
        let data = response.data.into_json().unwrap();
        assert_eq!(data["value"], 7);
    }

    #[tokio::test]
    async fn logger_survives_malformed_queries() {
        let schema = Schema::build(Query, EmptyMutation, EmptySubscription)
            .extension(OperationLogger)
            .finish();

        let response = schema.execute("{ value").await;
        assert!(!response.errors.is_empty());
    }
}
