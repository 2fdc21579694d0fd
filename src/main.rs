//! # ecommerce-api — Binary Entry Point
//!
//! Startup sequence: load `.env`, initialize tracing, read config,
//! connect to MongoDB (fatal on failure), assemble schema and router,
//! then serve until SIGINT/SIGTERM. Shutdown drains in-flight requests
//! for at most [`SHUTDOWN_GRACE`] before forcing exit.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use ecommerce_api::cache::QueryCache;
use ecommerce_api::config::AppConfig;
use ecommerce_api::graphql::{build_schema, BuildInfo, PERSISTED_QUERY_TTL};
use ecommerce_api::state::AppState;

/// How long in-flight requests may keep draining after a termination
/// signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // `.env` discovery walks ancestor directories, so running from a
    // subdirectory still picks up the repository-root file.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(AppConfig::from_env());
    tracing::info!(
        port = config.port,
        database = %config.mongo.database,
        environment = %config.environment,
        mongo_uri = %config.redacted_uri(),
        "starting e-commerce server"
    );

    let client = ecommerce_api::db::connect(&config.mongo.uri)
        .await
        .map_err(|e| {
            tracing::error!("failed to connect to MongoDB: {e}");
            e
        })?;
    let db = client.database(&config.mongo.database);

    let cache = QueryCache::new(PERSISTED_QUERY_TTL);
    let build = BuildInfo::capture(&config.environment);
    let schema = build_schema(build, cache, db.clone());
    let state = AppState::new(schema, Arc::clone(&config), db);

    let app = ecommerce_api::app(state).into_make_service_with_connect_info::<SocketAddr>();

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {addr}");
    if config.environment.is_development() {
        tracing::info!(
            "GraphQL playground available at http://localhost:{}/playground",
            config.port
        );
    }

    // The drain channel fires when a signal arrives, starting the grace
    // timer while the server finishes in-flight requests.
    let (drain_tx, drain_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("shutdown signal received, draining in-flight requests");
        let _ = drain_tx.send(());
    });
    let mut server = tokio::spawn(server.into_future());

    tokio::select! {
        res = &mut server => res??,
        _ = drain_rx => {
            match tokio::time::timeout(SHUTDOWN_GRACE, &mut server).await {
                Ok(res) => res??,
                Err(_) => {
                    tracing::warn!(
                        grace_secs = SHUTDOWN_GRACE.as_secs(),
                        "grace period elapsed with requests still in flight, forcing exit"
                    );
                    server.abort();
                }
            }
        }
    }

    client.shutdown().await;
    tracing::info!("server exited");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
