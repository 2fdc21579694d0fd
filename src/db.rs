//! # MongoDB Connector
//!
//! Client construction and the startup connectivity check. Connection
//! pooling is the driver's concern; this codebase neither bounds nor
//! observes it.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;

/// Bound on server selection so a dead cluster fails startup promptly
/// instead of hanging on the driver's 30-second default.
pub const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Open a MongoDB client and verify connectivity with a `ping`.
///
/// Failure here is fatal to startup; the caller logs and exits.
pub async fn connect(uri: &str) -> Result<Client, mongodb::error::Error> {
    let mut options = ClientOptions::parse(uri).await?;
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

    let client = Client::with_options(options)?;
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;

    tracing::info!("connected to MongoDB");
    Ok(client)
}
