//! # Health Probe
//!
//! `GET /health` pings MongoDB per request and reports per-service
//! status in the body. The endpoint always answers 200 — a degraded
//! dependency is carried in the payload, not the status code, so load
//! balancers keep routing while operators see the failure.

use axum::extract::State;
use axum::Json;
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health report: overall status plus one entry per dependency.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub services: HealthServices,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthServices {
    /// `"connected"` or the driver's error string.
    pub mongodb: String,
}

/// `GET /health`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let mongodb = match state.db.run_command(doc! { "ping": 1 }).await {
        Ok(_) => "connected".to_string(),
        Err(err) => {
            tracing::warn!(error = %err, "mongodb health ping failed");
            err.to_string()
        }
    };

    let status = if mongodb == "connected" { "ok" } else { "degraded" };
    Json(HealthResponse {
        status: status.to_string(),
        services: HealthServices { mongodb },
    })
}
