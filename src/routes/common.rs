//! Operational routes for the lookup service. None of them touch a lookup table.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct LivenessBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadinessBody {
    status: &'static str,
    database: &'static str,
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

/// The process is up. Says nothing about storage.
async fn health() -> Json<LivenessBody> {
    Json(LivenessBody { status: "ok" })
}

/// Ready once the entry repository answers a ping; 503 while it cannot.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessBody>) {
    match state.repository.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadinessBody {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "entry storage not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessBody {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

async fn version() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `/health`, `/ready` and `/version`. These paths are reserved, so no
/// resource can claim them as a path segment.
pub fn operational_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
