use axum::{extract::State, http::StatusCode, Json};

use crate::dto::{HealthResponse, ReadyzChecks, ReadyzResponse};
use crate::AppState;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "mindful-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Ready once an analysis credential is configured.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<ReadyzResponse>) {
    let checks = ReadyzChecks {
        mood_entries: state.moods.read().await.len(),
        analysis_configured: !state.analysis.settings().api_key.is_empty(),
    };

    if checks.analysis_configured {
        (
            StatusCode::OK,
            Json(ReadyzResponse {
                status: "ready",
                checks,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyzResponse {
                status: "not_ready",
                checks,
            }),
        )
    }
}
