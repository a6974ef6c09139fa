use axum::{extract::State, Json};

use crate::dto::{BackdropResponse, SetBackdropRequest};
use crate::error::{AppError, AppResult};
use crate::models::backdrop::Backdrop;
use crate::AppState;

pub async fn list_backdrops() -> Json<Vec<BackdropResponse>> {
    Json(Backdrop::ALL.into_iter().map(BackdropResponse::from).collect())
}

pub async fn get_backdrop(State(state): State<AppState>) -> Json<BackdropResponse> {
    Json((*state.backdrop.read().await).into())
}

pub async fn set_backdrop(
    State(state): State<AppState>,
    Json(body): Json<SetBackdropRequest>,
) -> AppResult<Json<BackdropResponse>> {
    let backdrop = match (body.backdrop, body.icon.as_deref()) {
        (Some(backdrop), _) => backdrop,
        (None, Some(icon)) => Backdrop::from_icon(icon),
        (None, None) => {
            return Err(AppError::Validation(
                "Either backdrop or icon must be provided".into(),
            ))
        }
    };

    *state.backdrop.write().await = backdrop;
    tracing::debug!(backdrop = ?backdrop, "Backdrop changed");

    crate::handlers::ws::publish(
        &state,
        serde_json::json!({
            "type": "backdrop_changed",
            "backdrop": backdrop,
        }),
    );

    Ok(Json(backdrop.into()))
}
