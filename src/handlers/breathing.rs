use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path,
    },
    response::Response,
    Json,
};
use futures_util::{SinkExt, StreamExt};

use crate::dto::TechniqueResponse;
use crate::error::{AppError, AppResult};
use crate::services::breathing::{Pacer, Phase, Technique, TECHNIQUES};

fn lookup(name: &str) -> AppResult<Technique> {
    Technique::by_name(name)
        .ok_or_else(|| AppError::NotFound(format!("Unknown breathing technique: {name}")))
}

pub async fn list_techniques() -> Json<Vec<TechniqueResponse>> {
    Json(TECHNIQUES.into_iter().map(TechniqueResponse::from).collect())
}

pub async fn get_technique(Path(name): Path<String>) -> AppResult<Json<TechniqueResponse>> {
    Ok(Json(lookup(&name)?.into()))
}

/// Live pacing session: one message per phase change until the client closes.
pub async fn pace(ws: WebSocketUpgrade, Path(name): Path<String>) -> AppResult<Response> {
    let technique = lookup(&name)?;
    Ok(ws.on_upgrade(move |socket| run_pacer(socket, technique)))
}

fn phase_message(technique: &Technique, phase: Phase) -> Message {
    Message::Text(
        serde_json::json!({
            "type": "phase",
            "technique": technique.name,
            "phase": phase,
            "label": phase.label(),
            "secs": phase.duration(technique).as_secs(),
        })
        .to_string(),
    )
}

async fn run_pacer(socket: WebSocket, technique: Technique) {
    let pacer = Pacer::start(technique);
    let mut phases = pacer.subscribe();
    let (mut sender, mut receiver) = socket.split();

    tracing::debug!(technique = technique.name, "Pacing session started");

    if sender
        .send(phase_message(&technique, pacer.phase()))
        .await
        .is_err()
    {
        return;
    }

    loop {
        tokio::select! {
            changed = phases.changed() => {
                if changed.is_err() {
                    break;
                }
                let phase = *phases.borrow_and_update();
                if sender.send(phase_message(&technique, phase)).await.is_err() {
                    break;
                }
            }
            msg = receiver.next() => match msg {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    pacer.stop();
    tracing::debug!(technique = technique.name, "Pacing session ended");
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::handlers::test_support::{get, TestApp};

    #[tokio::test]
    async fn test_list_techniques_with_schedule() {
        let app = TestApp::new();
        let (status, body) = get(&app.router(), "/api/breathing/techniques").await;
        assert_eq!(status, StatusCode::OK);

        let techniques = body.as_array().unwrap();
        assert_eq!(techniques.len(), 3);
        assert_eq!(techniques[0]["name"], "Box Breathing");
        assert_eq!(techniques[1]["cycle_secs"], 19);

        let resonant = &techniques[2]["schedule"];
        assert_eq!(resonant.as_array().unwrap().len(), 2);
        assert_eq!(resonant[1]["phase"], "exhale");
        assert_eq!(resonant[1]["label"], "Exhale");
    }

    #[tokio::test]
    async fn test_get_technique_by_name() {
        let app = TestApp::new();
        let (status, body) =
            get(&app.router(), "/api/breathing/techniques/4-7-8%20Breathing").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hold_secs"], 7);

        let (status, body) = get(&app.router(), "/api/breathing/techniques/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], 404);
    }

    #[test]
    fn test_phase_message_shape() {
        let technique = super::lookup("box breathing").unwrap();
        let super::Message::Text(text) = super::phase_message(&technique, super::Phase::Hold) else {
            panic!("expected a text frame");
        };
        let msg: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(msg["type"], "phase");
        assert_eq!(msg["phase"], "hold");
        assert_eq!(msg["secs"], 4);
    }
}
