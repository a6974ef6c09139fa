use axum::{extract::State, Json};
use validator::Validate;

use crate::dto::{AnalysisRequest, AnalysisResponse, QuestionsResponse};
use crate::error::{AppError, AppResult};
use crate::services::analysis::{build_prompt, QUESTIONS};
use crate::AppState;

pub async fn list_questions() -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        questions: QUESTIONS.iter().map(|q| q.to_string()).collect(),
    })
}

/// Always 200 once the answers are valid: an upstream failure comes back as
/// the diagnosis text itself.
pub async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalysisRequest>,
) -> AppResult<Json<AnalysisResponse>> {
    body.validate()?;
    body.validate_answers().map_err(AppError::Validation)?;

    let pairs: Vec<(&str, &str)> = QUESTIONS
        .iter()
        .copied()
        .zip(body.answers.iter().map(String::as_str))
        .collect();
    let prompt = build_prompt(&pairs);

    tracing::info!(prompt_chars = prompt.len(), "Requesting mental health analysis");
    let diagnosis = state.analysis.request_analysis(&prompt).await;

    Ok(Json(AnalysisResponse { diagnosis }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::config::Config;
    use crate::handlers::test_support::{get, send_json, TestApp};
    use crate::services::analysis::tests::FakeTransport;

    fn answers(n: usize) -> serde_json::Value {
        json!({ "answers": (1..=n).map(|i| format!("answer {i}")).collect::<Vec<_>>() })
    }

    #[tokio::test]
    async fn test_questions_listed_in_order() {
        let app = TestApp::new();
        let (status, body) = get(&app.router(), "/api/analysis/questions").await;
        assert_eq!(status, StatusCode::OK);
        let questions = body["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 10);
        assert_eq!(questions[3], "How have you been sleeping?");
    }

    #[tokio::test]
    async fn test_analyze_returns_cleaned_diagnosis() {
        let app = TestApp::new();
        let (status, body) = send_json(&app.router(), "POST", "/api/analysis", answers(10)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["diagnosis"], "Sleep Keep a steady bedtime.");
        assert_eq!(app.transport.calls(), 1);

        let sent = app.transport.last_body_json();
        let prompt = sent["messages"][1]["content"].as_str().unwrap();
        let first = prompt.find("Answer: answer 1\n").unwrap();
        let last = prompt.find("Answer: answer 10\n").unwrap();
        assert!(first < last);
        assert!(prompt.contains("Question: Do you feel overwhelmed or stressed frequently?"));
    }

    #[tokio::test]
    async fn test_analyze_rejects_missing_or_blank_answers() {
        let app = TestApp::new();

        let (status, _) = send_json(&app.router(), "POST", "/api/analysis", answers(9)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let mut blank = answers(10);
        blank["answers"][9] = json!(" ");
        let (status, body) = send_json(&app.router(), "POST", "/api/analysis", blank).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["message"], "Answer 10 must not be empty");

        assert_eq!(app.transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_reported_as_diagnosis_text() {
        let app = TestApp::with(FakeTransport::replying(404, ""), Config::default());
        let (status, body) = send_json(&app.router(), "POST", "/api/analysis", answers(10)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["diagnosis"], "HTTP error 404");
    }

    #[tokio::test]
    async fn test_analysis_is_rate_limited_per_ip() {
        let config = Config {
            analysis_rate_limit_per_hour: 2,
            ..Config::default()
        };
        let app = TestApp::with(
            FakeTransport::replying(200, crate::handlers::test_support::CANNED_DIAGNOSIS),
            config,
        );

        for _ in 0..2 {
            let (status, _) = send_json(&app.router(), "POST", "/api/analysis", answers(10)).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, body) = send_json(&app.router(), "POST", "/api/analysis", answers(10)).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"]["code"], 429);
        assert_eq!(app.transport.calls(), 2);
    }
}
