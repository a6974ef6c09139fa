//! # Analysis client
//!
//! Turns the assessment answers into one prompt, sends it to a chat-completion
//! endpoint and reduces whatever comes back to a single display string.
//!
//! There is no retry, backoff or cancellation: one call, one settled string.
//! Failures are rendered into the same string slot as a successful analysis;
//! callers only ever see text.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;

/// Fixed assessment, asked in this order.
pub const QUESTIONS: [&str; 10] = [
    "How have you been feeling lately—emotionally and physically?",
    "Have you been feeling more sad, anxious, or angry than usual?",
    "Have you lost interest in things you usually enjoy?",
    "How have you been sleeping?",
    "Do you feel rested when you wake up?",
    "Have you had trouble falling or staying asleep?",
    "Has your appetite changed recently?",
    "Have you noticed any weight gain or loss?",
    "Have you been experiencing headaches, stomachaches, or other physical symptoms?",
    "Do you feel overwhelmed or stressed frequently?",
];

const PREAMBLE: &str = "Analyze these responses to mental health questions and provide a brief \
assessment with recommendations and provide easy to fix solutions while showing care to the user:";

const SYSTEM_PROMPT: &str = "You are a helpful assistant trained to analyze mental health \
responses. Please format your response with clear headings but without using Markdown \
formatting like asterisks (**) for bold text.";

/// Every way a single analysis request can end without a diagnosis.
/// `Display` is the exact text shown in place of the diagnosis.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AnalysisError {
    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTTP error {0}")]
    Status(u16),

    #[error("JSON decoding error: {0}")]
    MalformedBody(String),

    #[error("API Error: {0}")]
    Upstream(String),

    #[error("Unexpected response format.")]
    UnexpectedShape,

    #[error("Failed to create request: {0}")]
    RequestSerialization(String),
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Outbound POST of an already-encoded JSON body.
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: Vec<u8>,
    ) -> Result<TransportResponse, TransportError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait::async_trait]
impl ChatTransport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: Vec<u8>,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl From<&Config> for AnalysisSettings {
    fn from(config: &Config) -> Self {
        Self {
            endpoint: config.analysis_api_url.clone(),
            api_key: config.analysis_api_key.clone(),
            model: config.analysis_model.clone(),
            max_tokens: config.analysis_max_tokens,
            temperature: config.analysis_temperature,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Clone)]
pub struct AnalysisClient {
    transport: Arc<dyn ChatTransport>,
    settings: AnalysisSettings,
}

impl AnalysisClient {
    pub fn new(transport: Arc<dyn ChatTransport>, settings: AnalysisSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Request body for `prompt`, encoded as JSON.
    pub fn encode_request(&self, prompt: &str) -> Result<Vec<u8>, AnalysisError> {
        // serde_json writes NaN and infinities as null; refuse them instead.
        if !self.settings.temperature.is_finite() {
            return Err(AnalysisError::RequestSerialization(format!(
                "temperature must be a finite number, got {}",
                self.settings.temperature
            )));
        }

        let request = ChatRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };
        serde_json::to_vec(&request).map_err(|e| AnalysisError::RequestSerialization(e.to_string()))
    }

    /// One request, no retry. An empty prompt never reaches the transport.
    pub async fn analyze(&self, prompt: &str) -> Result<String, AnalysisError> {
        if prompt.is_empty() {
            return Err(AnalysisError::EmptyPrompt);
        }

        let body = self.encode_request(prompt)?;

        let response = self
            .transport
            .post_json(&self.settings.endpoint, &self.settings.api_key, body)
            .await
            .map_err(|e| AnalysisError::Transport(e.0))?;

        interpret_response(response.status, &response.body)
    }

    /// [`analyze`](Self::analyze) collapsed to the display string. An empty
    /// prompt leaves the display slot blank.
    pub async fn request_analysis(&self, prompt: &str) -> String {
        match self.analyze(prompt).await {
            Ok(diagnosis) => diagnosis,
            Err(AnalysisError::EmptyPrompt) => String::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Analysis request failed");
                e.to_string()
            }
        }
    }
}

/// Renders the questionnaire as a single prompt, pairs kept in order.
pub fn build_prompt<Q, A>(pairs: &[(Q, A)]) -> String
where
    Q: AsRef<str>,
    A: AsRef<str>,
{
    let mut prompt = format!("{PREAMBLE}\n");
    for (question, answer) in pairs {
        prompt.push_str(&format!(
            "Question: {}\nAnswer: {}\n\n",
            question.as_ref(),
            answer.as_ref()
        ));
    }
    prompt
}

/// Maps a settled HTTP exchange to the diagnosis or the matching error.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<String, AnalysisError> {
    if status != 200 {
        return Err(AnalysisError::Status(status));
    }

    let json: Value =
        serde_json::from_slice(body).map_err(|e| AnalysisError::MalformedBody(e.to_string()))?;

    if let Some(content) = json
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
    {
        return Ok(strip_bold_markers(content.trim()));
    }

    if let Some(message) = json.pointer("/error/message").and_then(Value::as_str) {
        return Err(AnalysisError::Upstream(message.to_string()));
    }

    Err(AnalysisError::UnexpectedShape)
}

/// Drops every `**`, paired or not.
pub fn strip_bold_markers(text: &str) -> String {
    text.replace("**", "")
}
