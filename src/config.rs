use std::env;

use chrono::FixedOffset;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub analysis_api_url: String,
    pub analysis_api_key: String,
    pub analysis_model: String,
    pub analysis_max_tokens: u32,
    pub analysis_temperature: f64,
    // None = transport default
    pub analysis_timeout_secs: Option<u64>,
    pub analysis_rate_limit_per_hour: u32,

    pub mood_utc_offset_minutes: i32,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            analysis_api_url: env::var("ANALYSIS_API_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1/chat/completions".into()),
            analysis_api_key: env::var("ANALYSIS_API_KEY").unwrap_or_else(|_| String::new()),
            analysis_model: env::var("ANALYSIS_MODEL")
                .unwrap_or_else(|_| "openai/gpt-3.5-turbo".into()),
            analysis_max_tokens: env::var("ANALYSIS_MAX_TOKENS")
                .unwrap_or_else(|_| "500".into())
                .parse()
                .expect("ANALYSIS_MAX_TOKENS must be a number"),
            analysis_temperature: parse_temperature(
                &env::var("ANALYSIS_TEMPERATURE").unwrap_or_else(|_| "0.7".into()),
            )
            .expect("ANALYSIS_TEMPERATURE must be a finite number"),
            analysis_timeout_secs: env::var("ANALYSIS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
            analysis_rate_limit_per_hour: env::var("ANALYSIS_RATE_LIMIT_PER_HOUR")
                .unwrap_or_else(|_| "20".into())
                .parse()
                .unwrap_or(20),

            mood_utc_offset_minutes: env::var("MOOD_UTC_OFFSET_MINUTES")
                .unwrap_or_else(|_| "0".into())
                .parse()
                .expect("MOOD_UTC_OFFSET_MINUTES must be a number"),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .unwrap_or_else(|_| "true".into())
                .parse()
                .unwrap_or(true),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Offset used as the "local calendar" for day comparisons.
    pub fn mood_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.mood_utc_offset_minutes * 60)
            .expect("MOOD_UTC_OFFSET_MINUTES must be within +/-24h")
    }
}

/// `f64::from_str` accepts "NaN" and "inf", which cannot go on the wire.
fn parse_temperature(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|t| t.is_finite())
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            analysis_api_url: "https://llm.test/v1/chat/completions".into(),
            analysis_api_key: "test-key".into(),
            analysis_model: "openai/gpt-3.5-turbo".into(),
            analysis_max_tokens: 500,
            analysis_temperature: 0.7,
            analysis_timeout_secs: None,
            analysis_rate_limit_per_hour: 20,
            mood_utc_offset_minutes: 0,
            seed_demo_data: false,
        }
    }
}
