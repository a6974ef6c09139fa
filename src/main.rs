use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod dto;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod store;

use config::Config;
use middleware::rate_limit::RateLimitState;
use models::backdrop::Backdrop;
use services::analysis::{AnalysisClient, AnalysisSettings, HttpTransport};
use store::MoodStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub moods: Arc<RwLock<MoodStore>>,
    pub analysis: AnalysisClient,
    pub backdrop: Arc<RwLock<Backdrop>>,
    pub ws_tx: Option<broadcast::Sender<String>>,
    pub rate_limiter: RateLimitState,
}

pub fn build_router(state: AppState) -> Router {
    let analysis_routes = Router::new()
        .route("/api/analysis", post(handlers::analysis::analyze))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit_analysis,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/ws", get(handlers::ws::ws_handler))
        // Moods
        .route(
            "/api/moods",
            get(handlers::moods::list_moods).post(handlers::moods::create_mood),
        )
        .route("/api/moods/has-entry", get(handlers::moods::has_entry))
        .route("/api/moods/series", get(handlers::moods::emotion_series))
        .route("/api/moods/stats", get(handlers::moods::mood_stats))
        .route("/api/moods/week", get(handlers::moods::week_strip))
        .route("/api/emotions", get(handlers::moods::list_emotions))
        // Analysis
        .route(
            "/api/analysis/questions",
            get(handlers::analysis::list_questions),
        )
        .merge(analysis_routes)
        // Breathing
        .route(
            "/api/breathing/techniques",
            get(handlers::breathing::list_techniques),
        )
        .route(
            "/api/breathing/techniques/:name",
            get(handlers::breathing::get_technique),
        )
        .route("/ws/breathing/:name", get(handlers::breathing::pace))
        // Backdrop
        .route("/api/backdrops", get(handlers::backdrop::list_backdrops))
        .route(
            "/api/backdrop",
            get(handlers::backdrop::get_backdrop).put(handlers::backdrop::set_backdrop),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindful_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    if config.analysis_api_key.is_empty() {
        tracing::warn!("ANALYSIS_API_KEY is not set; analysis requests will be rejected upstream");
    }

    let store = if config.seed_demo_data {
        MoodStore::seeded(config.mood_offset(), chrono::Utc::now())
    } else {
        MoodStore::new(config.mood_offset())
    };
    tracing::info!(entries = store.len(), "Mood store ready");

    let transport = HttpTransport::new(
        config
            .analysis_timeout_secs
            .map(std::time::Duration::from_secs),
    )?;
    let analysis = AnalysisClient::new(
        Arc::new(transport),
        AnalysisSettings::from(config.as_ref()),
    );

    // WebSocket broadcast channel
    let (ws_tx, _) = broadcast::channel::<String>(256);

    let rate_limiter = RateLimitState::new();
    middleware::rate_limit::spawn_cleanup_worker(rate_limiter.clone());

    let state = AppState {
        config: config.clone(),
        moods: Arc::new(RwLock::new(store)),
        analysis,
        backdrop: Arc::new(RwLock::new(Backdrop::default())),
        ws_tx: Some(ws_tx),
        rate_limiter,
    };

    let allowed_origins: Vec<axum::http::HeaderValue> = {
        let mut origins = vec![config.frontend_url.parse::<axum::http::HeaderValue>()?];
        if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
            for o in extra.split(',') {
                if let Ok(hv) = o.trim().parse::<axum::http::HeaderValue>() {
                    origins.push(hv);
                }
            }
        }
        origins
    };
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    let app = build_router(state)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    // connect info feeds the per-IP analysis rate limit
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
