//! Local wellbeing journal service: daily check-ins, weekly aggregation,
//! critical-area detection and micro-action recommendations, served to the
//! UI over HTTP on the loopback interface.

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod rate_limit;
pub mod services;
pub mod store;

use config::Config;
use rate_limit::RateLimitState;
use services::assistant::Assistant;
use store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub assistant: Arc<dyn Assistant>,
    pub config: Arc<Config>,
    pub ws_tx: Option<broadcast::Sender<String>>,
    pub rate_limiter: RateLimitState,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, assistant: Arc<dyn Assistant>, config: Config) -> Self {
        let (ws_tx, _) = broadcast::channel::<String>(256);
        Self {
            store,
            assistant,
            config: Arc::new(config),
            ws_tx: Some(ws_tx),
            rate_limiter: RateLimitState::new(),
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = std::iter::once(config.frontend_url.as_str())
        .chain(config.cors_extra_origins.iter().map(String::as_str))
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn app(state: AppState) -> Router {
    let assistant_routes = Router::new()
        .route(
            "/api/entries/:date/ai-summary",
            post(handlers::entries::generate_ai_summary),
        )
        .route(
            "/api/summaries/:date/ai-summary",
            post(handlers::summaries::generate_ai_summary),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit_assistant,
        ));

    let routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/ws", get(handlers::ws::ws_handler))
        // Entries
        .route(
            "/api/entries",
            get(handlers::entries::list_entries).post(handlers::entries::upsert_entry),
        )
        .route("/api/entries/:date", get(handlers::entries::get_entry))
        .route(
            "/api/entries/:date/micro-actions",
            post(handlers::entries::generate_micro_actions),
        )
        // Weekly summaries
        .route("/api/summaries", get(handlers::summaries::list_summaries))
        .route("/api/summaries/:date", get(handlers::summaries::get_summary))
        .route(
            "/api/summaries/:date/regenerate",
            post(handlers::summaries::regenerate_summary),
        )
        // Catalog
        .route("/api/catalog/questions", get(handlers::catalog::list_questions))
        .route(
            "/api/catalog/micro-actions",
            get(handlers::catalog::list_micro_actions),
        )
        // Settings
        .route(
            "/api/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        // Backup
        .route("/api/export", get(handlers::backup::export_journal))
        .route("/api/import", post(handlers::backup::import_journal))
        .merge(assistant_routes);

    Router::new()
        .merge(routes)
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
