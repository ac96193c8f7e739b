//! HTTP surface for the tool hub: every utility exposed as a JSON endpoint.

pub mod config;
pub mod error;
pub mod routes;
pub mod validation;

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub ai: Arc<ai_core::GeminiClient>,
    pub request_count: Arc<AtomicU64>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(ai: ai_core::GeminiClient, config: ServerConfig) -> Self {
        Self {
            ai: Arc::new(ai),
            request_count: Arc::new(AtomicU64::new(0)),
            config,
        }
    }
}

/// All routes, mounted at the root and under `/api`. The middleware stack
/// (trace, rate limit, timeout, CORS) is layered on by `main`.
pub fn build_router(state: AppState) -> Router {
    use crate::routes::*;

    let public_api = Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/tools", get(list_tools))
        .route("/audio/convert", post(audio_convert))
        .route("/audio/trim", post(audio_trim))
        .route("/ai/generate", post(ai_generate))
        .route("/ai/blog-ideas", post(ai_blog_ideas))
        .route("/calc/emi", post(calc_emi))
        .route("/calc/sip", post(calc_sip))
        .route("/calc/bmi", post(calc_bmi))
        .route("/calc/age", post(calc_age))
        .route("/text/stats", post(text_stats))
        .route("/text/base64", post(text_base64))
        .route("/text/format-json", post(text_format_json))
        .route("/convert/units", post(convert_units))
        .route("/utils/color", post(convert_color))
        .route("/utils/password", post(generate_password))
        .route("/image/convert", post(image_convert))
        .route("/image/compress", post(image_compress))
        .route("/image/crop", post(image_crop));

    // Metrics endpoint - consider adding authentication in production
    let metrics_api = Router::new().route("/metrics", get(metrics_endpoint));

    let api = Router::new().merge(public_api).merge(metrics_api);

    Router::new()
        .merge(api.clone()) // root paths
        .nest("/api", api) // /api prefix
        .with_state(state)
}
