// Configuration constants for the server

use std::time::Duration;

#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub rate_limit_per_minute: u32,
    pub ai_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub max_audio_bytes: usize,
    pub max_image_bytes: usize,
    pub ai_model: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            rate_limit_per_minute: 120,
            ai_timeout_secs: 120,
            request_timeout_secs: 60,
            cors_allowed_origins: None,
            max_audio_bytes: 50 * 1024 * 1024,
            max_image_bytes: 20 * 1024 * 1024,
            ai_model: String::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let rate_limit_per_minute = std::env::var("RATE_LIMIT_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.rate_limit_per_minute);

        let ai_timeout_secs = std::env::var("AI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.ai_timeout_secs);

        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        let max_audio_bytes = std::env::var("MAX_AUDIO_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_audio_bytes);

        let max_image_bytes = std::env::var("MAX_IMAGE_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_image_bytes);

        let ai_model = std::env::var("GEMINI_MODEL").unwrap_or_default();

        Self {
            port,
            rate_limit_per_minute,
            ai_timeout_secs,
            request_timeout_secs,
            cors_allowed_origins,
            max_audio_bytes,
            max_image_bytes,
            ai_model,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }
}
