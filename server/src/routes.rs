//! Request handlers for every tool endpoint.

use std::sync::atomic::Ordering;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use tools_core::calculator::{self, Age};
use tools_core::{ToolCategory, ToolInfo};

use crate::error::ApiError;
use crate::validation::{
    validate_password_length, validate_payload_size, validate_prompt, validate_text_input,
    validate_topic, validate_trim_range,
};
use crate::AppState;

pub static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

pub async fn health_check() -> &'static str {
    "ok"
}

// ---- tool registry ----

#[derive(Deserialize)]
pub struct ToolsQuery {
    category: Option<String>,
    q: Option<String>,
}

pub async fn list_tools(
    State(state): State<AppState>,
    Query(params): Query<ToolsQuery>,
) -> Result<Json<Vec<&'static ToolInfo>>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let category = match params.category.as_deref() {
        Some(raw) => Some(ToolCategory::parse(raw).ok_or_else(|| {
            ApiError::InvalidInput(format!(
                "Unknown category: {raw}. Use Image, Audio & Video, Calculators, Text & Code, Utilities or AI."
            ))
        })?),
        None => None,
    };

    Ok(Json(tools_core::filter_tools(
        category,
        params.q.as_deref(),
    )))
}

// ---- audio ----

#[derive(Deserialize)]
pub struct AudioConvertRequest {
    audio_base64: String,
}

#[derive(Deserialize)]
pub struct AudioTrimRequest {
    audio_base64: String,
    start_secs: f64,
    end_secs: f64,
}

#[derive(Serialize)]
pub struct AudioResponse {
    audio_base64: String,
    mime_type: &'static str,
    sample_rate: u32,
    channels: usize,
    duration_ms: u64,
}

fn audio_response(clip: &audio_core::AudioClip, wav: audio_core::WavFile) -> AudioResponse {
    AudioResponse {
        audio_base64: BASE64.encode(wav.bytes()),
        mime_type: audio_core::WAV_MIME_TYPE,
        sample_rate: clip.sample_rate(),
        channels: clip.channel_count(),
        duration_ms: (clip.duration_secs() * 1000.0) as u64,
    }
}

fn decode_payload(payload: &str, max_bytes: usize) -> Result<Vec<u8>, ApiError> {
    validate_payload_size(payload.len(), max_bytes)?;
    BASE64
        .decode(payload.trim())
        .map_err(|e| ApiError::InvalidInput(format!("Payload is not valid Base64: {e}")))
}

pub async fn audio_convert(
    State(state): State<AppState>,
    Json(req): Json<AudioConvertRequest>,
) -> Result<Json<AudioResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let data = decode_payload(&req.audio_base64, state.config.max_audio_bytes)?;

    let started = Instant::now();
    // Decoding and encoding are pure CPU; keep them off the async runtime.
    let response = tokio::task::spawn_blocking(move || {
        let clip = audio_core::decode(&data)?;
        let wav = audio_core::encode(&clip)?;
        Ok::<_, ApiError>(audio_response(&clip, wav))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Task join error: {e}")))??;

    info!(
        "audio convert: {} ms of audio re-encoded in {:.0} ms",
        response.duration_ms,
        started.elapsed().as_secs_f64() * 1000.0
    );
    Ok(Json(response))
}

pub async fn audio_trim(
    State(state): State<AppState>,
    Json(req): Json<AudioTrimRequest>,
) -> Result<Json<AudioResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    validate_trim_range(req.start_secs, req.end_secs)?;
    let data = decode_payload(&req.audio_base64, state.config.max_audio_bytes)?;

    let (start_secs, end_secs) = (req.start_secs, req.end_secs);
    let response = tokio::task::spawn_blocking(move || {
        let clip = audio_core::decode(&data)?;
        let cut = clip
            .trim(start_secs, end_secs)
            .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
        let wav = audio_core::encode(&cut)?;
        Ok::<_, ApiError>(audio_response(&cut, wav))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Task join error: {e}")))??;

    Ok(Json(response))
}

// ---- AI ----

#[derive(Deserialize)]
pub struct AiGenerateRequest {
    prompt: String,
}

#[derive(Serialize)]
pub struct AiGenerateResponse {
    reply: String,
}

#[derive(Deserialize)]
pub struct BlogIdeasRequest {
    topic: String,
    existing: Option<String>,
}

#[derive(Serialize)]
pub struct BlogIdeasResponse {
    ideas: String,
}

async fn run_ai_call<F>(state: &AppState, call: F) -> Result<String, ApiError>
where
    F: FnOnce(&ai_core::GeminiClient) -> anyhow::Result<String> + Send + 'static,
{
    if !state.ai.has_api_key() {
        return Err(ApiError::Ai(
            "AI service is not configured; set GEMINI_API_KEY".to_string(),
        ));
    }

    let client = state.ai.clone();
    let started = Instant::now();

    // Run the blocking HTTP client off the async runtime, bounded by the
    // configured timeout.
    let result = tokio::time::timeout(
        state.config.ai_timeout(),
        tokio::task::spawn_blocking(move || call(client.as_ref())),
    )
    .await;

    match result {
        Ok(Ok(Ok(reply))) => {
            info!(
                "AI reply received in {:.2}s, length={}",
                started.elapsed().as_secs_f64(),
                reply.len()
            );
            Ok(reply)
        }
        Ok(Ok(Err(e))) => Err(ApiError::Ai(format!("{e}"))),
        Ok(Err(join_err)) => {
            error!("Task join error: {join_err}");
            Err(ApiError::Internal(format!("Task join error: {join_err}")))
        }
        Err(_) => {
            let timeout_secs = state.config.ai_timeout().as_secs();
            error!("AI request timed out after {} seconds", timeout_secs);
            Err(ApiError::Ai(format!(
                "Request timed out after {} seconds. Please try again with a shorter prompt.",
                timeout_secs
            )))
        }
    }
}

pub async fn ai_generate(
    State(state): State<AppState>,
    Json(req): Json<AiGenerateRequest>,
) -> Result<Json<AiGenerateResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    validate_prompt(&req.prompt)?;

    let prompt = req.prompt;
    let reply = run_ai_call(&state, move |client| client.generate(&prompt)).await?;
    Ok(Json(AiGenerateResponse { reply }))
}

pub async fn ai_blog_ideas(
    State(state): State<AppState>,
    Json(req): Json<BlogIdeasRequest>,
) -> Result<Json<BlogIdeasResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    validate_topic(&req.topic)?;

    let (topic, existing) = (req.topic, req.existing);
    let ideas = run_ai_call(&state, move |client| {
        client.blog_ideas(&topic, existing.as_deref())
    })
    .await?;
    Ok(Json(BlogIdeasResponse { ideas }))
}

// ---- calculators ----

#[derive(Deserialize)]
pub struct EmiRequest {
    principal: f64,
    annual_rate_pct: f64,
    months: u32,
}

pub async fn calc_emi(
    State(state): State<AppState>,
    Json(req): Json<EmiRequest>,
) -> Result<Json<calculator::EmiBreakdown>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    calculator::emi(req.principal, req.annual_rate_pct, req.months)
        .map(Json)
        .map_err(|e| ApiError::InvalidInput(e.to_string()))
}

#[derive(Deserialize)]
pub struct SipRequest {
    monthly_investment: f64,
    annual_rate_pct: f64,
    years: u32,
}

pub async fn calc_sip(
    State(state): State<AppState>,
    Json(req): Json<SipRequest>,
) -> Result<Json<calculator::SipProjection>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    calculator::sip(req.monthly_investment, req.annual_rate_pct, req.years)
        .map(Json)
        .map_err(|e| ApiError::InvalidInput(e.to_string()))
}

#[derive(Deserialize)]
pub struct BmiRequest {
    weight_kg: f64,
    height_cm: f64,
}

pub async fn calc_bmi(
    State(state): State<AppState>,
    Json(req): Json<BmiRequest>,
) -> Result<Json<calculator::BmiReading>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    calculator::bmi(req.weight_kg, req.height_cm)
        .map(Json)
        .map_err(|e| ApiError::InvalidInput(e.to_string()))
}

#[derive(Deserialize)]
pub struct AgeRequest {
    date_of_birth: NaiveDate,
}

pub async fn calc_age(
    State(state): State<AppState>,
    Json(req): Json<AgeRequest>,
) -> Result<Json<Age>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let today = chrono::Utc::now().date_naive();
    calculator::age_on(req.date_of_birth, today)
        .map(Json)
        .map_err(|e| ApiError::InvalidInput(e.to_string()))
}

// ---- text tools ----

#[derive(Deserialize)]
pub struct TextRequest {
    text: String,
}

pub async fn text_stats(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<tools_core::text::TextStats>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    validate_text_input(&req.text)?;
    Ok(Json(tools_core::text::word_stats(&req.text)))
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base64Mode {
    Encode,
    Decode,
}

#[derive(Deserialize)]
pub struct Base64Request {
    input: String,
    mode: Base64Mode,
}

#[derive(Serialize)]
pub struct TextOutputResponse {
    output: String,
}

pub async fn text_base64(
    State(state): State<AppState>,
    Json(req): Json<Base64Request>,
) -> Result<Json<TextOutputResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    validate_text_input(&req.input)?;
    let output = match req.mode {
        Base64Mode::Encode => tools_core::text::base64_encode(&req.input),
        Base64Mode::Decode => tools_core::text::base64_decode(&req.input)
            .map_err(|e| ApiError::InvalidInput(e.to_string()))?,
    };
    Ok(Json(TextOutputResponse { output }))
}

pub async fn text_format_json(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<TextOutputResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    validate_text_input(&req.text)?;
    let output = tools_core::text::format_json(&req.text)
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    Ok(Json(TextOutputResponse { output }))
}

// ---- unit / color / password utilities ----

#[derive(Deserialize)]
pub struct UnitRequest {
    value: f64,
    kind: tools_core::units::UnitKind,
}

pub async fn convert_units(
    State(state): State<AppState>,
    Json(req): Json<UnitRequest>,
) -> Result<Json<tools_core::units::Conversion>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    if !req.value.is_finite() {
        return Err(ApiError::InvalidInput(
            "Value must be a finite number".to_string(),
        ));
    }
    Ok(Json(tools_core::units::convert(req.value, req.kind)))
}

#[derive(Deserialize)]
pub struct ColorRequest {
    hex: String,
}

#[derive(Serialize)]
pub struct ColorResponse {
    rgb: tools_core::color::Rgb,
    hsl: tools_core::color::Hsl,
}

pub async fn convert_color(
    State(state): State<AppState>,
    Json(req): Json<ColorRequest>,
) -> Result<Json<ColorResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let rgb = tools_core::color::parse_hex(&req.hex)
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    Ok(Json(ColorResponse {
        rgb,
        hsl: tools_core::color::to_hsl(rgb),
    }))
}

#[derive(Deserialize)]
pub struct PasswordRequest {
    length: usize,
}

#[derive(Serialize)]
pub struct PasswordResponse {
    password: String,
}

pub async fn generate_password(
    State(state): State<AppState>,
    Json(req): Json<PasswordRequest>,
) -> Result<Json<PasswordResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    validate_password_length(req.length)?;
    Ok(Json(PasswordResponse {
        password: tools_core::password::generate(req.length),
    }))
}

// ---- image tools ----

#[derive(Deserialize)]
pub struct ImageConvertRequest {
    image_base64: String,
    format: tools_core::image_tools::OutputFormat,
}

#[derive(Deserialize)]
pub struct ImageCompressRequest {
    image_base64: String,
    quality: u8,
}

#[derive(Deserialize)]
pub struct ImageCropRequest {
    image_base64: String,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

#[derive(Serialize)]
pub struct ImageResponse {
    image_base64: String,
    mime_type: &'static str,
}

async fn run_image_tool<F>(state: &AppState, payload: &str, tool: F) -> Result<ImageResponse, ApiError>
where
    F: FnOnce(Vec<u8>) -> Result<(Vec<u8>, &'static str), tools_core::image_tools::ImageToolError>
        + Send
        + 'static,
{
    let data = decode_payload(payload, state.config.max_image_bytes)?;
    let (bytes, mime_type) = tokio::task::spawn_blocking(move || tool(data))
        .await
        .map_err(|e| ApiError::Internal(format!("Task join error: {e}")))?
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    Ok(ImageResponse {
        image_base64: BASE64.encode(bytes),
        mime_type,
    })
}

pub async fn image_convert(
    State(state): State<AppState>,
    Json(req): Json<ImageConvertRequest>,
) -> Result<Json<ImageResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let format = req.format;
    let response = run_image_tool(&state, &req.image_base64, move |data| {
        tools_core::image_tools::convert(&data, format).map(|bytes| (bytes, format.mime_type()))
    })
    .await?;
    Ok(Json(response))
}

pub async fn image_compress(
    State(state): State<AppState>,
    Json(req): Json<ImageCompressRequest>,
) -> Result<Json<ImageResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let quality = req.quality;
    let response = run_image_tool(&state, &req.image_base64, move |data| {
        tools_core::image_tools::compress(&data, quality)
            .map(|bytes| (bytes, tools_core::image_tools::OutputFormat::Jpeg.mime_type()))
    })
    .await?;
    Ok(Json(response))
}

pub async fn image_crop(
    State(state): State<AppState>,
    Json(req): Json<ImageCropRequest>,
) -> Result<Json<ImageResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let (x, y, width, height) = (req.x, req.y, req.width, req.height);
    let response = run_image_tool(&state, &req.image_base64, move |data| {
        tools_core::image_tools::crop(&data, x, y, width, height)
            .map(|bytes| (bytes, tools_core::image_tools::OutputFormat::Png.mime_type()))
    })
    .await?;
    Ok(Json(response))
}

// ---- metrics ----

#[derive(Serialize)]
pub struct MetricsResponse {
    pub cpu_usage_percent: f32,
    pub memory_used_mb: u64,
    pub memory_total_mb: u64,
    pub memory_usage_percent: f32,
    pub request_count: u64,
    pub uptime_seconds: u64,
    pub system_load: Option<f64>,
}

pub async fn metrics_endpoint(State(state): State<AppState>) -> Json<MetricsResponse> {
    let mut system = sysinfo::System::new();
    system.refresh_cpu();
    system.refresh_memory();

    let cpu_usage = system.global_cpu_info().cpu_usage();

    let memory_used = system.used_memory();
    let memory_total = system.total_memory();
    let memory_usage_percent = if memory_total > 0 {
        (memory_used as f64 / memory_total as f64 * 100.0) as f32
    } else {
        0.0
    };

    let request_count = state.request_count.load(Ordering::Relaxed);

    let uptime = START_TIME
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0);

    let system_load = {
        #[cfg(unix)]
        {
            use std::fs;
            if let Ok(loadavg) = fs::read_to_string("/proc/loadavg") {
                loadavg
                    .split_whitespace()
                    .next()
                    .and_then(|s| s.parse::<f64>().ok())
            } else {
                None
            }
        }
        #[cfg(not(unix))]
        None
    };

    Json(MetricsResponse {
        cpu_usage_percent: cpu_usage,
        memory_used_mb: memory_used / 1024 / 1024,
        memory_total_mb: memory_total / 1024 / 1024,
        memory_usage_percent,
        request_count,
        uptime_seconds: uptime,
        system_load,
    })
}
