//! Text & code utilities: word statistics, Base64, JSON formatting.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("invalid Base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded bytes are not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reading speed assumed for the reading-time estimate.
const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TextStats {
    pub words: usize,
    pub chars: usize,
    pub spaces: usize,
    pub reading_minutes: usize,
}

pub fn word_stats(text: &str) -> TextStats {
    let words = text.split_whitespace().count();
    TextStats {
        words,
        chars: text.chars().count(),
        spaces: text.matches(' ').count(),
        reading_minutes: words.div_ceil(WORDS_PER_MINUTE),
    }
}

pub fn base64_encode(input: &str) -> String {
    STANDARD.encode(input)
}

pub fn base64_decode(input: &str) -> Result<String, TextError> {
    let bytes = STANDARD.decode(input.trim())?;
    Ok(String::from_utf8(bytes)?)
}

/// Parse and pretty-print JSON with 4-space indentation. Invalid input is
/// reported with serde_json's position information.
pub fn format_json(input: &str) -> Result<String, TextError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(out)?)
}
