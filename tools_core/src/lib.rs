//! Single-purpose utility tools and the registry the launcher lists them by.

pub mod calculator;
pub mod color;
pub mod image_tools;
pub mod password;
pub mod text;
pub mod units;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToolCategory {
    #[serde(rename = "Image")]
    Image,
    #[serde(rename = "Audio & Video")]
    AudioVideo,
    #[serde(rename = "Calculators")]
    Calculator,
    #[serde(rename = "Text & Code")]
    Text,
    #[serde(rename = "Utilities")]
    Utility,
    #[serde(rename = "AI")]
    Ai,
}

impl ToolCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ToolCategory::Image => "Image",
            ToolCategory::AudioVideo => "Audio & Video",
            ToolCategory::Calculator => "Calculators",
            ToolCategory::Text => "Text & Code",
            ToolCategory::Utility => "Utilities",
            ToolCategory::Ai => "AI",
        }
    }

    /// Accepts either the display label or a short token like `audio-video`.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized: String = input
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "image" => Some(ToolCategory::Image),
            "audiovideo" | "audio" => Some(ToolCategory::AudioVideo),
            "calculators" | "calculator" => Some(ToolCategory::Calculator),
            "textcode" | "text" => Some(ToolCategory::Text),
            "utilities" | "utility" => Some(ToolCategory::Utility),
            "ai" => Some(ToolCategory::Ai),
            _ => None,
        }
    }
}

/// One entry in the launcher grid.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ToolInfo {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: ToolCategory,
}

const fn tool(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: ToolCategory,
) -> ToolInfo {
    ToolInfo {
        id,
        title,
        description,
        category,
    }
}

pub const REGISTRY: &[ToolInfo] = &[
    tool("img-convert", "Image Converter", "Convert JPG, PNG, WEBP", ToolCategory::Image),
    tool("img-compress", "Image Compressor", "Reduce file size", ToolCategory::Image),
    tool("img-crop", "Image Cropper", "Crop & export", ToolCategory::Image),
    tool("audio-convert", "Audio Converter", "Re-encode audio as WAV", ToolCategory::AudioVideo),
    tool("audio-trim", "Audio Trimmer", "Trim audio clips", ToolCategory::AudioVideo),
    tool("age-calc", "Age Calculator", "Calculate exact age", ToolCategory::Calculator),
    tool("emi-calc", "EMI Calculator", "Loan EMI planner", ToolCategory::Calculator),
    tool("sip-calc", "SIP Calculator", "Investment return", ToolCategory::Calculator),
    tool("bmi-calc", "BMI Calculator", "Health index", ToolCategory::Calculator),
    tool("word-count", "Word Counter", "Count text stats", ToolCategory::Text),
    tool("base64", "Base64 Tool", "Encode/decode", ToolCategory::Text),
    tool("json-format", "JSON Formatter", "Validate JSON", ToolCategory::Text),
    tool("unit-convert", "Unit Converter", "Convert length/weight/temp", ToolCategory::Utility),
    tool("color-convert", "Color Codes", "HEX, RGB, HSL", ToolCategory::Utility),
    tool("password-gen", "Password Generator", "Secure passwords", ToolCategory::Utility),
    tool("ai-assistant", "AI Assistant", "Ask anything", ToolCategory::Ai),
    tool("blog-ideas", "Blog Idea Generator", "AI blog topics", ToolCategory::Ai),
];

/// Filter the registry by category and/or a case-insensitive search over
/// title and description.
pub fn filter_tools(category: Option<ToolCategory>, query: Option<&str>) -> Vec<&'static ToolInfo> {
    let query = query.map(str::to_lowercase);
    REGISTRY
        .iter()
        .filter(|t| category.map_or(true, |c| t.category == c))
        .filter(|t| {
            query.as_deref().map_or(true, |q| {
                t.title.to_lowercase().contains(q) || t.description.to_lowercase().contains(q)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_ids_are_unique() {
        let mut ids: Vec<_> = REGISTRY.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), REGISTRY.len());
    }

    #[test]
    fn category_filter_narrows_the_grid() {
        let calculators = filter_tools(Some(ToolCategory::Calculator), None);
        assert_eq!(calculators.len(), 4);
        assert!(calculators.iter().all(|t| t.category == ToolCategory::Calculator));
    }

    #[test]
    fn search_matches_title_and_description() {
        let hits = filter_tools(None, Some("password"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "password-gen");

        let hits = filter_tools(None, Some("WAV"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "audio-convert");
    }

    #[test]
    fn category_parse_accepts_labels_and_tokens() {
        assert_eq!(ToolCategory::parse("Audio & Video"), Some(ToolCategory::AudioVideo));
        assert_eq!(ToolCategory::parse("audio-video"), Some(ToolCategory::AudioVideo));
        assert_eq!(ToolCategory::parse("Text & Code"), Some(ToolCategory::Text));
        assert_eq!(ToolCategory::parse("nonsense"), None);
    }
}
