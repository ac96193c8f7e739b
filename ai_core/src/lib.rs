use anyhow::{anyhow, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Structure for the generateContent API request
#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Structure for the generateContent API response
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Thin client for the Gemini text-completion endpoint. One prompt in, one
/// reply out; no session state, no streaming.
pub struct GeminiClient {
    api_key: String,
    client: Client,
    model: String,
}

impl GeminiClient {
    /// Create a client for the given model. Reads the API key from the
    /// `GEMINI_API_KEY` env variable; an unset key is tolerated here and
    /// rejected by the service on the first request.
    pub fn new(model: &str) -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
        Ok(Self::with_api_key(api_key, model))
    }

    pub fn with_api_key(api_key: String, model: &str) -> Self {
        let model = if model.is_empty() {
            DEFAULT_MODEL
        } else {
            model
        };
        Self {
            api_key,
            client: Client::new(),
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Send a prompt and return the first candidate's text.
    pub fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{API_BASE}/{}:generateContent", self.model);
        let req_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(Duration::from_secs(90))
            .json(&req_body)
            .send()?
            .error_for_status()? // convert non-200 into error
            .json::<GenerateResponse>()?;

        let reply = response
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| anyhow!("empty response from model {}", self.model))?;
        Ok(reply)
    }

    /// Generate blog post ideas for a topic. `existing` carries previously
    /// generated ideas so the model continues the list instead of repeating.
    pub fn blog_ideas(&self, topic: &str, existing: Option<&str>) -> Result<String> {
        self.generate(&blog_ideas_prompt(topic, existing))
    }
}

/// Prompt template for the blog idea generator.
pub fn blog_ideas_prompt(topic: &str, existing: Option<&str>) -> String {
    let mut prompt = String::from("You are a creative content strategist. ");

    match existing.filter(|ideas| !ideas.trim().is_empty()) {
        Some(ideas) => {
            let next_num = ideas
                .lines()
                .filter(|line| numbered_item(line))
                .count()
                + 1;
            prompt.push_str(&format!(
                "I have already generated these blog post ideas for the topic \"{topic}\":\n\n{ideas}\n\n"
            ));
            prompt.push_str(
                "Please generate 5 *NEW and DIFFERENT* engaging blog post ideas for the same topic. \
                 Do not repeat the ones listed above. ",
            );
            prompt.push_str(&format!("IMPORTANT: Start numbering the new list from {next_num}. "));
        }
        None => {
            prompt.push_str(&format!(
                "Generate 5 engaging blog post ideas for the topic: \"{topic}\". "
            ));
        }
    }

    prompt.push_str(
        "For each idea, provide:\n\
         1. A catchy, SEO-friendly title.\n\
         2. A brief 1-sentence hook or summary.\n\
         Format the output clearly with numbering.",
    );
    prompt
}

fn numbered_item(line: &str) -> bool {
    let mut saw_digit = false;
    for c in line.chars() {
        if c.is_ascii_digit() {
            saw_digit = true;
        } else {
            return saw_digit && c == '.';
        }
    }
    false
}
