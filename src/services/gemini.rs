use crate::catalog::Catalog;
use crate::config::GenerationConfig;
use crate::models::{Itinerary, QuizAnswers};
use crate::services::parser::parse_itinerary_response;
use crate::services::prompts::build_instructions;
use crate::services::scoring::ScoredDestination;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("GEMINI_API_KEY is not set")]
    MissingCredentials,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Gemini API timed out after {0}s")]
    Timeout(u64),

    #[error("Gemini API rate limited")]
    RateLimited,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No text in Gemini response")]
    EmptyPayload,

    #[error("Failed to decode response envelope: {0}")]
    Envelope(String),
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_config(&GenerationConfig {
            api_key,
            ..GenerationConfig::default()
        })
    }

    pub fn with_config(config: &GenerationConfig) -> Self {
        GeminiClient {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            timeout: config.timeout(),
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }

    /// Send the instruction block and return the raw text of the first
    /// candidate. The whole exchange is bounded by the configured timeout.
    pub async fn generate_text(&self, instructions: &str) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredentials)?;

        match tokio::time::timeout(self.timeout, self.send(api_key, instructions)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.timeout.as_secs())),
        }
    }

    async fn send(&self, api_key: &str, instructions: &str) -> Result<String, GenerationError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: instructions }],
            }],
            generation_config: GenerationParams {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
                response_mime_type: "application/json",
            },
        };

        tracing::debug!(
            model = %self.model,
            prompt_chars = instructions.len(),
            "Gemini API request: model {}, {} prompt chars",
            self.model, instructions.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerationError::RateLimited);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Envelope(e.to_string()))?;

        envelope
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(GenerationError::EmptyPayload)
    }

    /// One generative attempt: prompt, call, validate. Every failure is
    /// logged and collapses to `None`.
    pub async fn generate(
        &self,
        answers: &QuizAnswers,
        shortlist: &[ScoredDestination<'_>],
        catalog: &Catalog,
    ) -> Option<Itinerary> {
        let instructions = build_instructions(answers, shortlist);

        let raw = match self.generate_text(&instructions).await {
            Ok(raw) => raw,
            Err(GenerationError::MissingCredentials) => {
                tracing::warn!("GEMINI_API_KEY is not set, skipping generative tier");
                return None;
            }
            Err(GenerationError::Status { status, body }) => {
                tracing::warn!(
                    status = status,
                    "Gemini API HTTP error {}: {}",
                    status, body
                );
                return None;
            }
            Err(e) => {
                tracing::warn!("Gemini API call failed: {}", e);
                return None;
            }
        };

        tracing::debug!(
            response_chars = raw.len(),
            "Gemini response: {} chars",
            raw.len()
        );
        parse_itinerary_response(&raw, catalog)
    }
}

// Gemini API request/response types

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationParams,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationParams {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
