// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Model gateway and the Gemini `generateContent` client.
//!
//! Handles:
//! - Text-only requests (plan generation)
//! - Text + inline image requests (photo analysis)
//! - Mapping every failure to a user-visible generation error (no retries)

use crate::config::Config;
use crate::error::AppError;
use crate::models::ImageUpload;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Opaque text generation service.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send a prompt, optionally with one image, and return the model's text.
    async fn generate(&self, prompt: &str, image: Option<&ImageUpload>) -> Result<String, AppError>;

    /// Text-only request.
    async fn generate_text(&self, prompt: &str) -> Result<String, AppError> {
        self.generate(prompt, None).await
    }
}

// ─── Wire types ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

// ─── Client ──────────────────────────────────────────────────

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client for `model` using `api_key`.
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            model,
            api_key,
        }
    }

    /// Build a client from config, or `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        config.gemini_api_key.as_ref().map(|key| {
            Self::new(
                key.clone(),
                config.gemini_model.clone(),
                config.gemini_api_base_url.clone(),
            )
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Check response status and parse the body into text.
    async fn read_response(response: reqwest::Response) -> Result<String, AppError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Generation(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            tracing::error!(status = %status, "Gemini API error");
            return Err(map_api_error(status.as_u16(), &body));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::Generation(format!("Failed to parse Gemini response: {e}")))?;

        extract_text(parsed)
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    #[instrument(
        skip(self, prompt, image),
        fields(model = %self.model, prompt_len = prompt.len(), has_image = image.is_some())
    )]
    async fn generate(&self, prompt: &str, image: Option<&ImageUpload>) -> Result<String, AppError> {
        let body = build_request(prompt, image);

        tracing::debug!("Sending request to Gemini API");

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors may embed the URL, which carries the key
                AppError::Generation(format!("HTTP request failed: {}", e.without_url()))
            })?;

        let text = Self::read_response(response).await?;
        tracing::debug!(response_len = text.len(), "Received Gemini response");
        Ok(text)
    }
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

fn build_request<'a>(prompt: &'a str, image: Option<&'a ImageUpload>) -> GenerateRequest<'a> {
    let mut parts = vec![RequestPart::Text { text: prompt }];
    if let Some(image) = image {
        parts.push(RequestPart::InlineData {
            inline_data: InlineData {
                mime_type: &image.mime_type,
                data: STANDARD.encode(&image.bytes),
            },
        });
    }

    GenerateRequest {
        contents: vec![Content {
            role: "user",
            parts,
        }],
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Result<String, AppError> {
    if let Some(error) = response.error {
        return Err(AppError::Generation(format!(
            "Gemini API error: {}",
            error.message
        )));
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(AppError::Generation(format!(
            "The model returned no answer ({reason})"
        )));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "empty response".to_string());
        return Err(AppError::Generation(format!(
            "The model returned no text ({reason})"
        )));
    }

    Ok(text)
}

/// Map a non-success status to a generation error, preferring the API's own message.
fn map_api_error(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<GenerateResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .map_or_else(|| body.to_string(), |e| e.message);

    match status {
        429 => AppError::Generation(quota_message(&message)),
        401 | 403 => AppError::Generation(format!(
            "Gemini rejected the API key ({status}): {message}"
        )),
        _ => AppError::Generation(format!("Gemini API error ({status}): {message}")),
    }
}

/// Turn a quota error into a short message, keeping the retry delay if given.
///
/// Gemini phrases it as e.g. "Please retry in 6.406453963s."
fn quota_message(message: &str) -> String {
    const RETRY_PREFIX: &str = "Please retry in ";

    message
        .find(RETRY_PREFIX)
        .map(|pos| &message[pos + RETRY_PREFIX.len()..])
        .and_then(|rest| rest.split_once('s'))
        .and_then(|(secs, _)| secs.parse::<f64>().ok())
        .map_or_else(
            || AppError::QUOTA_EXCEEDED.to_string(),
            |secs| {
                format!(
                    "AI service quota exceeded. Please try again in {} seconds.",
                    secs.ceil() as u64
                )
            },
        )
}
