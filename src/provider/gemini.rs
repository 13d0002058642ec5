use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Provider;
use crate::errors::PlannerError;
use crate::wire::GenerationRequest;

pub const NO_CONTENT: &str = "AI returned no content.";

/// Google Gemini `generateContent` over REST.
pub struct GeminiProvider {
    api_key: String,
    api_base: String,
    client: Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
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

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, api_base: String, timeout_secs: u64) -> Result<Self, PlannerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PlannerError::Configuration(format!("http client: {e}")))?;
        Ok(Self { api_key, api_base, client })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base.trim_end_matches('/'), model)
    }
}

fn request_body(req: &GenerationRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part { text: &req.prompt }],
        }],
        system_instruction: req.system_instruction.as_deref().map(|s| Content {
            role: None,
            parts: vec![Part { text: s }],
        }),
        generation_config: GenerationConfig { temperature: req.temperature },
    }
}

/// Pull the message out of a non-2xx body, falling back to the raw text.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) if !env.error.message.is_empty() => format!("{} ({})", env.error.message, status),
        _ if body.trim().is_empty() => format!("HTTP {status}"),
        _ => format!("HTTP {status}: {}", body.trim()),
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(body: &str) -> Result<String, PlannerError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| PlannerError::Generation(format!("malformed response: {e}")))?;

    if let Some(usage) = &parsed.usage_metadata {
        tracing::info!(
            prompt_tokens = ?usage.prompt_token_count,
            response_tokens = ?usage.candidates_token_count,
            "gemini usage"
        );
    }

    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| PlannerError::Generation(NO_CONTENT.into()))?;
    if let Some(reason) = &candidate.finish_reason {
        tracing::debug!(%reason, "gemini finish reason");
    }
    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();
    if text.is_empty() {
        return Err(PlannerError::Generation(NO_CONTENT.into()));
    }
    Ok(text)
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, req: &GenerationRequest) -> Result<String, PlannerError> {
        let url = self.endpoint(&req.model);
        tracing::debug!(%url, prompt_chars = req.prompt.len(), "POST generateContent");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(req))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(%status, bytes = text.len(), "gemini response");

        if !status.is_success() {
            let msg = error_message(status, &text);
            tracing::warn!(%status, "gemini request failed");
            return Err(PlannerError::Generation(msg));
        }
        extract_text(&text)
    }
}
