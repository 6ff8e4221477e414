//! Gemini client for the `generateContent` endpoint.

use async_trait::async_trait;
use epic_core::{CompletionModel, EpicError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Completion model backed by the Gemini REST API.
///
/// Constructed once at process start and passed by reference into the
/// workflow; holds no mutable state beyond the connection pool.
pub struct GeminiModel {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiModel {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(EpicError::Config("Gemini API key is empty".to_string()));
        }
        Ok(Self { http: reqwest::Client::new(), api_key, model: model.into() })
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait]
impl CompletionModel for GeminiModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{API_BASE}/models/{}:generateContent", self.model);
        let body = GenerateContentRequest {
            contents: vec![RequestContent { parts: vec![RequestPart { text: prompt }] }],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "sending generateContent request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EpicError::Model(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            // Keep the status code in the message so transient conditions
            // (429, 5xx) stay recognizable downstream.
            let detail = response.text().await.unwrap_or_default();
            return Err(EpicError::Model(format!("Gemini returned HTTP {status}: {detail}")));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| EpicError::Model(format!("Gemini response decode failed: {e}")))?;

        let text: String = payload
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content.parts.iter().filter_map(|p| p.text.as_deref()).collect::<Vec<_>>().join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(EpicError::Model("Gemini returned no candidate text".to_string()));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(GeminiModel::new("  ", "gemini-2.5-flash"), Err(EpicError::Config(_))));
    }

    #[test]
    fn test_model_name() {
        let model = GeminiModel::new("test-key", "gemini-2.5-flash").unwrap();
        assert_eq!(model.name(), "gemini-2.5-flash");
    }

    #[test]
    fn test_request_shape() {
        let body = GenerateContentRequest {
            contents: vec![RequestContent { parts: vec![RequestPart { text: "hello" }] }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_response_text_extraction() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "Hello "}, {"text": "world"}],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        });
        let payload: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let text: String = payload
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content.parts.iter().filter_map(|p| p.text.as_deref()).collect::<Vec<_>>().join("")
            })
            .unwrap_or_default();
        assert_eq!(text, "Hello world");
    }

    #[test]
    fn test_response_without_candidates() {
        let payload: GenerateContentResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(payload.candidates.is_empty());
    }
}
