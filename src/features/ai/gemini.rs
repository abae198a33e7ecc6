//! Gemini backend (Google generative text)
//!
//! Talks the `generateContent` wire directly over reqwest since there is no
//! crate equivalent in the stack. Responses are deserialized into the few
//! fields this bot needs.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::backend::{AiBackend, BackendError};

const GENERATE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Transport hardening only; a hung call stalls its own request, never the
/// event loop.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GeminiBackend {
    http: Client,
    api_key: Option<String>,
    model: String,
    max_tokens: u64,
}

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
    text: String,
}

impl GeminiBackend {
    pub fn new(api_key: Option<String>, model: String, max_tokens: u64) -> Self {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        GeminiBackend {
            http,
            api_key: api_key.filter(|key| !key.is_empty()),
            model,
            max_tokens,
        }
    }

    fn classify_status(status: StatusCode, body: String) -> BackendError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Auth(body),
            StatusCode::TOO_MANY_REQUESTS => BackendError::RateLimited(body),
            _ => BackendError::Transport(format!("{status}: {body}")),
        }
    }

    fn extract_text(response: GenerateResponse) -> Result<String, BackendError> {
        response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.trim().to_string())
            .ok_or_else(|| {
                BackendError::MalformedResponse("no candidate text in response".to_string())
            })
    }
}

#[async_trait]
impl AiBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    fn selector(&self) -> &'static str {
        "gemini"
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn invoke(&self, prompt: &str) -> Result<String, BackendError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| BackendError::Auth("no API key configured".to_string()))?;

        let url = format!("{GENERATE_BASE_URL}/{}:generateContent?key={key}", self.model);
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {"maxOutputTokens": self.max_tokens}
        });

        debug!("Gemini request | model: {} | prompt: {} chars", self.model, prompt.len());

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, text));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;

        Self::extract_text(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_iff_key_present() {
        let with_key = GeminiBackend::new(
            Some("AIza-test".to_string()),
            "gemini-1.5-flash".to_string(),
            1000,
        );
        assert!(with_key.is_available());

        let empty_key =
            GeminiBackend::new(Some(String::new()), "gemini-1.5-flash".to_string(), 1000);
        assert!(!empty_key.is_available());

        let no_key = GeminiBackend::new(None, "gemini-1.5-flash".to_string(), 1000);
        assert!(!no_key.is_available());
    }

    #[test]
    fn test_extract_text_from_wire_shape() {
        let parsed: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "  hello from gemini  "}],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(
            GeminiBackend::extract_text(parsed).unwrap(),
            "hello from gemini"
        );
    }

    #[test]
    fn test_extract_text_rejects_empty_candidates() {
        let parsed: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            GeminiBackend::extract_text(parsed),
            Err(BackendError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            GeminiBackend::classify_status(StatusCode::UNAUTHORIZED, String::new()),
            BackendError::Auth(_)
        ));
        assert!(matches!(
            GeminiBackend::classify_status(StatusCode::FORBIDDEN, String::new()),
            BackendError::Auth(_)
        ));
        assert!(matches!(
            GeminiBackend::classify_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            BackendError::RateLimited(_)
        ));
        assert!(matches!(
            GeminiBackend::classify_status(StatusCode::BAD_GATEWAY, String::new()),
            BackendError::Transport(_)
        ));
    }
}
