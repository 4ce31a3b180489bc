//! Google Gemini client for structured-output generation.
//!
//! Uses the Generative Language `generateContent` endpoint with a JSON
//! response schema.
//! See: <https://ai.google.dev/api/generate-content>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use super::traits::{SentimentProvider, StructuredRequest};
use crate::{Result, SentioError};

/// Default base URL for the Generative Language API
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Client for the Gemini API.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    ///
    /// No request timeout is applied.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, base_url, None)
    }

    /// Create a client with a custom base URL and an optional request timeout.
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| SentioError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Run one `generateContent` call and return the concatenated text parts.
    #[instrument(name = "gemini.generate", skip(self, request), fields(model = %request.model))]
    pub async fn generate(&self, request: &StructuredRequest) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request.model
        );

        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.response_schema,
            },
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SentioError::Http(e.to_string()))?;

        let response = Self::handle_response_errors(response, &request.model).await?;

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SentioError::Http(e.to_string()))?;

        Self::extract_text(result)
    }

    /// Pull the payload text out of a decoded response.
    fn extract_text(response: GenerateContentResponse) -> Result<String> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            return match response.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => Err(SentioError::ContentFiltered { reason }),
                None => Err(SentioError::EmptyResponse),
            };
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if !text.trim().is_empty() {
            return Ok(text);
        }

        match candidate.finish_reason.as_deref() {
            Some(reason @ ("SAFETY" | "BLOCKLIST" | "PROHIBITED_CONTENT")) => {
                Err(SentioError::ContentFiltered {
                    reason: reason.to_string(),
                })
            }
            _ => Err(SentioError::EmptyResponse),
        }
    }

    /// Check response status and map to appropriate error.
    async fn handle_response_errors(response: Response, model: &str) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            401 | 403 => Err(SentioError::AuthenticationFailed),
            404 => Err(SentioError::ModelNotFound(model.to_string())),
            429 => {
                // Try to parse retry-after header
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                Err(SentioError::RateLimited { retry_after })
            }
            code => {
                let message = response
                    .json::<ErrorEnvelope>()
                    .await
                    .map(|envelope| envelope.error.message)
                    .unwrap_or_else(|_| format!("Gemini API error: {status}"));
                // An invalid key is reported as 400 INVALID_ARGUMENT.
                if code == 400 && message.contains("API key") {
                    return Err(SentioError::AuthenticationFailed);
                }
                Err(SentioError::Api {
                    status: code,
                    message,
                })
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
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
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
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
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[async_trait]
impl SentimentProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_structured(&self, request: &StructuredRequest) -> Result<String> {
        GeminiClient::generate(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: Value) -> GenerateContentResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn extract_text_joins_parts() {
        let response = decode(serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "{\"items\":" }, { "text": "[]}" }] },
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(
            GeminiClient::extract_text(response).unwrap(),
            "{\"items\":[]}"
        );
    }

    #[test]
    fn extract_text_without_candidates_is_empty_response() {
        let response = decode(serde_json::json!({}));
        assert!(matches!(
            GeminiClient::extract_text(response),
            Err(SentioError::EmptyResponse)
        ));
    }

    #[test]
    fn extract_text_reports_blocked_prompt() {
        let response = decode(serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }));
        match GeminiClient::extract_text(response) {
            Err(SentioError::ContentFiltered { reason }) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected ContentFiltered, got {other:?}"),
        }
    }

    #[test]
    fn extract_text_reports_safety_stop_without_text() {
        let response = decode(serde_json::json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }));
        assert!(matches!(
            GeminiClient::extract_text(response),
            Err(SentioError::ContentFiltered { .. })
        ));
    }

    #[test]
    fn request_body_uses_camel_case() {
        let schema = serde_json::json!({ "type": "OBJECT" });
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: "sys" }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "sys");
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }
}
