//! GeminiChatGateway - Direct REST API implementation of the model gateway.
//!
//! Calls the Gemini `generateContent` REST endpoint. Configuration priority:
//! ~/.config/placechat/secret.json > environment variables.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use placechat_core::gateway::{GatewayError, ModelGateway, MODEL_CALL_TIMEOUT};

use crate::config;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gateway implementation that talks to the Gemini HTTP API.
///
/// The reqwest client carries the single-call timeout; a request exceeding it
/// surfaces as [`GatewayError::Timeout`] and the caller degrades to the rule
/// fallback. No retries happen here.
#[derive(Clone)]
pub struct GeminiChatGateway {
    client: Client,
    api_key: String,
    model: String,
    system_instruction: Option<String>,
}

impl GeminiChatGateway {
    /// Creates a new gateway with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(MODEL_CALL_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            system_instruction: None,
        }
    }

    /// Loads configuration from secret.json or the `GEMINI_API_KEY`
    /// environment variable.
    ///
    /// Model name defaults to `gemini-2.5-flash` if not specified.
    pub fn try_from_env() -> Result<Self, GatewayError> {
        let api_key = config::resolve_gemini_api_key().ok_or_else(|| {
            GatewayError::Unavailable(
                "GEMINI_API_KEY not found in ~/.config/placechat/secret.json or environment variables"
                    .into(),
            )
        })?;

        let model = config::load_secret_config()
            .ok()
            .and_then(|c| c.gemini)
            .and_then(|g| g.model_name)
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into());

        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Adds a system instruction that will be sent alongside every request.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, GatewayError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        tracing::debug!(model = %self.model, "sending generateContent request");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    GatewayError::Timeout(MODEL_CALL_TIMEOUT)
                } else {
                    GatewayError::Upstream {
                        status: None,
                        message: format!("Gemini API request failed: {err}"),
                    }
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            GatewayError::Upstream {
                status: None,
                message: format!("Failed to parse Gemini response: {err}"),
            }
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ModelGateway for GeminiChatGateway {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::Upstream {
                status: None,
                message: "Gemini prompt must not be empty".into(),
            });
        }

        let contents = vec![Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: trimmed.to_string(),
            }],
        }];

        let system_instruction = self.system_instruction.as_ref().map(|text| Content {
            role: "system".to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        });

        let request = GenerateContentRequest {
            contents,
            system_instruction,
        };
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String, GatewayError> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| GatewayError::Upstream {
            status: None,
            message: "Gemini API returned no text in the response candidates".into(),
        })
}

fn map_http_error(status: StatusCode, body: String) -> GatewayError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    if status == StatusCode::GATEWAY_TIMEOUT {
        return GatewayError::Timeout(MODEL_CALL_TIMEOUT);
    }

    GatewayError::Upstream {
        status: Some(status.as_u16()),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: "find sushi".to_string(),
                }],
            }],
            system_instruction: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "find sushi");
        assert!(json.get("system_instruction").is_none());
    }

    #[test]
    fn test_extract_text_response() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"message\": \"hi\"}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(
            extract_text_response(response).unwrap(),
            r#"{"message": "hi"}"#
        );
    }

    #[test]
    fn test_extract_empty_candidates_is_upstream_error() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(
            extract_text_response(response),
            Err(GatewayError::Upstream { .. })
        ));
    }

    #[test]
    fn test_map_http_error_decodes_error_body() {
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#
                .to_string(),
        );
        match err {
            GatewayError::Upstream { status, message } => {
                assert_eq!(status, Some(429));
                assert!(message.contains("RESOURCE_EXHAUSTED"));
                assert!(message.contains("Quota exceeded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_gateway_timeout_status_maps_to_timeout() {
        let err = map_http_error(StatusCode::GATEWAY_TIMEOUT, "timeout".to_string());
        assert!(matches!(err, GatewayError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected_without_network_call() {
        let gateway = GeminiChatGateway::new("test-key", DEFAULT_GEMINI_MODEL);
        let err = gateway.generate("   ").await.unwrap_err();
        assert!(matches!(err, GatewayError::Upstream { status: None, .. }));
    }
}
