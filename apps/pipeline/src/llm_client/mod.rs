//! LLM Client — the single point of entry for all model-backend calls.
//!
//! ARCHITECTURAL RULE: no other module may talk to the chat-completions API
//! directly. Drivers receive a `&dyn ChatBackend` constructed once in `main`,
//! so tests can substitute a scripted fake without touching driver code.
//!
//! Every request runs in structured-output mode: the full message history is
//! sent together with a JSON-schema constraint, at temperature 0, under a
//! fixed 10-second timeout. There are no internal retries; failures are
//! returned to the caller, which decides whether to skip or abandon the unit.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod conversation;
pub mod schema;

use crate::config::Config;
use self::conversation::Message;
use self::schema::ResponseSchema;

const REQUEST_TIMEOUT_SECS: u64 = 10;
/// Deterministic sampling for all structured-output calls.
const TEMPERATURE: f32 = 0.0;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// The seam between drivers and the model backend.
///
/// `complete` sends an ordered message history plus a schema constraint and
/// returns the assistant's raw content payload: a JSON string the caller
/// parses against its own result shape (the wire envelope double-encodes it).
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(
        &self,
        messages: &[Message],
        schema: &ResponseSchema,
    ) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (OpenAI chat-completions)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    description: &'a str,
    schema: &'a Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Production client
// ────────────────────────────────────────────────────────────────────────────

/// Client for any OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key: config.openai_api_key.clone(),
            endpoint: format!(
                "{}/chat/completions",
                config.openai_base_url.trim_end_matches('/')
            ),
            model: config.openai_model.clone(),
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAiClient {
    async fn complete(
        &self,
        messages: &[Message],
        schema: &ResponseSchema,
    ) -> Result<String, LlmError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: &schema.name,
                    description: &schema.description,
                    schema: &schema.schema,
                    strict: true,
                },
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: extract_api_error(&body),
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls the human-readable message out of an API error body.
/// Falls back to the raw body when it is not the standard error envelope.
fn extract_api_error(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Test support
// ────────────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_api_error_standard_envelope() {
        let body = r#"{"error": {"message": "Invalid schema name", "type": "invalid_request_error"}}"#;
        assert_eq!(extract_api_error(body), "Invalid schema name");
    }

    #[test]
    fn test_extract_api_error_falls_back_to_raw_body() {
        let body = "<html>502 Bad Gateway</html>";
        assert_eq!(extract_api_error(body), body);
    }

    #[test]
    fn test_request_serializes_schema_constraint() {
        let schema = ResponseSchema {
            name: "test_shape".to_string(),
            description: "a test shape".to_string(),
            schema: serde_json::json!({"type": "object"}),
        };
        let request = ChatCompletionRequest {
            model: "gpt-4o",
            messages: &[],
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: &schema.name,
                    description: &schema.description,
                    schema: &schema.schema,
                    strict: true,
                },
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["temperature"], 0.0);
        assert_eq!(value["response_format"]["type"], "json_schema");
        assert_eq!(value["response_format"]["json_schema"]["name"], "test_shape");
        assert_eq!(value["response_format"]["json_schema"]["strict"], true);
    }
}
