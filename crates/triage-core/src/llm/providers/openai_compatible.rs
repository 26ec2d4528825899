//! OpenAI-compatible chat completions provider

use super::error_utils::sanitize_provider_error_text;
use crate::config::ProviderConfig;
use crate::error::{TriageError, TriageResult};
use crate::llm::capability::ChatCapability;
use crate::llm::messages::{LlmMessage, LlmResponse, ResponseFormat};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::instrument;

/// Chat capability backed by any server speaking the OpenAI
/// `/chat/completions` protocol.
///
/// The HTTP client is built once and reused; `reqwest::Client` pools
/// connections internally, so each call gets its own request without
/// sharing mutable state.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    config: ProviderConfig,
    http_client: Client,
}

impl OpenAiCompatibleProvider {
    /// Create a provider from validated configuration
    pub fn new(config: ProviderConfig) -> TriageResult<Self> {
        config.validate().map_err(|e| {
            e.with_context(format!("Validating configuration for provider '{}'", config.name))
        })?;

        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TriageError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Provider name from configuration
    pub fn name(&self) -> &str {
        &self.config.name
    }

    fn request_body(&self, messages: &[LlmMessage], format: Option<&ResponseFormat>) -> Value {
        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
        });

        if let Some(max_tokens) = self.config.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = self.config.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(format) = format {
            body["response_format"] = json!({
                "type": "json_schema",
                "json_schema": {
                    "name": format.name,
                    "schema": format.schema,
                    "strict": format.strict,
                },
            });
        }

        body
    }

    fn parse_response(&self, response: Value) -> TriageResult<LlmResponse> {
        let choice = &response["choices"][0];
        let content = choice["message"]["content"].as_str().ok_or_else(|| {
            TriageError::llm_with_provider("Response has no message content", &self.config.name)
        })?;

        Ok(LlmResponse {
            content: content.to_string(),
            model: response["model"].as_str().map(|s| s.to_string()),
            finish_reason: choice["finish_reason"].as_str().map(|s| s.to_string()),
        })
    }
}

#[async_trait]
impl ChatCapability for OpenAiCompatibleProvider {
    #[instrument(skip(self, messages, format), fields(provider = %self.config.name, model = %self.config.model), level = "debug")]
    async fn chat<'a>(
        &self,
        messages: &[LlmMessage],
        format: Option<&'a ResponseFormat>,
    ) -> TriageResult<LlmResponse> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let mut request = self
            .http_client
            .post(&url)
            .json(&self.request_body(messages, format));

        if let Some(api_key) = self.config.get_api_key() {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            TriageError::from(e).with_context(format!("{} request failed", self.config.name))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TriageError::http_status(
                format!(
                    "{} API error (status {}): {}",
                    self.config.name,
                    status,
                    sanitize_provider_error_text(&error_text)
                ),
                status.as_u16(),
            ));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            TriageError::llm_with_provider(
                format!("Failed to parse response body: {}", e),
                &self.config.name,
            )
        })?;

        self.parse_response(response_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> OpenAiCompatibleProvider {
        let config = ProviderConfig::default()
            .with_base_url("http://localhost:9")
            .with_model("test-model");
        OpenAiCompatibleProvider::new(config).unwrap()
    }

    #[test]
    fn test_request_body_includes_schema() {
        let format = ResponseFormat::json_schema("ticket_type", json!({"type": "object"}));
        let body = provider().request_body(&[LlmMessage::user("hi")], Some(&format));

        assert_eq!(body["model"], "test-model");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hi");
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "ticket_type");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
    }

    #[test]
    fn test_request_body_without_format() {
        let body = provider().request_body(&[LlmMessage::system("s")], None);
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn test_parse_response_content() {
        let response = json!({
            "model": "test-model",
            "choices": [{
                "message": {"role": "assistant", "content": "{\"TicketType\":\"Bug\"}"},
                "finish_reason": "stop"
            }]
        });
        let parsed = provider().parse_response(response).unwrap();
        assert_eq!(parsed.content, "{\"TicketType\":\"Bug\"}");
        assert_eq!(parsed.model.as_deref(), Some("test-model"));
        assert_eq!(parsed.finish_reason.as_deref(), Some("stop"));
    }

    #[test]
    fn test_parse_response_without_content() {
        let response = json!({"choices": []});
        assert!(matches!(
            provider().parse_response(response),
            Err(TriageError::Llm { .. })
        ));
    }

    #[test]
    fn test_name_comes_from_config() {
        assert_eq!(provider().name(), "openai");
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ProviderConfig::default().with_model("");
        assert!(OpenAiCompatibleProvider::new(config).is_err());
    }
}
