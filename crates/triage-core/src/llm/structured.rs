//! Structured completions decoded into typed values

use crate::error::{TriageError, TriageResult};
use crate::llm::capability::ChatCapability;
use crate::llm::messages::{LlmMessage, ResponseFormat};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

const MAX_SNIPPET_CHARS: usize = 200;

/// Why a structured completion produced no value
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The backend call itself failed
    #[error("chat request failed: {0}")]
    Transport(#[source] TriageError),
    /// The backend answered, but not in the expected shape
    #[error("response did not match the expected shape: {0}")]
    Decode(#[source] TriageError),
}

/// Ask `chat` to follow `instruction` on `input` and decode the answer as `T`.
///
/// The instruction is sent as the system message and the input, untouched,
/// as the user message.
pub async fn complete_structured<T: DeserializeOwned>(
    chat: &dyn ChatCapability,
    instruction: &str,
    input: &str,
    format: &ResponseFormat,
) -> Result<T, CompletionError> {
    let messages = [LlmMessage::system(instruction), LlmMessage::user(input)];

    let response = chat
        .chat(&messages, Some(format))
        .await
        .map_err(CompletionError::Transport)?;

    debug!(
        model = response.model.as_deref().unwrap_or("unknown"),
        finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
        "Structured completion received"
    );

    decode_structured(&response.content).map_err(CompletionError::Decode)
}

/// Decode a model answer into `T`.
///
/// Accepts a bare JSON document, optionally surrounded by whitespace or
/// wrapped in a Markdown code fence. Anything else is a decode error.
pub fn decode_structured<T: DeserializeOwned>(content: &str) -> TriageResult<T> {
    let body = strip_code_fence(content.trim());

    serde_json::from_str(body).map_err(|e| {
        TriageError::decode(e.to_string())
            .with_context(format!("model answered: {}", snippet(content)))
    })
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return content;
    };

    // Skip the info string ("json") on the opening fence line
    match rest.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => rest.trim(),
    }
}

fn snippet(content: &str) -> String {
    let mut out: String = content.chars().take(MAX_SNIPPET_CHARS).collect();
    if content.chars().count() > MAX_SNIPPET_CHARS {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::capability::MockChatCapability;
    use crate::llm::messages::{LlmResponse, MessageRole};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Answer {
        label: String,
    }

    fn format() -> ResponseFormat {
        ResponseFormat::json_schema("answer", json!({"type": "object"}))
    }

    #[test]
    fn test_decode_plain_json() {
        let answer: Answer = decode_structured(r#"{"label":"a"}"#).unwrap();
        assert_eq!(answer.label, "a");
    }

    #[test]
    fn test_decode_fenced_json() {
        let fenced = "```json\n{\"label\": \"b\"}\n```";
        let answer: Answer = decode_structured(fenced).unwrap();
        assert_eq!(answer.label, "b");

        let bare_fence = "  ```\n{\"label\": \"c\"}\n```  ";
        let answer: Answer = decode_structured(bare_fence).unwrap();
        assert_eq!(answer.label, "c");
    }

    #[test]
    fn test_decode_rejects_prose() {
        let result: TriageResult<Answer> = decode_structured("The label is a.");
        assert!(matches!(result, Err(TriageError::Decode { .. })));
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        let result: TriageResult<Answer> = decode_structured(r#"{"other":"a"}"#);
        assert!(matches!(result, Err(TriageError::Decode { .. })));
    }

    #[test]
    fn test_decode_rejects_wrong_type() {
        let result: TriageResult<Answer> = decode_structured(r#"{"label": 3}"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_complete_structured_sends_instruction_and_input() {
        let mut chat = MockChatCapability::new();
        chat.expect_chat()
            .withf(|messages, format| {
                messages.len() == 2
                    && messages[0].role == MessageRole::System
                    && messages[0].content == "pick one"
                    && messages[1].role == MessageRole::User
                    && messages[1].content == "  raw input  "
                    && format.is_some_and(|f| f.name == "answer")
            })
            .times(1)
            .returning(|_, _| Ok(LlmResponse::from_content(r#"{"label":"x"}"#)));

        let answer: Answer = complete_structured(&chat, "pick one", "  raw input  ", &format())
            .await
            .unwrap();
        assert_eq!(answer, Answer { label: "x".into() });
    }

    #[tokio::test]
    async fn test_complete_structured_separates_transport_from_decode() {
        let mut chat = MockChatCapability::new();
        chat.expect_chat()
            .returning(|_, _| Err(TriageError::llm("connection reset")));
        let result: Result<Answer, _> = complete_structured(&chat, "i", "t", &format()).await;
        assert!(matches!(result, Err(CompletionError::Transport(_))));

        let mut chat = MockChatCapability::new();
        chat.expect_chat()
            .returning(|_, _| Ok(LlmResponse::from_content("not json")));
        let result: Result<Answer, _> = complete_structured(&chat, "i", "t", &format()).await;
        assert!(matches!(result, Err(CompletionError::Decode(_))));
    }
}
