//! The chat capability trait

use crate::error::TriageResult;
use crate::llm::messages::{LlmMessage, LlmResponse, ResponseFormat};
use async_trait::async_trait;

/// Anything that can answer a chat completion request.
///
/// When `format` is given, the implementation should ask the backend to
/// answer with JSON matching the schema. Decoding the answer is left to the
/// caller (see [`complete_structured`](super::complete_structured)).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCapability: Send + Sync {
    /// Send a chat completion request
    async fn chat<'a>(
        &self,
        messages: &[LlmMessage],
        format: Option<&'a ResponseFormat>,
    ) -> TriageResult<LlmResponse>;
}
