//! Chat capability used by the classifier
//!
//! The classifier only needs "send an instruction and some text, get back a
//! structured answer". [`ChatCapability`] is that seam; providers implement
//! it and [`complete_structured`] turns raw completions into typed values.

pub mod capability;
pub mod messages;
pub mod providers;
pub mod structured;

pub use capability::ChatCapability;
pub use messages::{LlmMessage, LlmResponse, MessageRole, ResponseFormat};
pub use providers::OpenAiCompatibleProvider;
pub use structured::{CompletionError, complete_structured, decode_structured};

#[cfg(test)]
pub use capability::MockChatCapability;
