//! Chat capability implementations

mod error_utils;
mod openai_compatible;

pub use error_utils::sanitize_provider_error_text;
pub use openai_compatible::OpenAiCompatibleProvider;
