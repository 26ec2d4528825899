//! UnifiedError trait implementation for TriageError

use super::types::{TriageError, UnifiedError};

impl UnifiedError for TriageError {
    fn error_code(&self) -> &str {
        match self {
            Self::Config { .. } => "TRIAGE_CONFIG",
            Self::Llm { .. } => "TRIAGE_LLM",
            Self::Http { .. } => "TRIAGE_HTTP",
            Self::Json { .. } => "TRIAGE_JSON",
            Self::Decode { .. } => "TRIAGE_DECODE",
            Self::InvalidInput { .. } => "TRIAGE_INVALID_INPUT",
            Self::Io { .. } => "TRIAGE_IO",
            Self::Other { .. } => "TRIAGE_OTHER",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Config { message, .. }
            | Self::Llm { message, .. }
            | Self::Http { message, .. }
            | Self::Json { message, .. }
            | Self::Decode { message, .. }
            | Self::InvalidInput { message, .. }
            | Self::Io { message, .. }
            | Self::Other { message, .. } => message,
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. }
            | Self::Llm { context, .. }
            | Self::Http { context, .. }
            | Self::Json { context, .. }
            | Self::Decode { context, .. }
            | Self::InvalidInput { context, .. }
            | Self::Io { context, .. }
            | Self::Other { context, .. } => context.as_deref(),
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::Http {
                status_code: Some(code),
                ..
            } => *code == 429 || *code >= 500,
            Self::Http {
                status_code: None, ..
            } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TriageError::config("x").error_code(), "TRIAGE_CONFIG");
        assert_eq!(TriageError::decode("x").error_code(), "TRIAGE_DECODE");
        assert_eq!(
            TriageError::llm_with_provider("x", "openai").error_code(),
            "TRIAGE_LLM"
        );
    }

    #[test]
    fn test_context_is_attached() {
        let err = TriageError::json("bad payload").with_context("parsing completion");
        assert_eq!(err.message(), "bad payload");
        assert_eq!(UnifiedError::context(&err), Some("parsing completion"));
    }

    #[test]
    fn test_retryable_http_statuses() {
        assert!(TriageError::http_status("busy", 429).is_retryable());
        assert!(TriageError::http_status("down", 503).is_retryable());
        assert!(!TriageError::http_status("bad request", 400).is_retryable());
        assert!(!TriageError::decode("nope").is_retryable());
    }
}
