//! Diagnostic outcome of a classification attempt

use super::ticket_type::TicketType;

/// What happened during one classification call.
///
/// Every variant except [`Classified`](Self::Classified) collapses to
/// `None` through [`TicketClassifier::classify`](super::TicketClassifier::classify);
/// the distinction exists for logs and diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationOutcome {
    /// The model chose a known label
    Classified(TicketType),
    /// The model answered "Unknown"
    Unclassified,
    /// The model answered with a label outside the set
    UnrecognizedLabel(String),
    /// The model's answer did not match the expected shape
    DecodeFailed,
    /// The chat capability call failed
    BackendFailed,
    /// The token bucket denied the call
    RateLimited,
    /// No execution scope could be opened
    ScopeUnavailable,
}

impl ClassificationOutcome {
    /// The label, if one was assigned
    pub fn label(&self) -> Option<TicketType> {
        match self {
            Self::Classified(ticket_type) => Some(*ticket_type),
            _ => None,
        }
    }

    /// Convert to the caller-facing result
    pub fn into_label(self) -> Option<TicketType> {
        self.label()
    }

    /// Short machine-friendly reason
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Classified(_) => "classified",
            Self::Unclassified => "unknown",
            Self::UnrecognizedLabel(_) => "unrecognized_label",
            Self::DecodeFailed => "decode_failed",
            Self::BackendFailed => "backend_failed",
            Self::RateLimited => "rate_limited",
            Self::ScopeUnavailable => "scope_unavailable",
        }
    }
}

impl std::fmt::Display for ClassificationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classified(ticket_type) => write!(f, "{}", ticket_type),
            Self::UnrecognizedLabel(label) => write!(f, "unrecognized label '{}'", label),
            other => f.write_str(other.reason()),
        }
    }
}
