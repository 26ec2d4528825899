//! The closed set of ticket labels

use crate::error::TriageError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Label the model uses when no ticket type confidently applies.
///
/// Deliberately not a [`TicketType`] variant.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Ticket type labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketType {
    /// Something is broken or behaves incorrectly
    Bug,
    /// Request for new functionality
    FeatureRequest,
    /// How-to or general usage question
    Question,
    /// Invoices, payments, plans and refunds
    Billing,
    /// Login, password and permission problems
    AccountAccess,
    /// Slowness, timeouts and resource usage
    Performance,
    /// Missing or wrong documentation
    Documentation,
}

impl TicketType {
    /// Every label, in declaration order
    pub const ALL: [TicketType; 7] = [
        TicketType::Bug,
        TicketType::FeatureRequest,
        TicketType::Question,
        TicketType::Billing,
        TicketType::AccountAccess,
        TicketType::Performance,
        TicketType::Documentation,
    ];

    /// Label string, identical to the variant name
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Bug => "Bug",
            TicketType::FeatureRequest => "FeatureRequest",
            TicketType::Question => "Question",
            TicketType::Billing => "Billing",
            TicketType::AccountAccess => "AccountAccess",
            TicketType::Performance => "Performance",
            TicketType::Documentation => "Documentation",
        }
    }

    /// Exact, case-sensitive lookup of a label.
    ///
    /// No trimming or normalisation is applied. [`UNKNOWN_LABEL`] and any
    /// other string outside the set yield `None`.
    pub fn from_label(label: &str) -> Option<TicketType> {
        match label {
            "Bug" => Some(TicketType::Bug),
            "FeatureRequest" => Some(TicketType::FeatureRequest),
            "Question" => Some(TicketType::Question),
            "Billing" => Some(TicketType::Billing),
            "AccountAccess" => Some(TicketType::AccountAccess),
            "Performance" => Some(TicketType::Performance),
            "Documentation" => Some(TicketType::Documentation),
            _ => None,
        }
    }
}

impl std::fmt::Display for TicketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketType {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| {
            TriageError::invalid_field("ticket_type", format!("'{}' is not a ticket type", s))
        })
    }
}
