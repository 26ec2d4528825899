//! Classification instruction and expected response shape

use super::ticket_type::{TicketType, UNKNOWN_LABEL};
use crate::llm::ResponseFormat;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Field name the model must answer with
const RESPONSE_FIELD: &str = "TicketType";

/// One classification request. Lives for a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRequest<'a> {
    ticket_text: &'a str,
}

impl<'a> ClassificationRequest<'a> {
    pub fn new(ticket_text: &'a str) -> Self {
        Self { ticket_text }
    }

    /// Ticket text exactly as the caller supplied it
    pub fn ticket_text(&self) -> &'a str {
        self.ticket_text
    }
}

/// Raw model answer: a single string field naming the chosen label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTypeResponse {
    #[serde(rename = "TicketType")]
    pub ticket_type: String,
}

fn label_names() -> impl Iterator<Item = &'static str> {
    TicketType::ALL
        .into_iter()
        .map(|ticket_type| ticket_type.as_str())
        .chain(std::iter::once(UNKNOWN_LABEL))
}

/// Build the instruction sent ahead of the ticket text.
pub fn build_instruction() -> String {
    let labels = label_names()
        .map(|label| format!("- {label}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You classify customer support tickets.\n\
         Choose exactly one ticket type for the ticket text you are given.\n\
         Valid ticket types:\n\
         {labels}\n\
         If none of the ticket types confidently applies, answer {UNKNOWN_LABEL}.\n\
         Respond only with a JSON object with a single field \"{RESPONSE_FIELD}\" \
         whose value is the chosen ticket type, for example \
         {{\"{RESPONSE_FIELD}\": \"{example}\"}}.",
        example = TicketType::Bug,
    )
}

/// JSON schema matching [`TicketTypeResponse`]
pub fn ticket_type_response_format() -> ResponseFormat {
    let labels: Vec<&str> = label_names().collect();
    ResponseFormat::json_schema(
        "ticket_type",
        json!({
            "type": "object",
            "properties": {
                RESPONSE_FIELD: {
                    "type": "string",
                    "enum": labels,
                },
            },
            "required": [RESPONSE_FIELD],
            "additionalProperties": false,
        }),
    )
}
