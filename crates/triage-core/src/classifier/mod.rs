//! Ticket classification
//!
//! [`TicketClassifier::classify`] gates each call through the token bucket,
//! asks the chat capability for a label, and accepts the answer only if it
//! names a [`TicketType`] exactly.

mod outcome;
mod prompt;
mod service;
mod ticket_type;


pub use outcome::ClassificationOutcome;
pub use prompt::{
    ClassificationRequest, TicketTypeResponse, build_instruction, ticket_type_response_format,
};
pub use service::TicketClassifier;
pub use ticket_type::{TicketType, UNKNOWN_LABEL};
