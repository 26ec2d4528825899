//! Error types for Triage
//!
//! Every fallible operation in the workspace returns [`TriageResult`]. Errors
//! carry an optional context string describing where the failure happened,
//! and implement [`UnifiedError`] so callers can branch on a stable code.

mod constructors;
mod conversions;
mod types;
mod unified_error;

pub use types::{TriageError, TriageResult, UnifiedError};
