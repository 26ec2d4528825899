//! Per-call execution scopes
//!
//! Each classification opens a [`ClassificationScope`] that hands out the
//! chat capability and a tracing span for the duration of one call. The
//! scope is released when dropped, on every exit path.

mod provider;


pub use provider::{ChatScopeProvider, ClassificationScope, ScopeProvider};
