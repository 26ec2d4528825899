//! Scope provider trait and the default chat-backed implementation

use crate::error::TriageResult;
use crate::llm::ChatCapability;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{Span, info_span, trace};
use uuid::Uuid;

/// Creates short-lived execution scopes for classification calls.
pub trait ScopeProvider: Send + Sync {
    /// Open a new scope owned exclusively by the caller
    fn create_scope(&self) -> TriageResult<ClassificationScope>;
}

/// A single call's execution context.
///
/// Gives access to the chat capability and the span that call logs into.
/// Dropping the scope releases it.
pub struct ClassificationScope {
    id: Uuid,
    chat: Arc<dyn ChatCapability>,
    span: Span,
    open_scopes: Option<Arc<AtomicUsize>>,
}

impl ClassificationScope {
    /// Create an untracked scope around `chat`
    pub fn new(chat: Arc<dyn ChatCapability>) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            chat,
            span: info_span!("classification", scope_id = %id),
            open_scopes: None,
        }
    }

    fn tracked(chat: Arc<dyn ChatCapability>, open_scopes: Arc<AtomicUsize>) -> Self {
        open_scopes.fetch_add(1, Ordering::SeqCst);
        let mut scope = Self::new(chat);
        scope.open_scopes = Some(open_scopes);
        scope
    }

    /// Unique id of this scope, recorded on its span
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Chat capability available to this call
    pub fn chat(&self) -> &dyn ChatCapability {
        self.chat.as_ref()
    }

    /// Span the call should log into
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl std::fmt::Debug for ClassificationScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationScope")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Drop for ClassificationScope {
    fn drop(&mut self) {
        if let Some(open_scopes) = &self.open_scopes {
            open_scopes.fetch_sub(1, Ordering::SeqCst);
        }
        trace!(parent: &self.span, scope_id = %self.id, "Scope released");
    }
}

/// Scope provider handing every scope the same chat capability.
#[derive(Clone)]
pub struct ChatScopeProvider {
    chat: Arc<dyn ChatCapability>,
    open_scopes: Arc<AtomicUsize>,
}

impl ChatScopeProvider {
    pub fn new(chat: Arc<dyn ChatCapability>) -> Self {
        Self {
            chat,
            open_scopes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of scopes created and not yet dropped
    pub fn active_scopes(&self) -> usize {
        self.open_scopes.load(Ordering::SeqCst)
    }
}

impl ScopeProvider for ChatScopeProvider {
    fn create_scope(&self) -> TriageResult<ClassificationScope> {
        let scope =
            ClassificationScope::tracked(Arc::clone(&self.chat), Arc::clone(&self.open_scopes));
        trace!(parent: scope.span(), scope_id = %scope.id(), "Scope opened");
        Ok(scope)
    }
}
