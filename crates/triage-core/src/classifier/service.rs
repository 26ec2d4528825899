//! Rate-limited ticket classifier

use super::outcome::ClassificationOutcome;
use super::prompt::{
    ClassificationRequest, TicketTypeResponse, build_instruction, ticket_type_response_format,
};
use super::ticket_type::{TicketType, UNKNOWN_LABEL};
use crate::error::UnifiedError;
use crate::llm::{CompletionError, complete_structured};
use crate::rate_limiter::{TokenBucket, global};
use crate::scope::{ClassificationScope, ScopeProvider};
use std::sync::Arc;
use tracing::{Instrument, debug, info, warn};

/// Classifies ticket text into a [`TicketType`].
///
/// Calls are stateless and independent; the only state shared between them
/// is the token bucket. Each call makes a single attempt against the
/// backend and never retries.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use triage_core::classifier::TicketClassifier;
/// use triage_core::config::ProviderConfig;
/// use triage_core::llm::OpenAiCompatibleProvider;
/// use triage_core::scope::ChatScopeProvider;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = OpenAiCompatibleProvider::new(ProviderConfig::default())?;
/// let scopes = ChatScopeProvider::new(Arc::new(provider));
/// let classifier = TicketClassifier::with_shared_limiter(Arc::new(scopes));
///
/// if let Some(ticket_type) = classifier.classify("I was charged twice", true).await {
///     println!("{ticket_type}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TicketClassifier {
    limiter: TokenBucket,
    scopes: Arc<dyn ScopeProvider>,
}

impl TicketClassifier {
    pub fn new(limiter: TokenBucket, scopes: Arc<dyn ScopeProvider>) -> Self {
        Self { limiter, scopes }
    }

    /// Create a classifier drawing from the process-wide token bucket
    pub fn with_shared_limiter(scopes: Arc<dyn ScopeProvider>) -> Self {
        Self::new(global::shared_limiter(), scopes)
    }

    /// The token bucket gating this classifier
    pub fn limiter(&self) -> &TokenBucket {
        &self.limiter
    }

    /// Classify `ticket_text`.
    ///
    /// With `enforce_rate_limit`, a call denied by the token bucket returns
    /// `None` without contacting the backend. `None` is also returned when
    /// the model answers "Unknown", answers with anything outside the label
    /// set, answers in the wrong shape, or the backend call fails.
    pub async fn classify(
        &self,
        ticket_text: &str,
        enforce_rate_limit: bool,
    ) -> Option<TicketType> {
        self.classify_detailed(ticket_text, enforce_rate_limit)
            .await
            .into_label()
    }

    /// Same as [`classify`](Self::classify), reporting why no label was
    /// assigned.
    pub async fn classify_detailed(
        &self,
        ticket_text: &str,
        enforce_rate_limit: bool,
    ) -> ClassificationOutcome {
        if enforce_rate_limit && !self.limiter.try_acquire() {
            debug!("Classification skipped: rate limit reached");
            return ClassificationOutcome::RateLimited;
        }

        let scope = match self.scopes.create_scope() {
            Ok(scope) => scope,
            Err(e) => {
                warn!(error = %e, "Classification skipped: could not open scope");
                return ClassificationOutcome::ScopeUnavailable;
            }
        };

        let span = scope.span().clone();
        let request = ClassificationRequest::new(ticket_text);
        classify_in_scope(&scope, request).instrument(span).await
    }
}

async fn classify_in_scope(
    scope: &ClassificationScope,
    request: ClassificationRequest<'_>,
) -> ClassificationOutcome {
    let instruction = build_instruction();
    let format = ticket_type_response_format();

    let result = complete_structured::<TicketTypeResponse>(
        scope.chat(),
        &instruction,
        request.ticket_text(),
        &format,
    )
    .await;

    let response = match result {
        Ok(response) => response,
        Err(CompletionError::Transport(e)) => {
            warn!(
                error = %e,
                retryable = e.is_retryable(),
                "Classification failed: backend call failed"
            );
            return ClassificationOutcome::BackendFailed;
        }
        Err(CompletionError::Decode(e)) => {
            warn!(error = %e, "Classification failed: response did not decode");
            return ClassificationOutcome::DecodeFailed;
        }
    };

    match TicketType::from_label(&response.ticket_type) {
        Some(ticket_type) => {
            info!(%ticket_type, "Ticket classified");
            ClassificationOutcome::Classified(ticket_type)
        }
        None if response.ticket_type == UNKNOWN_LABEL => {
            debug!("Model could not classify ticket");
            ClassificationOutcome::Unclassified
        }
        None => {
            warn!(label = %response.ticket_type, "Classification failed: unrecognized label");
            ClassificationOutcome::UnrecognizedLabel(response.ticket_type)
        }
    }
}
