//! Integration tests for rate-limited classification
//!
//! Exercises the public API end to end with an in-process chat capability.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use triage_core::{
    ChatCapability, ChatScopeProvider, RateLimitConfig, TicketClassifier, TicketType,
    TokenBucket, TriageError, TriageResult,
    llm::{LlmMessage, LlmResponse, ResponseFormat},
};

/// Chat capability that always gives the same answer and counts calls
struct FixedAnswer {
    answer: TriageResult<String>,
    calls: AtomicUsize,
    delay: Duration,
}

impl FixedAnswer {
    fn ok(content: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(content.to_string()),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        })
    }

    fn slow(content: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(content.to_string()),
            calls: AtomicUsize::new(0),
            delay,
        })
    }

    fn failing(error: TriageError) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(error),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatCapability for FixedAnswer {
    async fn chat<'a>(
        &self,
        _messages: &[LlmMessage],
        _format: Option<&'a ResponseFormat>,
    ) -> TriageResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.answer.clone().map(LlmResponse::from_content)
    }
}

fn fresh_bucket(tokens: u32) -> TokenBucket {
    let config = RateLimitConfig::default().with_auto_replenish(false);
    TokenBucket::with_initial_tokens(config, tokens)
}

fn setup(chat: Arc<FixedAnswer>, limiter: TokenBucket) -> (TicketClassifier, ChatScopeProvider) {
    let scopes = ChatScopeProvider::new(chat);
    (TicketClassifier::new(limiter, Arc::new(scopes.clone())), scopes)
}

#[tokio::test]
async fn test_classifies_with_full_bucket() {
    let chat = FixedAnswer::ok(r#"{"TicketType":"Performance"}"#);
    let (classifier, _) = setup(chat.clone(), TokenBucket::default());

    let result = classifier
        .classify("The dashboard takes 40 seconds to load", true)
        .await;

    assert_eq!(result, Some(TicketType::Performance));
    assert_eq!(chat.calls(), 1);
}

#[tokio::test]
async fn test_denied_call_never_reaches_backend() {
    let chat = FixedAnswer::ok(r#"{"TicketType":"Bug"}"#);
    let (classifier, _) = setup(chat.clone(), fresh_bucket(0));

    assert_eq!(classifier.classify("crash", true).await, None);
    assert_eq!(chat.calls(), 0);
}

#[tokio::test]
async fn test_unknown_without_rate_limit() {
    let chat = FixedAnswer::ok(r#"{"TicketType":"Unknown"}"#);
    let (classifier, _) = setup(chat.clone(), TokenBucket::default());

    assert_eq!(classifier.classify("asdf", false).await, None);
    assert_eq!(chat.calls(), 1);
    assert_eq!(classifier.limiter().available_tokens(), 100);
}

#[tokio::test]
async fn test_backend_error_is_absorbed() {
    let chat = FixedAnswer::failing(TriageError::llm("model overloaded"));
    let (classifier, scopes) = setup(chat.clone(), TokenBucket::default());

    assert_eq!(classifier.classify("ticket", true).await, None);
    assert_eq!(chat.calls(), 1);
    assert_eq!(scopes.active_scopes(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_150_concurrent_calls_admit_exactly_100() {
    let chat = FixedAnswer::slow(r#"{"TicketType":"Question"}"#, Duration::from_millis(20));
    let (classifier, scopes) = setup(chat.clone(), fresh_bucket(100));

    let tasks: Vec<_> = (0..150)
        .map(|i| {
            let classifier = classifier.clone();
            tokio::spawn(async move {
                classifier.classify(&format!("how do I {i}?"), true).await
            })
        })
        .collect();

    let results = futures::future::join_all(tasks).await;
    let labelled = results
        .into_iter()
        .map(|r| r.expect("task panicked"))
        .filter(Option::is_some)
        .count();

    assert_eq!(labelled, 100);
    assert_eq!(chat.calls(), 100);
    assert_eq!(classifier.limiter().statistics().denied, 50);
    assert_eq!(scopes.active_scopes(), 0);
}

#[tokio::test]
async fn test_cancelled_call_releases_scope() {
    let chat = FixedAnswer::slow(r#"{"TicketType":"Bug"}"#, Duration::from_secs(30));
    let (classifier, scopes) = setup(chat.clone(), TokenBucket::default());

    let result = tokio::time::timeout(
        Duration::from_millis(50),
        classifier.classify("slow ticket", true),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(chat.calls(), 1);
    assert_eq!(scopes.active_scopes(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_bucket_refills_between_bursts() {
    let chat = FixedAnswer::ok(r#"{"TicketType":"Billing"}"#);
    let limiter = TokenBucket::with_initial_tokens(RateLimitConfig::default(), 0);
    let (classifier, _) = setup(chat.clone(), limiter);

    assert_eq!(classifier.classify("refund", true).await, None);

    tokio::time::advance(Duration::from_secs(10)).await;
    for _ in 0..5 {
        assert_eq!(
            classifier.classify("refund", true).await,
            Some(TicketType::Billing)
        );
    }
    assert_eq!(classifier.classify("refund", true).await, None);
    assert_eq!(chat.calls(), 5);
}
