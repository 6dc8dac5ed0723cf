//! Backend trait and normalized request/response types.
//!
//! The [`Backend`] trait abstracts over text-generation providers. The
//! generator builds an [`LlmRequest`] per content type and hands it to
//! [`with_backoff`], which calls [`Backend::complete`] and retries transient
//! failures.
//!
//! ```text
//! ContentGenerator ──► LlmRequest ──► with_backoff ──► Backend::complete() ──► LlmResponse
//!                                                             │
//!                                                  ┌──────────┴──────────┐
//!                                             OllamaBackend         MockBackend
//!                                            /api/generate        canned responses
//! ```

pub mod backoff;
pub mod mock;
pub mod ollama;

pub use backoff::BackoffConfig;
pub use mock::MockBackend;
pub use ollama::OllamaBackend;

use crate::client::LlmConfig;
use crate::error::{ContentError, Result};
use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use std::sync::Arc;

/// A normalized generation request.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// Model identifier (e.g. `"llama3.2:3b"`).
    pub model: String,

    /// The rendered prompt text.
    pub prompt: String,

    /// Sampling configuration (temperature, max_tokens, json_mode).
    pub config: LlmConfig,
}

/// A normalized generation response.
#[derive(Debug)]
pub struct LlmResponse {
    /// The generated text content.
    pub text: String,

    /// HTTP status code (for diagnostics/logging).
    pub status: u16,

    /// Provider-specific metadata (token counts, timing, model info).
    pub metadata: Option<serde_json::Value>,
}

/// Abstraction over text-generation providers.
///
/// This trait is object-safe and designed to be used as `Arc<dyn Backend>`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Execute a non-streaming completion.
    async fn complete(
        &self,
        client: &Client,
        base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// Check whether a [`ContentError`] is retryable based on the backoff config.
///
/// Retryable conditions:
/// - [`ContentError::HttpError`] with a status in `config.retryable_statuses`
/// - [`ContentError::Request`] (connection/transport errors)
pub fn is_retryable(error: &ContentError, config: &BackoffConfig) -> bool {
    match error {
        ContentError::HttpError { status, .. } => config.retryable_statuses.contains(status),
        ContentError::Request(_) => true,
        _ => false,
    }
}

/// Execute a backend call with transport-level retry and exponential backoff.
///
/// Returns the first successful response, or the last error once retries
/// are exhausted or the error is not retryable.
pub async fn with_backoff(
    backend: &Arc<dyn Backend>,
    client: &Client,
    base_url: &str,
    request: &LlmRequest,
    config: &BackoffConfig,
) -> Result<LlmResponse> {
    let mut last_error: Option<ContentError> = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            let delay = match &last_error {
                Some(ContentError::HttpError {
                    retry_after: Some(ra),
                    ..
                }) if config.respect_retry_after => *ra,
                _ => config.delay_for_attempt(attempt - 1),
            };
            let reason = last_error
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_default();
            warn!(
                "{} request failed ({reason}), retry {attempt}/{} in {delay:?}",
                backend.name(),
                config.max_retries
            );
            tokio::time::sleep(delay).await;
        }

        match backend.complete(client, base_url, request).await {
            Ok(response) => return Ok(response),
            Err(e) => {
                if attempt < config.max_retries && is_retryable(&e, config) {
                    last_error = Some(e);
                    continue;
                }
                return Err(e);
            }
        }
    }

    Err(last_error.unwrap_or(ContentError::Other(
        "backoff loop exited unexpectedly".into(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Fails with the given status a fixed number of times, then succeeds.
    struct Flaky {
        failures: usize,
        status: u16,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Backend for Flaky {
        async fn complete(
            &self,
            _client: &Client,
            _base_url: &str,
            _request: &LlmRequest,
        ) -> Result<LlmResponse> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(ContentError::HttpError {
                    status: self.status,
                    body: "busy".into(),
                    retry_after: Some(Duration::from_millis(1)),
                });
            }
            Ok(LlmResponse {
                text: "ok".into(),
                status: 200,
                metadata: None,
            })
        }

        fn name(&self) -> &'static str {
            "flaky"
        }
    }

    fn request() -> LlmRequest {
        LlmRequest {
            model: "test".into(),
            prompt: "test".into(),
            config: LlmConfig::default(),
        }
    }

    fn fast_retries(max_retries: u32) -> BackoffConfig {
        BackoffConfig {
            max_retries,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            ..BackoffConfig::standard()
        }
    }

    #[test]
    fn test_is_retryable_429() {
        let config = BackoffConfig::standard();
        let err = ContentError::HttpError {
            status: 429,
            body: "rate limited".into(),
            retry_after: None,
        };
        assert!(is_retryable(&err, &config));
    }

    #[test]
    fn test_is_retryable_400_not_retried() {
        let config = BackoffConfig::standard();
        let err = ContentError::HttpError {
            status: 400,
            body: "bad request".into(),
            retry_after: None,
        };
        assert!(!is_retryable(&err, &config));
    }

    #[test]
    fn test_is_retryable_other_error_not_retried() {
        let config = BackoffConfig::standard();
        assert!(!is_retryable(&ContentError::Other("some error".into()), &config));
        assert!(!is_retryable(&ContentError::InvalidConfig("x".into()), &config));
    }

    #[tokio::test]
    async fn test_backoff_recovers_from_transient_error() {
        let flaky = Arc::new(Flaky {
            failures: 2,
            status: 503,
            calls: AtomicUsize::new(0),
        });
        let backend: Arc<dyn Backend> = flaky.clone();
        let client = Client::new();
        let resp = with_backoff(&backend, &client, "http://unused", &request(), &fast_retries(3))
            .await
            .unwrap();
        assert_eq!(resp.text, "ok");
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_backoff_gives_up_after_max_retries() {
        let flaky = Arc::new(Flaky {
            failures: 10,
            status: 503,
            calls: AtomicUsize::new(0),
        });
        let backend: Arc<dyn Backend> = flaky.clone();
        let client = Client::new();
        let err = with_backoff(&backend, &client, "http://unused", &request(), &fast_retries(2))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::HttpError { status: 503, .. }));
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_backoff_does_not_retry_client_errors() {
        let flaky = Arc::new(Flaky {
            failures: 1,
            status: 400,
            calls: AtomicUsize::new(0),
        });
        let backend: Arc<dyn Backend> = flaky.clone();
        let client = Client::new();
        let result =
            with_backoff(&backend, &client, "http://unused", &request(), &fast_retries(3)).await;
        assert!(result.is_err());
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 1);
    }
}
