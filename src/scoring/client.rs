//! Client for the hosted sentence-similarity endpoint.
//!
//! The endpoint answers 503 while the model is still loading; that is the
//! only status worth retrying. Everything else, including transport
//! failures, is reported immediately.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MatchError, Result};
use crate::scoring::SimilarityScorer;

/// Hosted model endpoint used in production deployments.
pub const BGE_M3_API_URL: &str = "https://api-inference.huggingface.co/models/BAAI/bge-m3";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ATTEMPTS: u32 = 5;
const RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
struct SimilarityRequest<'a> {
    inputs: SimilarityInputs<'a>,
}

#[derive(Debug, Serialize)]
struct SimilarityInputs<'a> {
    source_sentence: &'a str,
    sentences: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    error: String,
}

/// Sentence-similarity scorer backed by an HTTP inference endpoint.
#[derive(Clone)]
pub struct SimilarityClient {
    client: Client,
    api_url: String,
    api_token: String,
    max_attempts: u32,
    retry_delay: Duration,
}

impl SimilarityClient {
    /// `api_url` is the model endpoint ([`BGE_M3_API_URL`] in production),
    /// `api_token` the bearer token for it.
    pub fn new(api_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_url: api_url.into(),
            api_token: api_token.into(),
            max_attempts: MAX_ATTEMPTS,
            retry_delay: RETRY_DELAY,
        }
    }

    /// Overrides the retry ceiling, clamped to at least one attempt.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Overrides the fixed delay slept between attempts.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }
}

#[async_trait]
impl SimilarityScorer for SimilarityClient {
    async fn score(&self, source: &str, sentences: &[String]) -> Result<Vec<f64>> {
        let request_body = SimilarityRequest {
            inputs: SimilarityInputs {
                source_sentence: source,
                sentences,
            },
        };

        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                warn!(
                    "similarity model still loading (attempt {}/{}), retrying after {}ms...",
                    attempt - 1,
                    self.max_attempts,
                    self.retry_delay.as_millis()
                );
                tokio::time::sleep(self.retry_delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .header("Authorization", format!("Bearer {}", self.api_token))
                .json(&request_body)
                .send()
                .await?;

            let status = response.status();

            if status.as_u16() == 503 {
                let body = response.text().await.unwrap_or_default();
                debug!("similarity service warming up: {}", error_message(&body));
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(MatchError::ScoringRequest {
                    status: status.as_u16(),
                    message: error_message(&body),
                });
            }

            let scores: Vec<f64> = response.json().await?;
            debug!(
                "similarity call succeeded: {} score(s) on attempt {}",
                scores.len(),
                attempt
            );
            return Ok(scores);
        }

        Err(MatchError::ScoringUnavailable {
            attempts: self.max_attempts,
        })
    }
}

/// Pulls the message out of the service's `{"error": ...}` failure body,
/// falling back to the raw body when it has some other shape.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ServiceError>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.trim().to_string())
}
