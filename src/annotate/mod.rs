//! CoreNLP annotation client.
//!
//! Sends one sentence per request (tokenization, sentence splitting, POS,
//! NER, and dependency parsing are all delegated to the server) and retries
//! failed requests with a fixed delay. A sentence that still has no result
//! after the last attempt is reported as [`AnnotationOutcome::Failed`] so
//! the caller can drop it and keep going.

mod protocol;

pub use protocol::{AnnotatedSentence, AnnotatedToken, CoreNlpDocument, DependencyEdge};

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AnnotatorConfig;
use crate::corpus::{sentence_text, Token};

/// Errors that end the run rather than skip a sentence.
#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("invalid annotator properties: {0}")]
    Properties(#[from] serde_json::Error),

    #[error("CoreNLP response contained no sentences")]
    EmptyResponse,
}

/// Per-attempt failure, retried up to the configured limit.
#[derive(Debug, Error)]
enum RequestError {
    #[error("connection error: {0}")]
    Connection(reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("response decode error: {0}")]
    Decode(reqwest::Error),
}

/// What became of one sentence.
#[derive(Debug)]
pub enum AnnotationOutcome {
    /// The server returned a usable annotation.
    Annotated(AnnotatedSentence),
    /// Joined text exceeded the length cap; no request was sent.
    Oversized { chars: usize },
    /// All attempts failed; the sentence is dropped from the output.
    Failed,
}

/// Client for a CoreNLP HTTP server.
pub struct AnnotatorClient {
    config: AnnotatorConfig,
    client: Client,
}

impl AnnotatorClient {
    /// Create a new client.
    ///
    /// No request timeout is set beyond the transport default; the retry
    /// count is the only bound on a slow server.
    pub fn new(config: AnnotatorConfig) -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Get the config.
    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// Check if the CoreNLP server is reachable.
    pub async fn is_available(&self) -> bool {
        match self.client.get(&self.config.endpoint).send().await {
            Ok(resp) => !resp.status().is_server_error(),
            Err(_) => false,
        }
    }

    /// Annotate one sentence, retrying per the configured policy.
    ///
    /// Only broken request options or an empty `sentences` array surface as
    /// `Err`; transport and server failures degrade to
    /// [`AnnotationOutcome::Failed`] after the retries are exhausted.
    pub async fn annotate_sentence(
        &self,
        sentence: &[Token],
    ) -> Result<AnnotationOutcome, AnnotateError> {
        let text = sentence_text(sentence);

        let chars = text.chars().count();
        if chars > self.config.max_sentence_chars {
            warn!("Sentence too long to process, skipping. Length: {}", chars);
            return Ok(AnnotationOutcome::Oversized { chars });
        }

        let properties = serde_json::to_string(&protocol::Properties {
            annotators: &self.config.annotators,
            pipeline_language: &self.config.language,
            output_format: "json",
        })?;

        let policy = self.config.retry;
        for attempt in 1..=policy.max_attempts {
            debug!(attempt, "Sending sentence to CoreNLP: {}", text);

            match self.request(&properties, &text).await {
                Ok(document) => {
                    debug!("Server response received successfully");
                    let first = document
                        .sentences
                        .into_iter()
                        .next()
                        .ok_or(AnnotateError::EmptyResponse)?;
                    return Ok(AnnotationOutcome::Annotated(first));
                }
                Err(e) => {
                    warn!(
                        "CoreNLP request failed (attempt {}/{}): {}",
                        attempt, policy.max_attempts, e
                    );
                    if attempt < policy.max_attempts {
                        tokio::time::sleep(policy.delay()).await;
                    }
                }
            }
        }

        warn!(
            "No valid response after {} attempts, dropping sentence",
            policy.max_attempts
        );
        Ok(AnnotationOutcome::Failed)
    }

    /// One POST to the server: options bundle as the `properties` query
    /// parameter, raw UTF-8 sentence text as the body.
    async fn request(&self, properties: &str, text: &str) -> Result<CoreNlpDocument, RequestError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("properties", properties)])
            .body(text.to_string())
            .send()
            .await
            .map_err(RequestError::Connection)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RequestError::Status { status, body });
        }

        response.json().await.map_err(RequestError::Decode)
    }
}
