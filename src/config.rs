//! Converter configuration.
//!
//! Defaults reproduce the canonical conversion run: a local CoreNLP server,
//! three retries with a fixed two-second delay, and the train/dev/test
//! splits under `dataset/`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Corpus splits processed on a full run, in order.
pub const SPLIT_NAMES: [&str; 3] = ["train", "dev", "test"];

/// Retry policy for annotation requests: a fixed number of attempts with a
/// fixed delay between them. No backoff, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay between attempts, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    2000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_retry_delay_ms(),
        }
    }
}

impl RetryPolicy {
    /// Delay between attempts as a [`Duration`].
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Configuration for the CoreNLP annotation client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatorConfig {
    /// CoreNLP server base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Annotators requested from the server
    #[serde(default = "default_annotators")]
    pub annotators: String,
    /// Pipeline language code
    #[serde(default = "default_language")]
    pub language: String,
    /// Sentences whose joined text exceeds this many characters are skipped
    /// without contacting the server
    #[serde(default = "default_max_sentence_chars")]
    pub max_sentence_chars: usize,
    /// Retry policy for failed requests
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_endpoint() -> String {
    "http://localhost:9000".to_string()
}

fn default_annotators() -> String {
    "tokenize,ssplit,pos,ner,depparse".to_string()
}

fn default_language() -> String {
    "zh".to_string()
}

fn default_max_sentence_chars() -> usize {
    100_000
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl AnnotatorConfig {
    /// Base default without env overrides (used internally to avoid recursion).
    fn base_default() -> Self {
        Self {
            endpoint: default_endpoint(),
            annotators: default_annotators(),
            language: default_language(),
            max_sentence_chars: default_max_sentence_chars(),
            retry: RetryPolicy::default(),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `CORENLP_ENDPOINT`: server base URL
    /// - `CORENLP_ANNOTATORS`: comma-separated annotator list
    /// - `CORENLP_LANGUAGE`: pipeline language code
    /// - `CORENLP_MAX_SENTENCE_CHARS`: oversized-sentence cutoff
    /// - `CORENLP_MAX_ATTEMPTS`: retry attempt count
    /// - `CORENLP_RETRY_DELAY_MS`: delay between attempts
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("CORENLP_ENDPOINT") {
            self.endpoint = val;
        }
        if let Ok(val) = std::env::var("CORENLP_ANNOTATORS") {
            self.annotators = val;
        }
        if let Ok(val) = std::env::var("CORENLP_LANGUAGE") {
            self.language = val;
        }
        if let Ok(val) = std::env::var("CORENLP_MAX_SENTENCE_CHARS") {
            if let Ok(n) = val.parse() {
                self.max_sentence_chars = n;
            }
        }
        if let Ok(val) = std::env::var("CORENLP_MAX_ATTEMPTS") {
            if let Ok(n) = val.parse() {
                self.retry.max_attempts = n;
            }
        }
        if let Ok(val) = std::env::var("CORENLP_RETRY_DELAY_MS") {
            if let Ok(n) = val.parse() {
                self.retry.delay_ms = n;
            }
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Input/output path pair for one corpus split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub name: String,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Split {
    /// Path pair for a named split under the dataset directory:
    /// `<dir>/<name>.conll` in, `<dir>/<name>.sd.conllx` out.
    pub fn in_dir(dataset_dir: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            input: dataset_dir.join(format!("{name}.conll")),
            output: dataset_dir.join(format!("{name}.sd.conllx")),
        }
    }
}

/// The fixed train/dev/test split sequence under a dataset directory.
pub fn corpus_splits(dataset_dir: &Path) -> Vec<Split> {
    SPLIT_NAMES
        .iter()
        .map(|name| Split::in_dir(dataset_dir, name))
        .collect()
}
