//! Split conversion pipeline.
//!
//! Reads a corpus split, annotates its sentences one at a time, and appends
//! CoNLL-X blocks to the output file as they complete. Separated from UI
//! concerns - emits events for progress tracking.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;

use crate::annotate::{AnnotateError, AnnotationOutcome, AnnotatorClient};
use crate::conllx::{self, TranscodeError};
use crate::corpus::{self, CorpusError};

/// Events emitted during split conversion.
/// Fields are populated when events are created, even if consumers don't read all of them.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum ConvertEvent {
    /// Conversion of a split started
    Started { total_sentences: usize },
    /// One sentence was annotated and written
    SentenceWritten { index: usize },
    /// One sentence was skipped without a request (over the length cap)
    SentenceOversized { index: usize, chars: usize },
    /// One sentence was dropped after exhausting retries
    SentenceFailed { index: usize },
    /// Conversion of a split finished
    Complete { report: SplitReport },
}

/// Per-split outcome counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitReport {
    pub sentences: usize,
    pub annotated: usize,
    pub oversized: usize,
    pub failed: usize,
}

/// Errors that abort a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Annotate(#[from] AnnotateError),

    #[error(transparent)]
    Transcode(#[from] TranscodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convert one corpus split.
///
/// Sentences are processed strictly in sequence; each request (with all its
/// retries) completes before the next begins. The output file stays open for
/// the whole split and is written incrementally, so an interrupted run
/// leaves a prefix of the output behind.
pub async fn convert_split(
    client: &AnnotatorClient,
    input: &Path,
    output: &Path,
    event_tx: mpsc::Sender<ConvertEvent>,
) -> Result<SplitReport, ConvertError> {
    let sentences = corpus::read_corpus(input)?;
    info!(
        "Read {} sentences from {}",
        sentences.len(),
        input.display()
    );

    let _ = event_tx
        .send(ConvertEvent::Started {
            total_sentences: sentences.len(),
        })
        .await;

    let file = File::create(output)?;
    let mut out = BufWriter::new(file);

    let mut report = SplitReport {
        sentences: sentences.len(),
        ..SplitReport::default()
    };

    for (index, sentence) in sentences.iter().enumerate() {
        match client.annotate_sentence(sentence).await? {
            AnnotationOutcome::Annotated(annotation) => {
                conllx::write_sentence(&mut out, sentence, &annotation)?;
                report.annotated += 1;
                let _ = event_tx.send(ConvertEvent::SentenceWritten { index }).await;
            }
            AnnotationOutcome::Oversized { chars } => {
                report.oversized += 1;
                let _ = event_tx
                    .send(ConvertEvent::SentenceOversized { index, chars })
                    .await;
            }
            AnnotationOutcome::Failed => {
                info!("Skipping sentence {} due to annotation failure", index + 1);
                report.failed += 1;
                let _ = event_tx.send(ConvertEvent::SentenceFailed { index }).await;
            }
        }
    }

    out.flush()?;

    let _ = event_tx.send(ConvertEvent::Complete { report }).await;
    Ok(report)
}
