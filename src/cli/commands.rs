//! Conversion and server-check commands.

use std::path::Path;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use crate::annotate::AnnotatorClient;
use crate::config::{corpus_splits, AnnotatorConfig, Split};
use crate::convert::{self, ConvertEvent};

/// Convert corpus splits to CoNLL-X.
pub async fn cmd_convert(
    dataset_dir: &Path,
    split: Option<&str>,
    endpoint: Option<String>,
    max_attempts: Option<u32>,
) -> anyhow::Result<()> {
    let mut config = AnnotatorConfig::default();
    if let Some(ep) = endpoint {
        config.endpoint = ep;
    }
    if let Some(n) = max_attempts {
        config.retry.max_attempts = n;
    }

    let client = AnnotatorClient::new(config.clone());

    if !client.is_available().await {
        println!(
            "{} CoreNLP server not available at {}",
            style("✗").red(),
            config.endpoint
        );
        println!("  Start one with: java -cp \"*\" edu.stanford.nlp.pipeline.StanfordCoreNLPServer -port 9000");
        anyhow::bail!("annotation server unavailable");
    }

    println!(
        "{} Connected to CoreNLP at {} (language: {})",
        style("✓").green(),
        config.endpoint,
        config.language
    );

    let splits = match split {
        Some(name) => vec![Split::in_dir(dataset_dir, name)],
        None => corpus_splits(dataset_dir),
    };

    for split in splits {
        println!(
            "{} Converting {} ({} → {})",
            style("→").cyan(),
            split.name,
            split.input.display(),
            split.output.display()
        );

        // Event channel for progress tracking
        let (event_tx, mut event_rx) = mpsc::channel::<ConvertEvent>(100);

        let event_handler = tokio::spawn(async move {
            let mut pb: Option<ProgressBar> = None;
            while let Some(event) = event_rx.recv().await {
                match event {
                    ConvertEvent::Started { total_sentences } => {
                        let progress = ProgressBar::new(total_sentences as u64);
                        progress.set_style(
                            ProgressStyle::default_bar()
                                .template(
                                    "{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}",
                                )
                                .unwrap()
                                .progress_chars("█▓░"),
                        );
                        progress.set_message("Annotating...");
                        pb = Some(progress);
                    }
                    ConvertEvent::SentenceWritten { .. } => {
                        if let Some(ref progress) = pb {
                            progress.inc(1);
                        }
                    }
                    ConvertEvent::SentenceOversized { index, chars } => {
                        if let Some(ref progress) = pb {
                            progress.println(format!(
                                "{} Sentence {} over length cap ({} chars), skipped",
                                style("!").yellow(),
                                index + 1,
                                chars
                            ));
                            progress.inc(1);
                        }
                    }
                    ConvertEvent::SentenceFailed { index } => {
                        if let Some(ref progress) = pb {
                            progress.println(format!(
                                "{} Sentence {} dropped after repeated failures",
                                style("✗").red(),
                                index + 1
                            ));
                            progress.inc(1);
                        }
                    }
                    ConvertEvent::Complete { .. } => {
                        if let Some(ref progress) = pb {
                            progress.finish_and_clear();
                        }
                        pb = None;
                    }
                }
            }
        });

        let report = convert::convert_split(&client, &split.input, &split.output, event_tx).await?;

        let _ = event_handler.await;

        println!(
            "{} {}: {} annotated, {} oversized, {} failed ({} sentences total)",
            style("✓").green(),
            split.name,
            report.annotated,
            report.oversized,
            report.failed,
            report.sentences
        );
    }

    Ok(())
}

/// Probe the CoreNLP server.
pub async fn cmd_check(endpoint: Option<String>) -> anyhow::Result<()> {
    let mut config = AnnotatorConfig::default();
    if let Some(ep) = endpoint {
        config.endpoint = ep;
    }

    let client = AnnotatorClient::new(config.clone());

    if client.is_available().await {
        println!(
            "{} CoreNLP server reachable at {}",
            style("✓").green(),
            config.endpoint
        );
        Ok(())
    } else {
        println!(
            "{} No CoreNLP server at {}",
            style("✗").red(),
            config.endpoint
        );
        anyhow::bail!("annotation server unavailable")
    }
}
