//! Reader for two-column NER-tagged corpus files.
//!
//! Input format: one `word<whitespace>ner-tag` pair per line, UTF-8, with a
//! blank line between sentences. Files without a trailing blank line still
//! yield their final sentence.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while reading a corpus file.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("{}:{line}: expected two fields (word, ner tag): {content:?}", path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One input token: a word and its named-entity tag. Position within the
/// sentence (1-based) is implied by order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub ner: String,
}

/// An ordered run of tokens between blank lines.
pub type Sentence = Vec<Token>;

/// Read all sentences from a corpus file.
///
/// A malformed line aborts the whole read; there is no per-line recovery.
pub fn read_corpus(path: &Path) -> Result<Vec<Sentence>, CorpusError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut sentences = Vec::new();
    let mut current: Sentence = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            if !current.is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
            continue;
        }

        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(word), Some(ner), None) => current.push(Token {
                word: word.to_string(),
                ner: ner.to_string(),
            }),
            _ => {
                return Err(CorpusError::MalformedLine {
                    path: path.to_path_buf(),
                    line: line_no + 1,
                    content: line.to_string(),
                })
            }
        }
    }

    // Final sentence when the file lacks a trailing blank line.
    if !current.is_empty() {
        sentences.push(current);
    }

    Ok(sentences)
}

/// Join a sentence's words with single spaces, as sent to the annotator.
pub fn sentence_text(sentence: &[Token]) -> String {
    sentence
        .iter()
        .map(|t| t.word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn corpus_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_sentence_boundaries() {
        let file = corpus_file("猫 O\n跑 O\n\n北京 B-LOC\n");
        let sentences = read_corpus(file.path()).unwrap();

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].len(), 2);
        assert_eq!(sentences[0][0].word, "猫");
        assert_eq!(sentences[0][0].ner, "O");
        assert_eq!(sentences[1].len(), 1);
        assert_eq!(sentences[1][0].ner, "B-LOC");
    }

    #[test]
    fn test_final_sentence_without_trailing_blank() {
        let file = corpus_file("a O\n\nb O\nc O");
        let sentences = read_corpus(file.path()).unwrap();

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].len(), 2);
    }

    #[test]
    fn test_consecutive_blank_lines_yield_no_empty_sentences() {
        let file = corpus_file("a O\n\n\n\nb O\n\n");
        let sentences = read_corpus(file.path()).unwrap();

        assert_eq!(sentences.len(), 2);
        assert!(sentences.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_malformed_line_aborts() {
        let file = corpus_file("a O\nbroken\n");
        let err = read_corpus(file.path()).unwrap_err();

        match err {
            CorpusError::MalformedLine { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_three_field_line_is_malformed() {
        let file = corpus_file("a O extra\n");
        assert!(matches!(
            read_corpus(file.path()),
            Err(CorpusError::MalformedLine { line: 1, .. })
        ));
    }

    #[test]
    fn test_sentence_text_joins_with_spaces() {
        let sentence = vec![
            Token {
                word: "猫".to_string(),
                ner: "O".to_string(),
            },
            Token {
                word: "跑".to_string(),
                ner: "O".to_string(),
            },
        ];
        assert_eq!(sentence_text(&sentence), "猫 跑");
    }
}
