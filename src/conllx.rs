//! CoNLL-X output: dependency label simplification and row writing.
//!
//! Output rows follow the 11-column layout
//! `index  word  -  pos  pos  -  head  dep  _  _  ner`, tab-separated, with
//! one blank line after each sentence.

use std::collections::HashMap;
use std::io::Write;

use thiserror::Error;

use crate::annotate::{AnnotatedSentence, DependencyEdge};
use crate::corpus::Token;

/// Placeholder for a token with no incoming dependency edge.
pub const UNLABELED: &str = "_";

/// Errors that can occur while writing a sentence block.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The server re-tokenized the sentence and produced a token index with
    /// no counterpart in the original token sequence. Aborts the run; see
    /// DESIGN.md for the alignment discussion.
    #[error("annotated token index {index} has no original token (sentence has {sentence_len})")]
    Alignment { index: usize, sentence_len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Simplify a raw dependency label. First match wins:
/// any "compound" relation becomes "nn", the exact root label is lowercased,
/// and sub-typed relations keep only the part before the colon.
pub fn simplify_label(label: &str) -> &str {
    if label.contains("compound") {
        return "nn";
    }
    if label == "ROOT" {
        return "root";
    }
    match label.split_once(':') {
        Some((base, _subtype)) => base,
        None => label,
    }
}

/// Write one annotated sentence as a CoNLL-X block.
///
/// Rows follow the server's token list; the NER tag comes from the original
/// sentence by 1-based position. Exact 1:1 alignment between the two is a
/// corpus precondition — an out-of-range index fails hard rather than
/// guessing a tag.
pub fn write_sentence<W: Write>(
    out: &mut W,
    sentence: &[Token],
    annotation: &AnnotatedSentence,
) -> Result<(), TranscodeError> {
    let edges: HashMap<usize, &DependencyEdge> = annotation
        .basic_dependencies
        .iter()
        .map(|edge| (edge.dependent, edge))
        .collect();

    for token in &annotation.tokens {
        let (head, raw_label) = match edges.get(&token.index) {
            Some(edge) => (edge.governor, edge.dep.as_str()),
            None => (0, UNLABELED),
        };
        let dep = simplify_label(raw_label);

        let ner = token
            .index
            .checked_sub(1)
            .and_then(|i| sentence.get(i))
            .map(|t| t.ner.as_str())
            .ok_or(TranscodeError::Alignment {
                index: token.index,
                sentence_len: sentence.len(),
            })?;

        writeln!(
            out,
            "{}\t{}\t-\t{}\t{}\t-\t{}\t{}\t_\t_\t{}",
            token.index, token.word, token.pos, token.pos, head, dep, ner
        )?;
    }

    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::AnnotatedToken;

    fn token(word: &str, ner: &str) -> Token {
        Token {
            word: word.to_string(),
            ner: ner.to_string(),
        }
    }

    fn annotated(index: usize, word: &str, pos: &str) -> AnnotatedToken {
        AnnotatedToken {
            index,
            word: word.to_string(),
            pos: pos.to_string(),
        }
    }

    fn edge(dependent: usize, governor: usize, dep: &str) -> DependencyEdge {
        DependencyEdge {
            dependent,
            governor,
            dep: dep.to_string(),
        }
    }

    #[test]
    fn test_simplify_compound_variants() {
        assert_eq!(simplify_label("compound"), "nn");
        assert_eq!(simplify_label("compound:nn"), "nn");
        assert_eq!(simplify_label("nmod:compound"), "nn");
    }

    #[test]
    fn test_simplify_root_is_exact_match() {
        assert_eq!(simplify_label("ROOT"), "root");
        // Substring or case variants fall through to the other rules.
        assert_eq!(simplify_label("root"), "root");
        assert_eq!(simplify_label("ROOTS"), "ROOTS");
        assert_eq!(simplify_label("acl:ROOT"), "acl");
    }

    #[test]
    fn test_simplify_strips_subtype() {
        assert_eq!(simplify_label("nmod:tmod"), "nmod");
        assert_eq!(simplify_label("advcl:if:then"), "advcl");
    }

    #[test]
    fn test_simplify_passthrough() {
        assert_eq!(simplify_label("case"), "case");
        assert_eq!(simplify_label("nsubj"), "nsubj");
        assert_eq!(simplify_label(UNLABELED), UNLABELED);
    }

    #[test]
    fn test_write_sentence_layout() {
        let sentence = vec![token("猫", "O"), token("跑", "O")];
        let annotation = AnnotatedSentence {
            tokens: vec![annotated(1, "猫", "NN"), annotated(2, "跑", "VV")],
            basic_dependencies: vec![edge(2, 1, "ROOT")],
        };

        let mut out = Vec::new();
        write_sentence(&mut out, &sentence, &annotation).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1\t猫\t-\tNN\tNN\t-\t0\t_\t_\t_\tO\n2\t跑\t-\tVV\tVV\t-\t1\troot\t_\t_\tO\n\n"
        );
    }

    #[test]
    fn test_write_sentence_simplifies_labels() {
        let sentence = vec![token("a", "B-ORG"), token("b", "O")];
        let annotation = AnnotatedSentence {
            tokens: vec![annotated(1, "a", "NN"), annotated(2, "b", "VV")],
            basic_dependencies: vec![edge(1, 2, "nmod:tmod"), edge(2, 0, "ROOT")],
        };

        let mut out = Vec::new();
        write_sentence(&mut out, &sentence, &annotation).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "1\ta\t-\tNN\tNN\t-\t2\tnmod\t_\t_\tB-ORG\n2\tb\t-\tVV\tVV\t-\t0\troot\t_\t_\tO\n\n"
        );
    }

    #[test]
    fn test_retokenization_mismatch_fails() {
        // Server split one word into two tokens; index 2 has no original.
        let sentence = vec![token("ab", "O")];
        let annotation = AnnotatedSentence {
            tokens: vec![annotated(1, "a", "NN"), annotated(2, "b", "NN")],
            basic_dependencies: vec![],
        };

        let mut out = Vec::new();
        let err = write_sentence(&mut out, &sentence, &annotation).unwrap_err();
        assert!(matches!(
            err,
            TranscodeError::Alignment {
                index: 2,
                sentence_len: 1
            }
        ));
    }
}
