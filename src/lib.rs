//! conllx-annotate - dependency annotation for NER corpora.
//!
//! Converts two-column NER-tagged corpus files into an 11-column
//! CoNLL-X-style format by querying a Stanford CoreNLP server for
//! part-of-speech tags and dependency parses, then merging the result with
//! the original entity tags.

pub mod annotate;
pub mod cli;
pub mod config;
pub mod conllx;
pub mod convert;
pub mod corpus;
