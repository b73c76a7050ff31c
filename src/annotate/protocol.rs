//! Wire types for the CoreNLP server JSON protocol.

use serde::{Deserialize, Serialize};

/// Options bundle sent as the `properties` query parameter.
#[derive(Debug, Serialize)]
pub(crate) struct Properties<'a> {
    pub annotators: &'a str,
    #[serde(rename = "pipelineLanguage")]
    pub pipeline_language: &'a str,
    #[serde(rename = "outputFormat")]
    pub output_format: &'a str,
}

/// Top-level CoreNLP response.
#[derive(Debug, Deserialize)]
pub struct CoreNlpDocument {
    pub sentences: Vec<AnnotatedSentence>,
}

/// One sentence as annotated by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotatedSentence {
    #[serde(default)]
    pub tokens: Vec<AnnotatedToken>,
    #[serde(rename = "basicDependencies", default)]
    pub basic_dependencies: Vec<DependencyEdge>,
}

/// One token with its part-of-speech tag. Indices are 1-based.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotatedToken {
    pub index: usize,
    pub word: String,
    pub pos: String,
}

/// One labeled dependency edge. Governor 0 marks the root.
#[derive(Debug, Clone, Deserialize)]
pub struct DependencyEdge {
    pub dependent: usize,
    pub governor: usize,
    pub dep: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_corenlp_response() {
        let json = r#"{
            "sentences": [{
                "index": 0,
                "tokens": [
                    {"index": 1, "word": "猫", "originalText": "猫", "pos": "NN", "ner": "O"},
                    {"index": 2, "word": "跑", "originalText": "跑", "pos": "VV", "ner": "O"}
                ],
                "basicDependencies": [
                    {"dep": "ROOT", "governor": 0, "governorGloss": "ROOT", "dependent": 2, "dependentGloss": "跑"},
                    {"dep": "nsubj", "governor": 2, "governorGloss": "跑", "dependent": 1, "dependentGloss": "猫"}
                ]
            }]
        }"#;

        let doc: CoreNlpDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.sentences.len(), 1);

        let sentence = &doc.sentences[0];
        assert_eq!(sentence.tokens.len(), 2);
        assert_eq!(sentence.tokens[0].word, "猫");
        assert_eq!(sentence.tokens[0].pos, "NN");
        assert_eq!(sentence.basic_dependencies[0].dep, "ROOT");
        assert_eq!(sentence.basic_dependencies[0].governor, 0);
    }

    #[test]
    fn test_missing_dependencies_defaults_empty() {
        let json = r#"{"sentences": [{"tokens": [{"index": 1, "word": "a", "pos": "NN"}]}]}"#;
        let doc: CoreNlpDocument = serde_json::from_str(json).unwrap();
        assert!(doc.sentences[0].basic_dependencies.is_empty());
    }

    #[test]
    fn test_properties_serialization() {
        let properties = Properties {
            annotators: "tokenize,ssplit,pos,ner,depparse",
            pipeline_language: "zh",
            output_format: "json",
        };
        let json = serde_json::to_string(&properties).unwrap();
        assert_eq!(
            json,
            r#"{"annotators":"tokenize,ssplit,pos,ner,depparse","pipelineLanguage":"zh","outputFormat":"json"}"#
        );
    }
}
