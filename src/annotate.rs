use serde_json::Value;

use crate::error::BabbleError;
use crate::structs::ParseNode;

// --- Constituency Annotation ---

/// The external constituency parser. Passed explicitly into aggregation so
/// tests can substitute canned parse trees for the live service.
pub trait ConstituencyParser {
    /// Annotates one raw input item and returns one s-expression parse-tree
    /// string per sentence found in it.
    fn parse(&self, text: &str) -> Result<Vec<String>, BabbleError>;
}

/// Synchronous client for a CoreNLP-protocol annotation server.
pub struct CoreNlpClient {
    client: reqwest::blocking::Client,
    url: String,
}

const ANNOTATOR_PROPERTIES: &str =
    r#"{"annotators":"tokenize,ssplit,pos,parse","outputFormat":"json"}"#;

impl CoreNlpClient {
    pub fn new(url: &str) -> CoreNlpClient {
        CoreNlpClient {
            client: reqwest::blocking::Client::new(),
            url: url.to_string(),
        }
    }
}

impl ConstituencyParser for CoreNlpClient {
    fn parse(&self, text: &str) -> Result<Vec<String>, BabbleError> {
        let response = self
            .client
            .post(&self.url)
            .query(&[("properties", ANNOTATOR_PROPERTIES)])
            .body(text.to_string())
            .send()
            .map_err(|e| BabbleError::Annotation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BabbleError::Annotation(format!(
                "parser service returned {}",
                response.status()
            )));
        }

        let document: Value = response
            .json()
            .map_err(|e| BabbleError::Annotation(e.to_string()))?;
        let sentences = document["sentences"].as_array().ok_or_else(|| {
            BabbleError::Annotation("response carries no 'sentences' array".to_string())
        })?;

        let mut trees = Vec::with_capacity(sentences.len());
        for sentence in sentences {
            let parse = sentence["parse"].as_str().ok_or_else(|| {
                BabbleError::Annotation("sentence annotation carries no 'parse' field".to_string())
            })?;
            // The server pretty-prints trees over several lines.
            trees.push(parse.split_whitespace().collect::<Vec<_>>().join(" "));
        }
        Ok(trees)
    }
}

/// Strips the single-child wrapper node the parser puts around every
/// sentence, returning the actual top-level constituent.
pub fn unwrap_root(tree: &ParseNode) -> Result<&ParseNode, BabbleError> {
    match tree {
        ParseNode::List(items) => match items.as_slice() {
            [ParseNode::Symbol(_), body] => Ok(body),
            _ => Err(BabbleError::MalformedTree(format!(
                "expected a single-child root wrapper, got {:?}",
                tree
            ))),
        },
        _ => Err(BabbleError::MalformedTree(format!(
            "expected a root list node, got {:?}",
            tree
        ))),
    }
}
