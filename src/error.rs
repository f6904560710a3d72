use thiserror::Error;

// --- Errors ---

#[derive(Debug, Error)]
pub enum BabbleError {
    /// A parse tree did not have the shape the rule extractor expects.
    #[error("malformed parse tree: {0}")]
    MalformedTree(String),

    /// Aggregation failed while processing one corpus item.
    #[error("failed to process corpus item '{item}': {source}")]
    CorpusItem {
        item: String,
        #[source]
        source: Box<BabbleError>,
    },

    /// The constituency parser service could not annotate an input.
    #[error("annotation failed: {0}")]
    Annotation(String),

    /// The assembled grammar definition was rejected by the compiler.
    #[error("grammar compilation failed: {0}")]
    GrammarCompile(String),

    /// A derivation reached a symbol with neither productions nor a
    /// terminal entry.
    #[error("derivation reached dangling symbol '{0}'")]
    DanglingSymbol(String),

    /// A derivation exceeded the configured depth bound.
    #[error("derivation exceeded maximum depth {0}")]
    DepthExceeded(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BabbleError {
    /// Wraps an error with the corpus item that was being processed.
    pub fn in_item(self, item: &str) -> BabbleError {
        BabbleError::CorpusItem {
            item: item.to_string(),
            source: Box::new(self),
        }
    }
}
