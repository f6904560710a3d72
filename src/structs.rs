use clap::Parser;
use indexmap::IndexMap;
use std::path::PathBuf;

// --- Data Structures ---

/// One node of a constituency parse tree as produced by the s-expression
/// reader. A `List` holds a label symbol followed by sub-constituents or
/// terminal symbols; `Quoted` is a double-quoted literal token.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseNode {
    Symbol(String),
    Quoted(String),
    List(Vec<ParseNode>),
}

/// Productions keyed by LHS symbol. Insertion order of both the LHS keys and
/// each LHS's productions is preserved, and productions are deduplicated by
/// value within one LHS.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleGroup {
    productions: IndexMap<String, Vec<Vec<String>>>,
}

impl RuleGroup {
    pub fn contains(&self, lhs: &str) -> bool {
        self.productions.contains_key(lhs)
    }

    /// Registers `lhs` with an empty production list if it is not present.
    pub fn register(&mut self, lhs: &str) {
        if !self.productions.contains_key(lhs) {
            self.productions.insert(lhs.to_string(), Vec::new());
        }
    }

    /// Appends `rhs` under a registered `lhs`, skipping exact duplicates.
    /// Returns false when `lhs` was never registered in this group.
    pub fn append(&mut self, lhs: &str, rhs: Vec<String>) -> bool {
        match self.productions.get_mut(lhs) {
            Some(list) => {
                if !list.contains(&rhs) {
                    list.push(rhs);
                }
                true
            }
            None => false,
        }
    }

    pub fn get(&self, lhs: &str) -> Option<&Vec<Vec<String>>> {
        self.productions.get(lhs)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Vec<String>>)> {
        self.productions.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }
}

/// Rules harvested from one or more parse trees. A LHS symbol lives in
/// exactly one of the two groups; whichever group observed it first keeps it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleGroupPair {
    pub phrase: RuleGroup,
    pub lexical: RuleGroup,
}

// --- Command Line ---

#[derive(Parser, Debug)]
#[command(
    name = "babbler",
    about = "Induces a context-free grammar from annotated corpora and generates random sentences",
    version
)]
pub struct Cli {
    /// Phrase-structure corpus, one sentence per line
    pub corpus: PathBuf,

    /// Lexicon corpus, one comma-separated group of word forms per line
    pub lexicon: PathBuf,

    /// Number of sentences to generate
    #[arg(default_value_t = 10)]
    pub count: usize,

    /// URL of the constituency parser service
    #[arg(long, default_value = "http://localhost:9000")]
    pub server: String,

    /// Maximum derivation depth before a sample is abandoned and retried
    #[arg(long, default_value_t = 40)]
    pub max_depth: usize,

    /// Seed for deterministic generation
    #[arg(long)]
    pub seed: Option<u64>,
}
