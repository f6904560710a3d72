use crate::annotate::{unwrap_root, ConstituencyParser};
use crate::error::BabbleError;
use crate::sexpr::read_tree;
use crate::structs::{ParseNode, RuleGroupPair};

// --- Label Normalization ---

/// Pseudo-terminal for sentence-final punctuation.
pub const TABSTOP: &str = "TABSTOP";
/// Pseudo-terminal for all other punctuation tags.
pub const PUNC: &str = "PUNC";

/// Canonicalizes a raw constituent or POS tag into a grammar-safe symbol.
/// Idempotent: normalizing a normalized label yields the same label.
pub fn normalize_label(label: &str) -> String {
    match label {
        "." | "!" | "?" => TABSTOP.to_string(),
        _ if !label.is_empty() && label.chars().all(|c| c.is_ascii_punctuation()) => {
            PUNC.to_string()
        }
        _ => label
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '\'')
            .collect(),
    }
}

// --- Rule Extraction ---

/// Recursively walks one constituent and records its productions in `rules`.
///
/// A node dominating further constituents contributes a phrase-structure
/// rule over the normalized labels of its constituent children; a node
/// directly dominating terminals is a POS tag and contributes one lexical
/// rule per terminal. The first classification a LHS symbol receives wins
/// for the rest of the run; a tree that contradicts an earlier
/// classification is reported as malformed rather than re-classified.
pub fn extract_rules(node: &ParseNode, rules: &mut RuleGroupPair) -> Result<(), BabbleError> {
    let items = match node {
        ParseNode::List(items) => items,
        // A lone terminal carries no production of its own.
        ParseNode::Symbol(_) | ParseNode::Quoted(_) => return Ok(()),
    };
    let label = match items.first() {
        Some(ParseNode::Symbol(label)) => label,
        _ => {
            return Err(BabbleError::MalformedTree(format!(
                "constituent must start with a label symbol: {:?}",
                node
            )))
        }
    };
    let lhs = normalize_label(label);

    if let Some(second) = items.get(1) {
        match second {
            ParseNode::List(_) => {
                if !rules.phrase.contains(&lhs) && !rules.lexical.contains(&lhs) {
                    rules.phrase.register(&lhs);
                }
                let rhs: Vec<String> = items[1..].iter().filter_map(constituent_label).collect();
                if !rhs.is_empty() && !rules.phrase.append(&lhs, rhs) {
                    return Err(BabbleError::MalformedTree(format!(
                        "'{}' is a lexical tag but dominates constituents: {:?}",
                        lhs, node
                    )));
                }
            }
            ParseNode::Symbol(_) | ParseNode::Quoted(_) => {
                if !rules.lexical.contains(&lhs) && !rules.phrase.contains(&lhs) {
                    rules.lexical.register(&lhs);
                }
            }
        }
    }

    for child in items.iter().skip(1) {
        match child {
            ParseNode::Symbol(word) | ParseNode::Quoted(word) => {
                if !rules.lexical.append(&lhs, vec![word.clone()]) {
                    return Err(BabbleError::MalformedTree(format!(
                        "terminal '{}' under '{}', which is not a lexical tag: {:?}",
                        word, lhs, node
                    )));
                }
            }
            ParseNode::List(_) => extract_rules(child, rules)?,
        }
    }
    Ok(())
}

/// The normalized label of a constituent child, or None for terminals and
/// lists that do not start with a label.
fn constituent_label(child: &ParseNode) -> Option<String> {
    match child {
        ParseNode::List(sub) => match sub.first() {
            Some(ParseNode::Symbol(label)) => Some(normalize_label(label)),
            _ => None,
        },
        _ => None,
    }
}

// --- Aggregation ---

/// Annotates every item and merges the extracted rules into one pair.
///
/// Items are processed in input order, which fixes only the insertion order
/// of the harvested rules. The first failing item aborts aggregation and is
/// named in the returned error.
pub fn aggregate<P>(items: &[String], parser: &P) -> Result<RuleGroupPair, BabbleError>
where
    P: ConstituencyParser + ?Sized,
{
    let mut rules = RuleGroupPair::default();
    for item in items {
        extract_item(item, parser, &mut rules).map_err(|e| e.in_item(item))?;
    }
    Ok(rules)
}

fn extract_item<P>(item: &str, parser: &P, rules: &mut RuleGroupPair) -> Result<(), BabbleError>
where
    P: ConstituencyParser + ?Sized,
{
    for tree_text in parser.parse(item)? {
        log::debug!("annotated '{}' as {}", item, tree_text);
        let tree = read_tree(&tree_text)?;
        let body = unwrap_root(&tree)?;
        extract_rules(body, rules)?;
    }
    Ok(())
}
