use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::BabbleError;
use crate::grammar::{CompiledGrammar, GrammarSymbol};

// --- Sentence Generation ---

/// Attempts per sample before it is abandoned.
const MAX_RETRIES: usize = 8;

/// Derives one random terminal sequence from the grammar's start symbol.
///
/// Recursive productions can loop, so derivation carries an explicit depth
/// bound; exceeding it fails the sample, and the caller decides whether to
/// retry with fresh random choices.
pub fn generate_one<R: Rng>(
    grammar: &CompiledGrammar,
    rng: &mut R,
    max_depth: usize,
) -> Result<Vec<String>, BabbleError> {
    let mut fragments = Vec::new();
    derive(grammar, grammar.start(), rng, 0, max_depth, &mut fragments)?;
    Ok(fragments)
}

fn derive<R: Rng>(
    grammar: &CompiledGrammar,
    symbol: &str,
    rng: &mut R,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<String>,
) -> Result<(), BabbleError> {
    if depth >= max_depth {
        return Err(BabbleError::DepthExceeded(max_depth));
    }
    if let Some(candidates) = grammar.productions(symbol) {
        let rhs = candidates
            .choose(rng)
            .ok_or_else(|| BabbleError::DanglingSymbol(symbol.to_string()))?;
        for element in rhs {
            match element {
                GrammarSymbol::Terminal(word) => out.push(word.clone()),
                GrammarSymbol::Nonterminal(name) => {
                    derive(grammar, name, rng, depth + 1, max_depth, out)?
                }
            }
        }
        Ok(())
    } else if grammar.is_terminal(symbol) {
        out.push(symbol.to_string());
        Ok(())
    } else {
        Err(BabbleError::DanglingSymbol(symbol.to_string()))
    }
}

/// Generates up to `count` sentences, joining each sample's fragments with
/// single spaces and fixing punctuation spacing. Samples that keep failing
/// on the depth bound or a dangling symbol are abandoned with a warning, so
/// the returned list may be shorter than `count` (or empty — the caller
/// decides whether that is a failure).
pub fn generate_many<R: Rng>(
    grammar: &CompiledGrammar,
    count: usize,
    rng: &mut R,
    max_depth: usize,
) -> Vec<String> {
    let mut sentences = Vec::new();
    for sample in 0..count {
        match generate_with_retry(grammar, rng, max_depth) {
            Ok(fragments) => sentences.push(format_surface(&fragments.join(" "))),
            Err(e) => log::warn!(
                "abandoning sample {} after {} attempts: {}",
                sample + 1,
                MAX_RETRIES,
                e
            ),
        }
    }
    sentences
}

fn generate_with_retry<R: Rng>(
    grammar: &CompiledGrammar,
    rng: &mut R,
    max_depth: usize,
) -> Result<Vec<String>, BabbleError> {
    let mut last_error = None;
    for _ in 0..MAX_RETRIES {
        match generate_one(grammar, rng, max_depth) {
            Ok(fragments) => return Ok(fragments),
            Err(e) => last_error = Some(e),
        }
    }
    Err(last_error.unwrap_or(BabbleError::DepthExceeded(max_depth)))
}

// --- Surface Formatting ---

const GLUE_MARKS: [&str; 5] = [".", ",", "!", "?", "'"];

/// Removes the space immediately preceding sentence punctuation, turning
/// "word ." into "word.". Applied to a fixpoint, so formatting an already
/// formatted sentence changes nothing.
pub fn format_surface(sentence: &str) -> String {
    let mut formatted = sentence.to_string();
    for mark in GLUE_MARKS {
        let spaced = format!(" {}", mark);
        while formatted.contains(&spaced) {
            formatted = formatted.replace(&spaced, mark);
        }
    }
    formatted
}
