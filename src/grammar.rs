use indexmap::IndexMap;
use std::collections::HashSet;

use crate::error::BabbleError;

// --- Compiled Grammar ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarSymbol {
    /// A bare symbol naming a further production.
    Nonterminal(String),
    /// A double-quoted literal surface string.
    Terminal(String),
}

/// An indexed grammar built once from assembled grammar-definition text and
/// immutable afterwards. The start symbol is the LHS of the first production
/// line; productions keep their definition order per LHS.
#[derive(Debug, Clone)]
pub struct CompiledGrammar {
    start: String,
    productions: IndexMap<String, Vec<Vec<GrammarSymbol>>>,
    terminals: HashSet<String>,
}

impl CompiledGrammar {
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Candidate RHS productions for `lhs`, in definition order.
    pub fn productions(&self, lhs: &str) -> Option<&[Vec<GrammarSymbol>]> {
        self.productions.get(lhs).map(|list| list.as_slice())
    }

    /// Whether `symbol` ever occurs as a literal terminal in the grammar.
    pub fn is_terminal(&self, symbol: &str) -> bool {
        self.terminals.contains(symbol)
    }
}

// --- Grammar Compilation ---

/// Compiles grammar-definition text, one `LHS -> sym1 sym2 ...` production
/// per line with double-quoted literal terminals. Fails on a line without
/// `->`, an empty LHS or RHS, an unbalanced quote, and on text defining no
/// production at all (leaving the start symbol undefined).
pub fn compile_grammar(text: &str) -> Result<CompiledGrammar, BabbleError> {
    let mut productions: IndexMap<String, Vec<Vec<GrammarSymbol>>> = IndexMap::new();
    let mut terminals: HashSet<String> = HashSet::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let (lhs_part, rhs_part) = line.split_once("->").ok_or_else(|| {
            BabbleError::GrammarCompile(format!("line {}: missing '->': '{}'", line_num, line))
        })?;
        let lhs = lhs_part.trim();
        if lhs.is_empty() {
            return Err(BabbleError::GrammarCompile(format!(
                "line {}: empty LHS: '{}'",
                line_num, line
            )));
        }
        let rhs = tokenize_rhs(rhs_part, line_num)?;
        if rhs.is_empty() {
            return Err(BabbleError::GrammarCompile(format!(
                "line {}: empty RHS: '{}'",
                line_num, line
            )));
        }
        for symbol in &rhs {
            if let GrammarSymbol::Terminal(word) = symbol {
                terminals.insert(word.clone());
            }
        }
        productions.entry(lhs.to_string()).or_default().push(rhs);
    }

    let start = productions
        .keys()
        .next()
        .cloned()
        .ok_or_else(|| BabbleError::GrammarCompile("empty grammar: no start symbol".to_string()))?;

    Ok(CompiledGrammar {
        start,
        productions,
        terminals,
    })
}

fn tokenize_rhs(rhs: &str, line_num: usize) -> Result<Vec<GrammarSymbol>, BabbleError> {
    let mut symbols = Vec::new();
    let mut chars = rhs.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' {
            chars.next();
            let mut literal = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => literal.push(ch),
                    None => {
                        return Err(BabbleError::GrammarCompile(format!(
                            "line {}: unbalanced quote in RHS '{}'",
                            line_num,
                            rhs.trim()
                        )))
                    }
                }
            }
            symbols.push(GrammarSymbol::Terminal(literal));
        } else {
            let mut name = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() || ch == '"' {
                    break;
                }
                name.push(ch);
                chars.next();
            }
            symbols.push(GrammarSymbol::Nonterminal(name));
        }
    }
    Ok(symbols)
}
