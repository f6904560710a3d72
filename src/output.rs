use crate::structs::RuleGroup;

// --- Grammar Text Rendering ---

/// Renders a rule group as grammar-definition text, one `LHS -> r1 r2 ...`
/// line per production, in insertion order. With `quote_terminals` every RHS
/// symbol is wrapped in double quotes, marking it as a literal surface
/// string. An empty group renders to the empty string.
pub fn render_rules(rules: &RuleGroup, quote_terminals: bool) -> String {
    let mut text = String::new();
    for (lhs, productions) in rules.iter() {
        for rhs in productions {
            let rendered: Vec<String> = rhs
                .iter()
                .map(|symbol| {
                    if quote_terminals {
                        format!("\"{}\"", symbol)
                    } else {
                        symbol.clone()
                    }
                })
                .collect();
            text.push_str(&format!("{} -> {}\n", lhs, rendered.join(" ")));
        }
    }
    text
}

/// Assembles the full grammar definition in its fixed precedence order:
/// phrase-structure rules first, then the lexical rules from the dedicated
/// lexicon corpus, then the lexical rules recovered from the
/// phrase-structure corpus as a fallback for tags the lexicon never covers.
pub fn assemble_grammar(
    phrase_rules: &RuleGroup,
    lexicon_rules: &RuleGroup,
    fallback_lexical_rules: &RuleGroup,
) -> String {
    let mut text = String::new();
    text.push_str(&render_rules(phrase_rules, false));
    text.push_str(&render_rules(lexicon_rules, true));
    text.push_str(&render_rules(fallback_lexical_rules, true));
    text
}
