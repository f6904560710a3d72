use nom::branch::alt;
use nom::bytes::complete::{take_while, take_while1};
use nom::character::complete::{char, multispace0};
use nom::combinator::{all_consuming, map};
use nom::multi::many0;
use nom::sequence::{delimited, preceded};
use nom::IResult;

use crate::error::BabbleError;
use crate::structs::ParseNode;

// --- Tree Reading ---

/// Reads one s-expression-encoded parse tree into a `ParseNode`.
///
/// Bare tokens become `Symbol`, double-quoted tokens become `Quoted` with
/// the quotes stripped, and parenthesized sequences become `List`. The whole
/// input must be consumed; unbalanced parentheses or trailing text fail.
pub fn read_tree(input: &str) -> Result<ParseNode, BabbleError> {
    match all_consuming(delimited(multispace0, node, multispace0))(input) {
        Ok((_, tree)) => Ok(tree),
        Err(e) => Err(BabbleError::MalformedTree(format!(
            "unreadable s-expression '{}': {:?}",
            input.trim(),
            e
        ))),
    }
}

fn node(input: &str) -> IResult<&str, ParseNode> {
    alt((list, quoted, symbol))(input)
}

fn list(input: &str) -> IResult<&str, ParseNode> {
    map(
        delimited(
            char('('),
            many0(preceded(multispace0, node)),
            preceded(multispace0, char(')')),
        ),
        ParseNode::List,
    )(input)
}

fn quoted(input: &str) -> IResult<&str, ParseNode> {
    map(
        delimited(char('"'), take_while(|c| c != '"'), char('"')),
        |literal: &str| ParseNode::Quoted(literal.to_string()),
    )(input)
}

fn symbol(input: &str) -> IResult<&str, ParseNode> {
    map(
        take_while1(|c: char| !c.is_whitespace() && c != '(' && c != ')' && c != '"'),
        |token: &str| ParseNode::Symbol(token.to_string()),
    )(input)
}
