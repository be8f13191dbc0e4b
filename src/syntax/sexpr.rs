//! Bundled front end: a small bracketed expression language.
//!
//! Converts source text into a concrete syntax tree with source spans. Unlike
//! an AST builder, every bracket and quote mark is kept as its own leaf, and
//! each literal sits inside an `Atom` node, so the trees have the unary
//! wrapper chains and punctuation that filtering is meant to strip.

use clap::ValueEnum;
use pest::{iterators::Pair, Parser};
use pest_derive::Parser;
use serde::{Deserialize, Serialize};

use crate::errors::{FilterError, FilterResult, SourceContext};
use crate::syntax::{Language, Span, Symbol, SyntaxLeaf, SyntaxNode};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct SexprParser;

// ============================================================================
// VOCABULARY
// ============================================================================

/// Marker type for the bracketed expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sexpr;

/// Structural kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum NodeKind {
    Program,
    List,
    Block,
    Quote,
    Atom,
}

/// Token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum TokenKind {
    LParen,
    RParen,
    LBrace,
    RBrace,
    QuoteMark,
    Symbol,
    Number,
    String,
    Boolean,
}

impl Language for Sexpr {
    type NodeKind = NodeKind;
    type TokenKind = TokenKind;

    fn node_kind_name(kind: NodeKind) -> &'static str {
        match kind {
            NodeKind::Program => "Program",
            NodeKind::List => "List",
            NodeKind::Block => "Block",
            NodeKind::Quote => "Quote",
            NodeKind::Atom => "Atom",
        }
    }

    fn token_kind_name(kind: TokenKind) -> &'static str {
        match kind {
            TokenKind::LParen => "LParen",
            TokenKind::RParen => "RParen",
            TokenKind::LBrace => "LBrace",
            TokenKind::RBrace => "RBrace",
            TokenKind::QuoteMark => "QuoteMark",
            TokenKind::Symbol => "Symbol",
            TokenKind::Number => "Number",
            TokenKind::String => "String",
            TokenKind::Boolean => "Boolean",
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses source text into a `Program` node.
///
/// # Examples
///
/// ```rust
/// use cst_filter::syntax::sexpr::{parse, NodeKind};
/// use cst_filter::syntax::SymbolKind;
/// let tree = parse("(+ 1 2)").unwrap();
/// assert_eq!(tree.kind(), SymbolKind::Node(NodeKind::Program));
/// assert_eq!(tree.source_text(), "( + 1 2 )");
/// ```
pub fn parse(source_text: &str) -> FilterResult<Symbol<Sexpr>> {
    parse_with_context(source_text, &SourceContext::inline(source_text))
}

/// Parses source text, attributing errors to the given source.
pub fn parse_with_context(
    source_text: &str,
    source: &SourceContext,
) -> FilterResult<Symbol<Sexpr>> {
    let mut pairs =
        SexprParser::parse(Rule::program, source_text).map_err(|e| convert_parse_error(e, source))?;

    match pairs.next() {
        Some(program) => Ok(build_symbol(program)),
        None => Ok(Symbol::Node(SyntaxNode::new(NodeKind::Program, Vec::new()))),
    }
}

// ============================================================================
// TREE BUILDERS
// ============================================================================

fn build_symbol(pair: Pair<Rule>) -> Symbol<Sexpr> {
    let span = get_span(&pair);

    match pair.as_rule() {
        Rule::program => build_node(NodeKind::Program, pair),
        Rule::list => build_node(NodeKind::List, pair),
        Rule::block => build_node(NodeKind::Block, pair),
        Rule::quote => build_node(NodeKind::Quote, pair),
        Rule::atom => build_node(NodeKind::Atom, pair),
        rule => {
            let kind = token_kind(rule);
            Symbol::Leaf(SyntaxLeaf::new(kind, pair.as_str(), span))
        }
    }
}

fn build_node(kind: NodeKind, pair: Pair<Rule>) -> Symbol<Sexpr> {
    let children = pair
        .into_inner()
        .filter(|p| p.as_rule() != Rule::EOI)
        .map(|p| Some(build_symbol(p)))
        .collect();
    Symbol::Node(SyntaxNode::new(kind, children))
}

fn token_kind(rule: Rule) -> TokenKind {
    match rule {
        Rule::lparen => TokenKind::LParen,
        Rule::rparen => TokenKind::RParen,
        Rule::lbrace => TokenKind::LBrace,
        Rule::rbrace => TokenKind::RBrace,
        Rule::quote_mark => TokenKind::QuoteMark,
        Rule::number => TokenKind::Number,
        Rule::string => TokenKind::String,
        Rule::boolean => TokenKind::Boolean,
        // symbol is the only remaining token-producing rule
        _ => TokenKind::Symbol,
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

fn get_span(pair: &Pair<Rule>) -> Span {
    let s = pair.as_span();
    Span::new(s.start(), s.end())
}

fn convert_parse_error(error: pest::error::Error<Rule>, source: &SourceContext) -> FilterError {
    let span = match error.location {
        pest::error::InputLocation::Pos(pos) => Span::new(pos, pos),
        pest::error::InputLocation::Span((start, end)) => Span::new(start, end),
    };
    let message = match &error.variant {
        pest::error::ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
            let expected = positives
                .iter()
                .map(|r| format!("{:?}", r))
                .collect::<Vec<_>>()
                .join(", ");
            format!("expected {}", expected)
        }
        pest::error::ErrorVariant::ParsingError { .. } => "unexpected input".to_string(),
        pest::error::ErrorVariant::CustomError { message } => message.clone(),
    };
    FilterError::Parse {
        message,
        source_code: source.to_named_source(),
        span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SymbolKind;

    #[test]
    fn parses_punctuation_as_leaves() {
        let tree = parse("(define x 1)").unwrap();
        let program = tree.as_node().unwrap();
        assert_eq!(program.child_count(), 1);
        let list = program.children().next().unwrap().as_node().unwrap();
        assert_eq!(list.kind(), NodeKind::List);
        let kinds: Vec<_> = list.children().map(Symbol::kind).collect();
        assert_eq!(
            kinds,
            vec![
                SymbolKind::Token(TokenKind::LParen),
                SymbolKind::Node(NodeKind::Atom),
                SymbolKind::Node(NodeKind::Atom),
                SymbolKind::Node(NodeKind::Atom),
                SymbolKind::Token(TokenKind::RParen),
            ]
        );
    }

    #[test]
    fn literals_are_wrapped_in_atoms() {
        let tree = parse("true \"hi\" -3.5 foo").unwrap();
        let leaves: Vec<_> = tree.leaves().iter().map(|l| (l.kind(), l.text().to_string())).collect();
        assert_eq!(
            leaves,
            vec![
                (TokenKind::Boolean, "true".to_string()),
                (TokenKind::String, "\"hi\"".to_string()),
                (TokenKind::Number, "-3.5".to_string()),
                (TokenKind::Symbol, "foo".to_string()),
            ]
        );
    }

    #[test]
    fn comments_and_blocks() {
        let tree = parse("; note\n{a 'b}").unwrap();
        assert_eq!(tree.source_text(), "{ a ' b }");
        assert_eq!(tree.pretty(), "Program(Block({ Atom(a) Quote(' Atom(b)) }))");
    }

    #[test]
    fn spans_point_into_the_source() {
        let tree = parse("(ab)").unwrap();
        let leaves = tree.leaves();
        assert_eq!(leaves[1].span(), Span::new(1, 3));
    }

    #[test]
    fn empty_source_is_an_empty_program() {
        let tree = parse("   ").unwrap();
        assert_eq!(tree.pretty(), "Program()");
    }

    #[test]
    fn unbalanced_input_is_a_parse_error() {
        let err = parse("(a b").unwrap_err();
        assert!(matches!(err, FilterError::Parse { .. }));
        assert_eq!(err.error_code(), "cst_filter::parse");
    }
}
