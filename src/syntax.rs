//! Syntax module: the concrete syntax tree contract shared by every stage.
//!
//! A tree is made of [`Symbol`]s. A symbol is either a [`SyntaxLeaf`] (a token
//! kind plus its literal text) or a [`SyntaxNode`] (a structural kind plus an
//! ordered list of child slots). A slot may be empty, which stands for a
//! grammatically optional element that was absent in the source; traversals
//! skip empty slots.
//!
//! The kind vocabulary is not defined here. Each front end supplies it by
//! implementing [`Language`].

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

pub mod sexpr;

// ============================================================================
// LANGUAGE VOCABULARY
// ============================================================================

/// The kind vocabulary of a concrete syntax tree.
///
/// Implementors are usually zero-sized marker types; the associated kinds
/// carry the actual tags.
pub trait Language: fmt::Debug + Clone + Copy + PartialEq + Eq + Hash + 'static {
    /// Structural kind of interior nodes.
    type NodeKind: fmt::Debug + Clone + Copy + PartialEq + Eq + Hash + 'static;
    /// Kind of leaf tokens.
    type TokenKind: fmt::Debug + Clone + Copy + PartialEq + Eq + Hash + 'static;

    /// Printable name of a node kind.
    fn node_kind_name(kind: Self::NodeKind) -> &'static str;

    /// Printable name of a token kind.
    fn token_kind_name(kind: Self::TokenKind) -> &'static str;
}

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Byte range of a token in its source text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A terminal symbol: token kind and the text it was lexed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxLeaf<L: Language> {
    kind: L::TokenKind,
    text: String,
    span: Span,
}

/// An interior symbol: structural kind and ordered child slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode<L: Language> {
    kind: L::NodeKind,
    children: Vec<Option<Symbol<L>>>,
}

/// Either a leaf or an interior node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol<L: Language> {
    Leaf(SyntaxLeaf<L>),
    Node(SyntaxNode<L>),
}

/// The kind tag of a symbol, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind<L: Language> {
    Node(L::NodeKind),
    Token(L::TokenKind),
}

// ============================================================================
// LEAVES
// ============================================================================

impl<L: Language> SyntaxLeaf<L> {
    pub fn new(kind: L::TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn kind(&self) -> L::TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Printable name of this leaf's token kind.
    pub fn kind_name(&self) -> &'static str {
        L::token_kind_name(self.kind)
    }
}

// ============================================================================
// INTERIOR NODES
// ============================================================================

impl<L: Language> SyntaxNode<L> {
    /// Builds a node from already-decided child slots.
    pub fn new(kind: L::NodeKind, children: Vec<Option<Symbol<L>>>) -> Self {
        Self { kind, children }
    }

    pub fn kind(&self) -> L::NodeKind {
        self.kind
    }

    /// Printable name of this node's kind.
    pub fn kind_name(&self) -> &'static str {
        L::node_kind_name(self.kind)
    }

    /// Raw child slots, including empty ones.
    pub fn slots(&self) -> &[Option<Symbol<L>>] {
        &self.children
    }

    /// Present children in order; empty slots are skipped.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Symbol<L>> + '_ {
        self.children.iter().flatten()
    }

    /// Number of present children.
    pub fn child_count(&self) -> usize {
        self.children().count()
    }

    /// True when the node has no present children.
    pub fn is_empty(&self) -> bool {
        self.children().next().is_none()
    }

    /// Appends a child slot.
    pub fn push(&mut self, child: Option<Symbol<L>>) {
        self.children.push(child);
    }
}

// ============================================================================
// SYMBOLS
// ============================================================================

impl<L: Language> Symbol<L> {
    pub fn kind(&self) -> SymbolKind<L> {
        match self {
            Symbol::Leaf(leaf) => SymbolKind::Token(leaf.kind),
            Symbol::Node(node) => SymbolKind::Node(node.kind),
        }
    }

    /// Token kind name for leaves, node kind name for nodes.
    pub fn printable_name(&self) -> &'static str {
        match self {
            Symbol::Leaf(leaf) => leaf.kind_name(),
            Symbol::Node(node) => node.kind_name(),
        }
    }

    /// Literal text of a leaf; `None` for interior nodes.
    pub fn text(&self) -> Option<&str> {
        match self {
            Symbol::Leaf(leaf) => Some(leaf.text()),
            Symbol::Node(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&SyntaxLeaf<L>> {
        match self {
            Symbol::Leaf(leaf) => Some(leaf),
            Symbol::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&SyntaxNode<L>> {
        match self {
            Symbol::Leaf(_) => None,
            Symbol::Node(node) => Some(node),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Symbol::Leaf(_))
    }

    /// All leaves under this symbol, left to right.
    pub fn leaves(&self) -> Vec<&SyntaxLeaf<L>> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }

    /// Concatenated leaf text, separated by single spaces.
    pub fn source_text(&self) -> String {
        self.leaves()
            .iter()
            .map(|leaf| leaf.text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Compact one-line rendering: `Kind(child child)` for nodes, the text for leaves.
    pub fn pretty(&self) -> String {
        match self {
            Symbol::Leaf(leaf) => leaf.text().to_string(),
            Symbol::Node(node) => {
                let inner = node
                    .children()
                    .map(Symbol::pretty)
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{}({})", node.kind_name(), inner)
            }
        }
    }
}

impl<L: Language> fmt::Display for Symbol<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

impl<L: Language> From<SyntaxLeaf<L>> for Symbol<L> {
    fn from(leaf: SyntaxLeaf<L>) -> Self {
        Symbol::Leaf(leaf)
    }
}

impl<L: Language> From<SyntaxNode<L>> for Symbol<L> {
    fn from(node: SyntaxNode<L>) -> Self {
        Symbol::Node(node)
    }
}

fn collect_leaves<'a, L: Language>(symbol: &'a Symbol<L>, out: &mut Vec<&'a SyntaxLeaf<L>>) {
    match symbol {
        Symbol::Leaf(leaf) => out.push(leaf),
        Symbol::Node(node) => node.children().for_each(|child| collect_leaves(child, out)),
    }
}

// ============================================================================
// CONSTRUCTION PRIMITIVES
// ============================================================================

/// Builds an empty interior node of the given kind.
pub fn make_node<L: Language>(kind: L::NodeKind) -> SyntaxNode<L> {
    SyntaxNode::new(kind, Vec::new())
}

/// Appends `child` to a node under construction and hands the node back.
pub fn extend_node<L: Language>(mut node: SyntaxNode<L>, child: Symbol<L>) -> SyntaxNode<L> {
    node.push(Some(child));
    node
}

/// Builds a leaf symbol with an empty span.
pub fn make_leaf<L: Language>(kind: L::TokenKind, text: impl Into<String>) -> Symbol<L> {
    Symbol::Leaf(SyntaxLeaf::new(kind, text, Span::default()))
}
