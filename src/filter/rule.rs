//! Filtering rules.
//!
//! A [`Rule`] is a predicate over a symbol and its ancestor kinds, classified
//! once and for all as an inclusion or an exclusion. The rule vocabulary is
//! closed, so rules are a plain enum and evaluation is an exhaustive match.
//!
//! Rules own their selection sets. The sets are persistent `im` sets, so
//! cloning a rule (or a whole rule list built from a shared base) is cheap
//! and never aliases caller state.

use std::fmt;

use crate::filter::context::ContextPattern;
use crate::syntax::{Language, Symbol};

// ============================================================================
// RULE CLASS
// ============================================================================

/// Whether a matching rule votes to keep or to drop a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleClass {
    Inclusion,
    Exclusion,
}

impl fmt::Display for RuleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleClass::Inclusion => write!(f, "include"),
            RuleClass::Exclusion => write!(f, "exclude"),
        }
    }
}

// ============================================================================
// KIND SETS
// ============================================================================

/// A set of node kinds and token kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindSet<L: Language> {
    nodes: im::HashSet<L::NodeKind>,
    tokens: im::HashSet<L::TokenKind>,
}

impl<L: Language> Default for KindSet<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Language> KindSet<L> {
    pub fn new() -> Self {
        Self {
            nodes: im::HashSet::new(),
            tokens: im::HashSet::new(),
        }
    }

    /// Builds a set from node and token kinds.
    pub fn of(
        nodes: impl IntoIterator<Item = L::NodeKind>,
        tokens: impl IntoIterator<Item = L::TokenKind>,
    ) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
            tokens: tokens.into_iter().collect(),
        }
    }

    pub fn nodes(nodes: impl IntoIterator<Item = L::NodeKind>) -> Self {
        Self::of(nodes, [])
    }

    pub fn tokens(tokens: impl IntoIterator<Item = L::TokenKind>) -> Self {
        Self::of([], tokens)
    }

    /// Adds a node kind.
    pub fn with_node(mut self, kind: L::NodeKind) -> Self {
        self.nodes.insert(kind);
        self
    }

    /// Adds a token kind.
    pub fn with_token(mut self, kind: L::TokenKind) -> Self {
        self.tokens.insert(kind);
        self
    }

    pub fn contains_node(&self, kind: L::NodeKind) -> bool {
        self.nodes.contains(&kind)
    }

    pub fn contains_token(&self, kind: L::TokenKind) -> bool {
        self.tokens.contains(&kind)
    }

    /// True when the symbol's own kind is in the set.
    pub fn contains(&self, symbol: &Symbol<L>) -> bool {
        match symbol {
            Symbol::Leaf(leaf) => self.contains_token(leaf.kind()),
            Symbol::Node(node) => self.contains_node(node.kind()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.tokens.is_empty()
    }

    /// Union of two sets.
    pub fn union(self, other: Self) -> Self {
        Self {
            nodes: self.nodes.union(other.nodes),
            tokens: self.tokens.union(other.tokens),
        }
    }

    fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .nodes
            .iter()
            .map(|k| L::node_kind_name(*k))
            .chain(self.tokens.iter().map(|k| L::token_kind_name(*k)))
            .collect();
        names.sort_unstable();
        names
    }
}

// ============================================================================
// RULES
// ============================================================================

/// A declarative filtering rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule<L: Language> {
    /// Include symbols whose kind is in the set.
    SelectKinds {
        kinds: KindSet<L>,
        context: ContextPattern<L>,
    },
    /// Include leaves whose text, or nodes whose kind name, is in the set.
    SelectText {
        texts: im::HashSet<String>,
        context: ContextPattern<L>,
    },
    /// Include everything.
    SelectAll,
    /// Exclude symbols whose kind is in the set, optionally with their subtree.
    ExcludeKinds {
        kinds: KindSet<L>,
        context: ContextPattern<L>,
        delete_subtree: bool,
    },
}

impl<L: Language> Rule<L> {
    pub fn select_kinds(kinds: KindSet<L>) -> Self {
        Rule::SelectKinds {
            kinds,
            context: ContextPattern::anywhere(),
        }
    }

    pub fn select_text<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Rule::SelectText {
            texts: texts.into_iter().map(Into::into).collect(),
            context: ContextPattern::anywhere(),
        }
    }

    pub fn select_all() -> Self {
        Rule::SelectAll
    }

    pub fn exclude_kinds(kinds: KindSet<L>, delete_subtree: bool) -> Self {
        Rule::ExcludeKinds {
            kinds,
            context: ContextPattern::anywhere(),
            delete_subtree,
        }
    }

    /// Restricts the rule to the given ancestor pattern.
    ///
    /// `SelectAll` matches unconditionally and is returned unchanged.
    pub fn within(self, pattern: ContextPattern<L>) -> Self {
        match self {
            Rule::SelectKinds { kinds, .. } => Rule::SelectKinds {
                kinds,
                context: pattern,
            },
            Rule::SelectText { texts, .. } => Rule::SelectText {
                texts,
                context: pattern,
            },
            Rule::SelectAll => Rule::SelectAll,
            Rule::ExcludeKinds {
                kinds,
                delete_subtree,
                ..
            } => Rule::ExcludeKinds {
                kinds,
                context: pattern,
                delete_subtree,
            },
        }
    }

    pub fn class(&self) -> RuleClass {
        match self {
            Rule::SelectKinds { .. } | Rule::SelectText { .. } | Rule::SelectAll => {
                RuleClass::Inclusion
            }
            Rule::ExcludeKinds { .. } => RuleClass::Exclusion,
        }
    }

    pub fn is_inclusion(&self) -> bool {
        self.class() == RuleClass::Inclusion
    }

    pub fn is_exclusion(&self) -> bool {
        self.class() == RuleClass::Exclusion
    }

    /// The ancestor pattern the rule is restricted to; `None` for `SelectAll`.
    pub fn context(&self) -> Option<&ContextPattern<L>> {
        match self {
            Rule::SelectKinds { context, .. }
            | Rule::SelectText { context, .. }
            | Rule::ExcludeKinds { context, .. } => Some(context),
            Rule::SelectAll => None,
        }
    }

    /// True for exclusions that also remove everything beneath the match.
    pub fn deletes_subtree(&self) -> bool {
        matches!(
            self,
            Rule::ExcludeKinds {
                delete_subtree: true,
                ..
            }
        )
    }

    /// Evaluates the rule on a symbol whose ancestor kinds are `ancestors`
    /// (root first, parent last, the symbol's own kind excluded).
    pub fn evaluate(&self, symbol: &Symbol<L>, ancestors: &[L::NodeKind]) -> bool {
        match self {
            Rule::SelectAll => true,
            Rule::SelectKinds { kinds, context } | Rule::ExcludeKinds { kinds, context, .. } => {
                kinds.contains(symbol) && context.matches(ancestors)
            }
            Rule::SelectText { texts, context } => {
                let text = symbol.text().unwrap_or_else(|| symbol.printable_name());
                texts.contains(text) && context.matches(ancestors)
            }
        }
    }
}

impl<L: Language> fmt::Display for Rule<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::SelectAll => return write!(f, "include all"),
            Rule::SelectKinds { kinds, .. } => {
                write!(f, "include kinds {{{}}}", kinds.names().join(", "))?
            }
            Rule::SelectText { texts, .. } => {
                let mut texts: Vec<_> = texts.iter().map(String::as_str).collect();
                texts.sort_unstable();
                write!(f, "include text {{{}}}", texts.join(", "))?
            }
            Rule::ExcludeKinds {
                kinds,
                delete_subtree,
                ..
            } => {
                write!(f, "exclude kinds {{{}}}", kinds.names().join(", "))?;
                if *delete_subtree {
                    write!(f, " with subtree")?;
                }
            }
        }
        match self.context() {
            Some(context) if !context.is_empty() => write!(f, " within {}", context),
            _ => Ok(()),
        }
    }
}
