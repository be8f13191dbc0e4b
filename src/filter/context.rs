//! Ancestor-context patterns.
//!
//! The engine keeps the kinds of all ancestors of the current symbol, root
//! first and parent last. A [`ContextPattern`] restricts a rule to symbols
//! nested, directly or indirectly, inside a given sequence of kinds.
//!
//! Matching is a suffix-anchored subsequence scan: walking the ancestors from
//! the parent outward, each pattern element (taken from its last element
//! backward) must be found in order. Ancestors in between are skipped, so
//! `[Module, Function]` matches `[Program, Module, Body, Function, Block]`.
//! An empty pattern matches everywhere; a non-empty pattern never matches at
//! the root, where the live context is empty.

use std::fmt;

use crate::syntax::Language;

/// Ordered sequence of node kinds, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextPattern<L: Language> {
    kinds: Vec<L::NodeKind>,
}

impl<L: Language> Default for ContextPattern<L> {
    fn default() -> Self {
        Self::anywhere()
    }
}

impl<L: Language> ContextPattern<L> {
    /// The empty pattern: matches regardless of ancestry.
    pub fn anywhere() -> Self {
        Self { kinds: Vec::new() }
    }

    /// A pattern from outermost to innermost kind.
    pub fn new(kinds: impl IntoIterator<Item = L::NodeKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn kinds(&self) -> &[L::NodeKind] {
        &self.kinds
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// True when every pattern kind appears among `ancestors`, in order,
    /// scanning from the nearest ancestor outward.
    pub fn matches(&self, ancestors: &[L::NodeKind]) -> bool {
        let mut wanted = self.kinds.iter().rev().peekable();
        for kind in ancestors.iter().rev() {
            match wanted.peek() {
                Some(next) if *next == kind => {
                    wanted.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        wanted.peek().is_none()
    }
}

impl<L: Language> fmt::Display for ContextPattern<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.kinds.iter().map(|k| L::node_kind_name(*k)).collect();
        write!(f, "[{}]", names.join(" > "))
    }
}

impl<L: Language> FromIterator<L::NodeKind> for ContextPattern<L> {
    fn from_iter<I: IntoIterator<Item = L::NodeKind>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::sexpr::{NodeKind::*, Sexpr};

    fn pattern(kinds: &[crate::syntax::sexpr::NodeKind]) -> ContextPattern<Sexpr> {
        ContextPattern::new(kinds.iter().copied())
    }

    #[test]
    fn empty_pattern_matches_everywhere() {
        let p = ContextPattern::<Sexpr>::anywhere();
        assert!(p.matches(&[]));
        assert!(p.matches(&[Program, List]));
    }

    #[test]
    fn suffix_in_order_matches() {
        let p = pattern(&[List, Quote]);
        assert!(p.matches(&[Program, List, Quote]));
        assert!(p.matches(&[Program, Block, List, Quote]));
    }

    #[test]
    fn reversed_order_does_not_match() {
        let p = pattern(&[List, Quote]);
        assert!(!p.matches(&[Program, Quote, List]));
        assert!(!p.matches(&[List]));
    }

    #[test]
    fn intermediate_ancestors_are_skipped() {
        let p = pattern(&[Program, Quote]);
        assert!(p.matches(&[Program, List, Block, Quote, List]));
    }

    #[test]
    fn non_empty_pattern_fails_at_root() {
        assert!(!pattern(&[Program]).matches(&[]));
    }

    #[test]
    fn displays_names() {
        assert_eq!(pattern(&[Program, List]).to_string(), "[Program > List]");
    }
}
