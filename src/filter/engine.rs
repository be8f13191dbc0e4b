//! The filtering engine.
//!
//! [`TreeFilter`] walks the input tree once, depth first, and decides every
//! symbol after its children have been decided. Each visit returns an
//! [`Outcome`] describing what the symbol hands to its parent:
//!
//! - `Kept`: exactly one fragment rooted at a rebuilt copy of the symbol,
//! - `Spliced`: the symbol itself is elided and its children's fragments
//!   (zero or more, in order) attach to the parent directly,
//! - `Dropped`: nothing at all.
//!
//! Node resolution:
//!
//! | CanKeep | MustKeep or >= 2 fragments | Result |
//! |---|---|---|
//! | `NoDeleteSubtree` | any | `Dropped` |
//! | `No` | any | `Spliced` |
//! | `Yes` | true | `Kept` |
//! | `Yes` | false | `Spliced` (unary collapse) |
//!
//! A leaf is `Kept` iff MustKeep holds for it, `Dropped` otherwise.
//!
//! Subtree deletion is decided before descending: rule evaluation only
//! depends on the symbol and its ancestors, so the children never need to
//! be visited.

use crate::errors::{FilterError, FilterResult};
use crate::filter::rule::Rule;
use crate::filter::trace::{Decision, FilterTrace, TraceEvent};
use crate::syntax::{extend_node, make_node, Language, Symbol, SyntaxNode};

// ============================================================================
// DECISION TYPES
// ============================================================================

/// Verdict of the exclusion rules on one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanKeep {
    /// No exclusion rule matched.
    Yes,
    /// An exclusion rule matched; the symbol is elided.
    No,
    /// An exclusion rule with subtree deletion matched.
    NoDeleteSubtree,
}

/// What a visited symbol contributes to its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<L: Language> {
    Kept(Symbol<L>),
    Spliced(Vec<Symbol<L>>),
    Dropped,
}

impl<L: Language> Outcome<L> {
    /// Number of fragments handed to the parent.
    pub fn fragment_count(&self) -> usize {
        match self {
            Outcome::Kept(_) => 1,
            Outcome::Spliced(fragments) => fragments.len(),
            Outcome::Dropped => 0,
        }
    }

    fn append_to(self, fragments: &mut Vec<Symbol<L>>) {
        match self {
            Outcome::Kept(symbol) => fragments.push(symbol),
            Outcome::Spliced(mut spliced) => fragments.append(&mut spliced),
            Outcome::Dropped => {}
        }
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// A single filtering pass over one tree.
///
/// The filter borrows its rules and owns only the ancestor-kind stack; it can
/// be reused for several trees, one at a time.
pub struct TreeFilter<'r, 't, L: Language> {
    rules: &'r [Rule<L>],
    context: Vec<L::NodeKind>,
    trace: Option<&'t mut FilterTrace>,
}

impl<'r, L: Language> TreeFilter<'r, 'static, L> {
    pub fn new(rules: &'r [Rule<L>]) -> Self {
        Self {
            rules,
            context: Vec::new(),
            trace: None,
        }
    }
}

impl<'r, 't, L: Language> TreeFilter<'r, 't, L> {
    /// A filter that records every decision into `trace`.
    pub fn with_trace(rules: &'r [Rule<L>], trace: &'t mut FilterTrace) -> Self {
        Self {
            rules,
            context: Vec::new(),
            trace: Some(trace),
        }
    }

    /// Kinds of the ancestors of the symbol being decided, root first.
    pub fn context(&self) -> &[L::NodeKind] {
        &self.context
    }

    /// Filters `root` and returns the single surviving root.
    ///
    /// Fails when nothing survives, or when the root is elided while two or
    /// more fragments survive beneath it.
    pub fn run(&mut self, root: &Symbol<L>) -> FilterResult<Symbol<L>> {
        self.context.clear();
        tracing::debug!(
            rules = self.rules.len(),
            root = root.printable_name(),
            "filtering tree"
        );

        let outcome = self.visit(root);
        debug_assert!(self.context.is_empty(), "ancestor stack not unwound");

        match outcome {
            Outcome::Kept(symbol) => Ok(symbol),
            Outcome::Spliced(fragments) => {
                let count = fragments.len();
                let mut fragments = fragments.into_iter();
                match (fragments.next(), count) {
                    (Some(only), 1) => Ok(only),
                    (None, _) => Err(FilterError::NoSurvivingRoot {
                        root: root.printable_name().to_string(),
                    }),
                    _ => Err(FilterError::DetachedFragments {
                        root: root.printable_name().to_string(),
                        count,
                    }),
                }
            }
            Outcome::Dropped => Err(FilterError::NoSurvivingRoot {
                root: root.printable_name().to_string(),
            }),
        }
    }

    /// True iff some inclusion rule matches and no exclusion rule does.
    pub fn must_keep(&self, symbol: &Symbol<L>) -> bool {
        let mut included = false;
        let mut excluded = false;
        for rule in self.rules {
            if rule.is_inclusion() {
                included |= rule.evaluate(symbol, &self.context);
            } else {
                excluded |= rule.evaluate(symbol, &self.context);
            }
        }
        included && !excluded
    }

    /// Verdict of the exclusion rules. Stops at the first matching rule that
    /// deletes its subtree.
    pub fn can_keep(&self, symbol: &Symbol<L>) -> CanKeep {
        let mut excluded = false;
        for rule in self.rules.iter().filter(|r| r.is_exclusion()) {
            if rule.evaluate(symbol, &self.context) {
                if rule.deletes_subtree() {
                    return CanKeep::NoDeleteSubtree;
                }
                excluded = true;
            }
        }
        if excluded {
            CanKeep::No
        } else {
            CanKeep::Yes
        }
    }

    /// Decides one symbol and everything beneath it.
    pub fn visit(&mut self, symbol: &Symbol<L>) -> Outcome<L> {
        match symbol {
            Symbol::Leaf(_) => {
                if self.must_keep(symbol) {
                    self.record(symbol, Decision::KeptLeaf, 1);
                    Outcome::Kept(symbol.clone())
                } else {
                    self.record(symbol, Decision::DroppedLeaf, 0);
                    Outcome::Dropped
                }
            }
            Symbol::Node(node) => self.visit_node(symbol, node),
        }
    }

    fn visit_node(&mut self, symbol: &Symbol<L>, node: &SyntaxNode<L>) -> Outcome<L> {
        let verdict = self.can_keep(symbol);
        if verdict == CanKeep::NoDeleteSubtree {
            self.record(symbol, Decision::DeletedSubtree, 0);
            return Outcome::Dropped;
        }

        self.context.push(node.kind());
        let mut fragments = Vec::new();
        for child in node.children() {
            self.visit(child).append_to(&mut fragments);
        }
        self.context.pop();

        if verdict == CanKeep::No {
            self.record(symbol, Decision::Excluded, fragments.len());
            return Outcome::Spliced(fragments);
        }

        if self.must_keep(symbol) || fragments.len() >= 2 {
            self.record(symbol, Decision::Materialized, 1);
            let rebuilt = fragments.into_iter().fold(make_node(node.kind()), extend_node);
            Outcome::Kept(Symbol::Node(rebuilt))
        } else {
            self.record(symbol, Decision::Collapsed, fragments.len());
            Outcome::Spliced(fragments)
        }
    }

    fn record(&mut self, symbol: &Symbol<L>, decision: Decision, fragments: usize) {
        let depth = self.context.len();
        tracing::trace!(
            depth,
            name = symbol.printable_name(),
            decision = decision.as_str(),
            fragments,
            "decided symbol"
        );
        if let Some(trace) = self.trace.as_deref_mut() {
            trace.record(TraceEvent {
                depth,
                name: symbol.printable_name().to_string(),
                text: symbol.text().map(str::to_string),
                decision,
                fragments,
            });
        }
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Filters `root` with `rules` and returns the newly built tree.
///
/// # Examples
///
/// ```rust
/// use cst_filter::filter::{filter, KindSet, Rule};
/// use cst_filter::syntax::sexpr::{parse, TokenKind};
///
/// let tree = parse("(+ a b)").unwrap();
/// let rules = vec![Rule::select_kinds(KindSet::tokens([TokenKind::Symbol]))];
/// let filtered = filter(&tree, &rules).unwrap();
/// assert_eq!(filtered.pretty(), "List(+ a b)");
/// ```
pub fn filter<L: Language>(root: &Symbol<L>, rules: &[Rule<L>]) -> FilterResult<Symbol<L>> {
    TreeFilter::new(rules).run(root)
}

/// Like [`filter`], recording every decision into `trace`.
pub fn filter_traced<L: Language>(
    root: &Symbol<L>,
    rules: &[Rule<L>],
    trace: &mut FilterTrace,
) -> FilterResult<Symbol<L>> {
    TreeFilter::with_trace(rules, trace).run(root)
}
