//! Rule-driven tree filtering.
//!
//! Callers assemble a list of [`Rule`]s and hand it, together with a tree,
//! to [`filter`]. The result is a new, independently owned tree holding only
//! the selected symbols, with unary wrapper chains collapsed.

pub mod context;
pub mod engine;
pub mod rule;
pub mod trace;

pub use context::ContextPattern;
pub use engine::{filter, filter_traced, CanKeep, Outcome, TreeFilter};
pub use rule::{KindSet, Rule, RuleClass};
pub use trace::{Decision, FilterTrace, TraceEvent};
