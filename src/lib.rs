//! cst-filter derives focused views of concrete syntax trees.
//!
//! A caller supplies a parsed tree and an ordered list of [`Rule`]s. The
//! engine walks the tree once and builds a new tree holding only what the
//! rules select, keeping left-to-right order and collapsing wrapper nodes
//! that no longer group anything.
//!
//! ```rust
//! use cst_filter::{filter, KindSet, Rule};
//! use cst_filter::syntax::sexpr::{parse, NodeKind, TokenKind};
//!
//! let tree = parse("(define (square x) (* x x))").unwrap();
//! let rules = vec![
//!     Rule::select_kinds(KindSet::tokens([TokenKind::Symbol])),
//!     Rule::exclude_kinds(KindSet::nodes([NodeKind::Atom]), false),
//! ];
//! let view = filter(&tree, &rules).unwrap();
//! assert_eq!(view.pretty(), "List(define List(square x) List(* x x))");
//! ```

pub use crate::errors::{FilterError, FilterResult};
pub use crate::filter::{filter, filter_traced, ContextPattern, KindSet, Rule, RuleClass, TreeFilter};
pub use crate::syntax::{Language, Symbol, SyntaxLeaf, SyntaxNode};

pub mod cli;
pub mod collect;
pub mod config;
pub mod errors;
pub mod filter;
pub mod render;
pub mod syntax;
