//! Unconditional collection of symbols by kind.
//!
//! Unlike filtering, collection does not rebuild anything: it returns
//! references into the input tree, in pre-order, for every symbol whose kind
//! is in the requested set. A collected node's descendants are still visited,
//! so nested matches are reported too.

use crate::filter::KindSet;
use crate::syntax::{Language, Symbol};

/// Collects every symbol under `root` (inclusive) whose kind is in `kinds`.
pub fn collect<'a, L: Language>(root: &'a Symbol<L>, kinds: &KindSet<L>) -> Vec<&'a Symbol<L>> {
    let mut collected = Vec::new();
    visit(root, kinds, &mut collected);
    collected
}

fn visit<'a, L: Language>(symbol: &'a Symbol<L>, kinds: &KindSet<L>, out: &mut Vec<&'a Symbol<L>>) {
    if kinds.contains(symbol) {
        out.push(symbol);
    }
    if let Symbol::Node(node) = symbol {
        for child in node.children() {
            visit(child, kinds, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::sexpr::{parse, NodeKind, TokenKind};

    #[test]
    fn collects_in_pre_order() {
        let tree = parse("(a (b) 'c)").unwrap();
        let lists = collect(&tree, &KindSet::nodes([NodeKind::List]));
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].source_text(), "( a ( b ) ' c )");
        assert_eq!(lists[1].source_text(), "( b )");
    }

    #[test]
    fn collects_nodes_and_tokens_together() {
        let tree = parse("(a 'b 1)").unwrap();
        let found: Vec<_> = collect(&tree, &KindSet::of([NodeKind::Quote], [TokenKind::Symbol]))
            .into_iter()
            .map(|s| s.printable_name())
            .collect();
        assert_eq!(found, vec!["Symbol", "Quote", "Symbol"]);
    }

    #[test]
    fn empty_set_collects_nothing() {
        let tree = parse("(a)").unwrap();
        assert!(collect(&tree, &KindSet::new()).is_empty());
    }
}
