//! Graphviz DOT rendering of a tree.
//!
//! Nodes get sequential ids in pre-order. The root is drawn filled black,
//! leaves are boxes, and each statement is indented by the depth of the
//! symbol it describes.

use std::fmt::Write;

use crate::render::terminal::leaf_label;
use crate::syntax::{Language, Symbol};

/// Renders `root` as a DOT digraph.
pub fn to_dot<L: Language>(root: &Symbol<L>) -> String {
    let mut printer = DotPrinter::default();
    printer.out.push_str("digraph syntax_tree {\n");
    printer.out.push_str("node [shape=ellipse];\n");
    printer.visit(root);
    printer.out.push_str("}\n");
    printer.out
}

/// Escapes a label for use inside a double-quoted DOT string.
pub fn escape_label(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Default)]
struct DotPrinter {
    out: String,
    parent_ids: Vec<usize>,
    next_id: usize,
}

impl DotPrinter {
    fn visit<L: Language>(&mut self, symbol: &Symbol<L>) {
        let id = self.next_id;
        self.next_id += 1;
        let indent = "\t".repeat(self.parent_ids.len());

        match symbol {
            Symbol::Leaf(leaf) => {
                let label = escape_label(&leaf_label(leaf.kind_name(), leaf.text()));
                let _ = writeln!(self.out, "{}{} [label=\"{}\" shape=box];", indent, id, label);
                self.edge(&indent, id);
            }
            Symbol::Node(node) => {
                let label = escape_label(node.kind_name());
                if self.parent_ids.is_empty() {
                    let _ = writeln!(
                        self.out,
                        "{} [label=\"{}\" fontcolor=white style=filled bgcolor=black];",
                        id, label
                    );
                } else {
                    let _ = writeln!(self.out, "{}{} [label=\"{}\"];", indent, id, label);
                    self.edge(&indent, id);
                }
                self.parent_ids.push(id);
                for child in node.children() {
                    self.visit(child);
                }
                self.parent_ids.pop();
            }
        }
    }

    fn edge(&mut self, indent: &str, id: usize) {
        if let Some(parent) = self.parent_ids.last() {
            let _ = writeln!(self.out, "{}{} -> {};", indent, parent, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::sexpr::parse;

    #[test]
    fn renders_ids_edges_and_styles() {
        let tree = parse("(a)").unwrap();
        let expected = concat!(
            "digraph syntax_tree {\n",
            "node [shape=ellipse];\n",
            "0 [label=\"Program\" fontcolor=white style=filled bgcolor=black];\n",
            "\t1 [label=\"List\"];\n",
            "\t0 -> 1;\n",
            "\t\t2 [label=\"LParen: (\" shape=box];\n",
            "\t\t1 -> 2;\n",
            "\t\t3 [label=\"Atom\"];\n",
            "\t\t1 -> 3;\n",
            "\t\t\t4 [label=\"Symbol: a\" shape=box];\n",
            "\t\t\t3 -> 4;\n",
            "\t\t5 [label=\"RParen: )\" shape=box];\n",
            "\t\t1 -> 5;\n",
            "}\n",
        );
        assert_eq!(to_dot(&tree), expected);
    }

    #[test]
    fn leaf_root_has_no_edge() {
        let tree = parse("x").unwrap();
        let atom = tree.as_node().unwrap().children().next().unwrap();
        let leaf = atom.as_node().unwrap().children().next().unwrap();
        let dot = to_dot(leaf);
        assert!(dot.contains("0 [label=\"Symbol: x\" shape=box];"));
        assert!(!dot.contains("->"));
    }

    #[test]
    fn labels_are_escaped() {
        assert_eq!(escape_label("String: \"hi\""), "String: \\\"hi\\\"");
    }
}
