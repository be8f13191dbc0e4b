//! Indented terminal rendering of a tree.
//!
//! ```text
//! `--> List
//!           |
//!           |`--> LParen: (
//!           |
//!            `--> Symbol: a
//! ```
//!
//! Every entry is followed by one spacer line. The vertical bar of a level is
//! closed before its last child is printed.

use crate::syntax::{Language, Symbol};

const VERTICAL_CONNECTOR: char = '|';
const HORIZONTAL_CONNECTOR: &str = "`--> ";
const VERTICAL_SPACE_BETWEEN_NODES: usize = 1;
const INDENT_WIDTH: usize = 10;

/// Renders `root` as an indented tree.
pub fn to_terminal_text<L: Language>(root: &Symbol<L>) -> String {
    let mut printer = TerminalPrinter::default();
    printer.visit(root);
    printer.out
}

/// Label of a leaf: the text alone when it equals the kind name.
pub(crate) fn leaf_label(kind_name: &str, text: &str) -> String {
    if kind_name == text {
        text.to_string()
    } else {
        format!("{}: {}", kind_name, text)
    }
}

#[derive(Default)]
struct TerminalPrinter {
    out: String,
    edges: String,
}

impl TerminalPrinter {
    fn visit<L: Language>(&mut self, symbol: &Symbol<L>) {
        match symbol {
            Symbol::Leaf(leaf) => {
                let label = leaf_label(leaf.kind_name(), leaf.text());
                self.line(&format!("{}{}", HORIZONTAL_CONNECTOR, label));
                self.spacer();
            }
            Symbol::Node(node) => {
                self.line(&format!("{}{}", HORIZONTAL_CONNECTOR, node.kind_name()));
                if node.is_empty() {
                    return;
                }
                let level = INDENT_WIDTH + 1;
                self.edges.push_str(&" ".repeat(INDENT_WIDTH));
                self.edges.push(VERTICAL_CONNECTOR);
                self.spacer();

                let children: Vec<_> = node.children().collect();
                let last = children.len() - 1;
                for (i, child) in children.into_iter().enumerate() {
                    if i == last {
                        let keep = self.edges.len() - level;
                        self.edges.truncate(keep);
                        self.edges.push_str(&" ".repeat(level));
                    }
                    self.visit(child);
                }

                let keep = self.edges.len() - level;
                self.edges.truncate(keep);
            }
        }
    }

    fn line(&mut self, content: &str) {
        self.out.push_str(&self.edges);
        self.out.push_str(content);
        self.out.push('\n');
    }

    fn spacer(&mut self) {
        for _ in 0..VERTICAL_SPACE_BETWEEN_NODES {
            self.out.push_str(&self.edges);
            self.out.push('\n');
        }
    }
}
