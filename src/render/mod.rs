//! Renderers for original and filtered trees.

use clap::ValueEnum;

use crate::syntax::{Language, Symbol};

pub mod dot;
pub mod json;
pub mod terminal;

pub use dot::to_dot;
pub use json::{json_to_dot, to_json, to_json_document};
pub use terminal::to_terminal_text;

/// Output format selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Indented tree with connectors.
    #[default]
    Terminal,
    /// Graphviz digraph.
    Dot,
    /// Pretty-printed JSON.
    Json,
}

/// Renders `root` in the requested format.
pub fn render<L: Language>(root: &Symbol<L>, format: Format) -> String {
    match format {
        Format::Terminal => to_terminal_text(root),
        Format::Dot => to_dot(root),
        Format::Json => {
            // Serializing a `Value` cannot fail.
            serde_json::to_string_pretty(&to_json(root)).unwrap_or_default()
        }
    }
}
