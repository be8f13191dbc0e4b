//! JSON export of a tree, and conversion of exported JSON into DOT.
//!
//! Leaves become `{"tag": ..., "text": ...}`, nodes become
//! `{"tag": ..., "children": [...]}` with `null` for empty slots. A document
//! wraps one tree per file: `{"<file>": {"tree": {...}}}`.

use serde_json::{json, Map, Value};

use crate::errors::{FilterError, FilterResult};
use crate::render::dot::escape_label;
use crate::syntax::{Language, Symbol};

/// Converts a tree into its JSON form.
pub fn to_json<L: Language>(symbol: &Symbol<L>) -> Value {
    match symbol {
        Symbol::Leaf(leaf) => json!({
            "tag": leaf.kind_name(),
            "text": leaf.text(),
        }),
        Symbol::Node(node) => {
            let children: Vec<Value> = node
                .slots()
                .iter()
                .map(|slot| slot.as_ref().map_or(Value::Null, to_json))
                .collect();
            json!({
                "tag": node.kind_name(),
                "children": children,
            })
        }
    }
}

/// Wraps a tree in a per-file document.
pub fn to_json_document<L: Language>(name: &str, root: &Symbol<L>) -> Value {
    let mut doc = Map::new();
    doc.insert(name.to_string(), json!({ "tree": to_json(root) }));
    Value::Object(doc)
}

/// Converts an exported tree (or a document holding one) into DOT.
///
/// Ids are derived from child positions (`x`, `x_0`, `x_0_1`, ...). Labels are
/// `tag` or `tag : text`; symbols without `children` are drawn as boxes.
pub fn json_to_dot(value: &Value) -> FilterResult<String> {
    let root = tree_of(value)?;
    let tag = tag_of(root)?;

    let mut out = String::from("digraph tree {\nnode [shape=ellipse];\n");
    out.push_str(&format!("x [label=\"{}\"];\n", escape_label(tag)));
    if let Some(children) = root.get("children") {
        emit_children(children, "x", &mut out)?;
    }
    out.push_str("}\n");
    Ok(out)
}

fn tree_of(value: &Value) -> FilterResult<&Value> {
    if value.get("tag").is_some() {
        return Ok(value);
    }
    let first = value
        .as_object()
        .and_then(|doc| doc.values().next())
        .ok_or_else(|| FilterError::json_tree("expected a tree or a non-empty document"))?;
    first
        .get("tree")
        .ok_or_else(|| FilterError::json_tree("document entry has no `tree`"))
}

fn tag_of(value: &Value) -> FilterResult<&str> {
    value
        .get("tag")
        .and_then(Value::as_str)
        .ok_or_else(|| FilterError::json_tree(format!("symbol without a string `tag`: {}", value)))
}

fn emit_children(children: &Value, parent_id: &str, out: &mut String) -> FilterResult<()> {
    let children = children
        .as_array()
        .ok_or_else(|| FilterError::json_tree("`children` must be an array"))?;

    for (i, child) in children.iter().enumerate() {
        if child.is_null() {
            continue;
        }
        let id = format!("{}_{}", parent_id, i);
        let mut label = tag_of(child)?.to_string();
        if let Some(text) = child.get("text").and_then(Value::as_str) {
            label = format!("{} : {}", label, text);
        }
        let nested = child.get("children");
        let attributes = if nested.is_none() { " shape=box" } else { "" };

        out.push_str(&format!("{} [label=\"{}\"{}];\n", id, escape_label(&label), attributes));
        out.push_str(&format!("{} -> {};\n", parent_id, id));

        if let Some(nested) = nested {
            emit_children(nested, &id, out)?;
        }
    }
    Ok(())
}
