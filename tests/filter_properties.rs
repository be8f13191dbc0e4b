// tests/filter_properties.rs
//
// Behavioural properties of the filtering engine on hand-built and parsed
// trees: order preservation, collapsing, exclusion precedence, context
// suffix matching and the single-root guarantee.

use std::thread;

use cst_filter::filter::{Decision, FilterTrace};
use cst_filter::syntax::sexpr::{parse, NodeKind, Sexpr, TokenKind};
use cst_filter::syntax::{make_leaf, Symbol, SyntaxNode};
use cst_filter::{filter, filter_traced, ContextPattern, FilterError, KindSet, Rule};

// ---
// Helpers
// ---

fn node(kind: NodeKind, children: Vec<Symbol<Sexpr>>) -> Symbol<Sexpr> {
    Symbol::Node(SyntaxNode::new(kind, children.into_iter().map(Some).collect()))
}

fn ident(text: &str) -> Symbol<Sexpr> {
    make_leaf(TokenKind::Symbol, text)
}

fn punct(text: &str) -> Symbol<Sexpr> {
    make_leaf(TokenKind::QuoteMark, text)
}

fn leaf_texts(symbol: &Symbol<Sexpr>) -> Vec<String> {
    symbol.leaves().iter().map(|l| l.text().to_string()).collect()
}

fn is_subsequence(needle: &[String], haystack: &[String]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|n| rest.any(|h| h == n))
}

/// The input with empty slots removed.
fn without_empty_slots(symbol: &Symbol<Sexpr>) -> Symbol<Sexpr> {
    match symbol {
        Symbol::Leaf(_) => symbol.clone(),
        Symbol::Node(n) => node(n.kind(), n.children().map(without_empty_slots).collect()),
    }
}

fn select_symbols() -> Rule<Sexpr> {
    Rule::select_kinds(KindSet::tokens([TokenKind::Symbol]))
}

const SOURCES: &[&str] = &[
    "(define (square x) (* x x))",
    "{let ((a 1) (b 2)) (+ a b)}",
    "(if (> n 0) 'positive \"no\")",
    "(a (b (c (d e))) f)",
    "x",
];

// ---
// Scenarios
// ---

#[test]
fn scenario_two_identifiers_materialize_their_parent() {
    let tree = node(NodeKind::List, vec![ident("a"), punct("+"), ident("b")]);
    let out = filter(&tree, &[select_symbols()]).unwrap();
    assert_eq!(out, node(NodeKind::List, vec![ident("a"), ident("b")]));
}

#[test]
fn scenario_deleting_the_root_leaves_nothing() {
    let tree = node(NodeKind::List, vec![ident("a"), punct("+"), ident("b")]);
    let rules = vec![
        select_symbols(),
        Rule::exclude_kinds(KindSet::nodes([NodeKind::List]), true),
    ];
    let err = filter(&tree, &rules).unwrap_err();
    assert!(matches!(err, FilterError::NoSurvivingRoot { .. }));
}

#[test]
fn scenario_unary_chain_yields_the_bare_leaf() {
    let tree = node(NodeKind::Program, vec![node(NodeKind::Quote, vec![ident("v")])]);
    let out = filter(&tree, &[select_symbols()]).unwrap();
    assert_eq!(out, ident("v"));
}

// ---
// Properties
// ---

#[test]
fn retained_leaves_keep_their_input_order() {
    let rule_sets: Vec<Vec<Rule<Sexpr>>> = vec![
        vec![select_symbols()],
        vec![Rule::select_kinds(KindSet::tokens([TokenKind::Number, TokenKind::Symbol]))],
        vec![Rule::select_all(), Rule::exclude_kinds(KindSet::tokens([TokenKind::LParen]), false)],
        vec![
            select_symbols(),
            Rule::exclude_kinds(KindSet::nodes([NodeKind::Quote]), true),
        ],
    ];
    for source in SOURCES {
        let tree = parse(source).unwrap();
        let input = leaf_texts(&tree);
        for rules in &rule_sets {
            if let Ok(out) = filter(&tree, rules) {
                let output = leaf_texts(&out);
                assert!(
                    is_subsequence(&output, &input),
                    "{:?} is not an ordered subsequence of {:?}",
                    output,
                    input
                );
            }
        }
    }
}

#[test]
fn select_all_reproduces_the_input() {
    for source in SOURCES {
        let tree = parse(source).unwrap();
        let out = filter(&tree, &[Rule::select_all()]).unwrap();
        assert_eq!(out, tree, "select-all changed {}", source);
    }

    let sparse = Symbol::Node(SyntaxNode::new(
        NodeKind::List,
        vec![None, Some(ident("a")), None, Some(node(NodeKind::Atom, vec![ident("b")]))],
    ));
    let out = filter(&sparse, &[Rule::select_all()]).unwrap();
    assert_eq!(out, without_empty_slots(&sparse));
}

#[test]
fn subtree_deletion_dominates_inclusion_below() {
    let tree = parse("(keep 'dropped (also 'gone) kept)").unwrap();
    let rules = vec![
        select_symbols(),
        Rule::select_text(["dropped", "gone"]),
        Rule::exclude_kinds(KindSet::nodes([NodeKind::Quote]), true),
    ];
    let out = filter(&tree, &rules).unwrap();
    let texts = leaf_texts(&out);
    assert_eq!(texts, vec!["keep", "also", "kept"]);
}

#[test]
fn plain_exclusion_splices_children_into_the_grandparent() {
    let tree = parse("(a (b c) d)").unwrap();
    let rules = vec![
        select_symbols(),
        Rule::exclude_kinds(KindSet::nodes([NodeKind::List]), false)
            .within(ContextPattern::new([NodeKind::List])),
    ];
    let out = filter(&tree, &rules).unwrap();
    assert_eq!(out.pretty(), "List(a b c d)");
}

#[test]
fn context_patterns_match_ancestor_suffixes_in_order() {
    // Quote inside List: `[List, Quote]` matches the symbol under the quote.
    let tree = parse("(f 'x) '(g y)").unwrap();
    let rules: Vec<Rule<Sexpr>> = vec![Rule::select_kinds(KindSet::tokens([TokenKind::Symbol]))
        .within(ContextPattern::new([NodeKind::List, NodeKind::Quote]))];
    let out = filter(&tree, &rules).unwrap();
    assert_eq!(leaf_texts(&out), vec!["x"]);

    // Reversed nesting: `[Quote, List]` only matches inside a quoted list.
    let rules: Vec<Rule<Sexpr>> = vec![Rule::select_kinds(KindSet::tokens([TokenKind::Symbol]))
        .within(ContextPattern::new([NodeKind::Quote, NodeKind::List]))];
    let out = filter(&tree, &rules).unwrap();
    assert_eq!(out.pretty(), "List(g y)");
}

#[test]
fn context_patterns_never_match_at_the_root() {
    let tree = node(NodeKind::List, vec![ident("a"), ident("b")]);
    let rules = vec![
        select_symbols(),
        Rule::select_kinds(KindSet::nodes([NodeKind::List]))
            .within(ContextPattern::new([NodeKind::Program])),
    ];
    let mut trace = FilterTrace::new();
    filter_traced(&tree, &rules, &mut trace).unwrap();
    // The root is materialized for its two children, not because it matched.
    assert_eq!(trace.count(Decision::Materialized), 1);
    let lone = node(NodeKind::List, vec![ident("a")]);
    assert_eq!(filter(&lone, &rules).unwrap(), ident("a"));
}

#[test]
fn every_successful_pass_returns_one_root() {
    for source in SOURCES {
        let tree = parse(source).unwrap();
        assert!(filter(&tree, &[select_symbols()]).is_ok(), "{}", source);
        let rule_sets: [Vec<Rule<Sexpr>>; 2] = [
            vec![Rule::select_kinds(KindSet::nodes([NodeKind::Program]))],
            vec![Rule::select_text(["Program", "x"])],
        ];
        for rules in rule_sets {
            let out = filter(&tree, &rules).unwrap();
            assert_eq!(out.as_node().map(|n| n.kind()), Some(NodeKind::Program));
        }
    }
}

#[test]
fn select_text_keeps_named_nodes_even_when_empty() {
    let tree = parse("(a) {b}").unwrap();
    let out = filter(&tree, &[Rule::select_text(["Block"])]).unwrap();
    assert_eq!(out.pretty(), "Block()");
}

#[test]
fn concurrent_passes_share_the_input() {
    let tree = parse(SOURCES[0]).unwrap();
    let symbols = vec![select_symbols()];
    let lists: Vec<Rule<Sexpr>> = vec![Rule::select_kinds(KindSet::nodes([NodeKind::List]))];
    let (a, b) = thread::scope(|s| {
        let a = s.spawn(|| filter(&tree, &symbols));
        let b = s.spawn(|| filter(&tree, &lists));
        (a.join().unwrap(), b.join().unwrap())
    });
    assert_eq!(a.unwrap().pretty(), "List(define List(square x) List(* x x))");
    assert_eq!(b.unwrap().pretty(), "List(List() List())");
}
