use code2text_core::SyntaxNode;
use code2text_core::sexp::{SexpQuery, SexpTree};
use indexmap::IndexMap;

use crate::capture::{Binding, Bindings, CaptureTable, RootRole};
use crate::pattern::{Alternative, HtmlList, ListForm, OutputSpec, Pattern, satisfies};

fn query(source: &str) -> SexpQuery {
    SexpQuery::new(source).expect("query compile failed")
}

fn alternative(condition: &[&str], template: &str) -> Alternative {
    Alternative {
        condition: condition.iter().map(|name| name.to_string()).collect(),
        template: template.to_owned(),
        list_forms: IndexMap::new(),
    }
}

fn names<N>(bindings: &Bindings<N>) -> Vec<&str> {
    bindings.keys().map(String::as_str).collect()
}

#[test]
fn template_output_always_selected() {
    let pattern = Pattern::new(query("(a) @root"), OutputSpec::Template("t".into()));
    let selection = pattern
        .resolve_output::<()>(&IndexMap::new())
        .expect("template is unconditional");
    assert_eq!(selection.template, "t");
    assert!(selection.list_forms.is_none());
}

#[test]
fn first_satisfied_alternative_wins() {
    let output = OutputSpec::Alternatives(vec![
        alternative(&["x", "y"], "both"),
        alternative(&["x"], "x only"),
        alternative(&[], "neither"),
    ]);
    let pattern = Pattern::new(query("(a) @root"), output);

    let mut bindings: Bindings<u8> = IndexMap::new();
    assert_eq!(
        pattern.resolve_output(&bindings).map(|s| s.template),
        Some("neither")
    );

    bindings.insert("x".into(), Binding::Scalar(1));
    assert_eq!(
        pattern.resolve_output(&bindings).map(|s| s.template),
        Some("x only")
    );

    bindings.insert("y".into(), Binding::Scalar(2));
    assert_eq!(
        pattern.resolve_output(&bindings).map(|s| s.template),
        Some("both")
    );
}

#[test]
fn no_satisfied_alternative_selects_nothing() {
    let output = OutputSpec::Alternatives(vec![alternative(&["x"], "x")]);
    let pattern = Pattern::new(query("(a) @root"), output);
    assert!(pattern.resolve_output::<u8>(&IndexMap::new()).is_none());
}

#[test]
fn empty_condition_is_satisfied() {
    assert!(satisfies::<u8>(&[], &IndexMap::new()));
}

#[test]
fn list_bindings_accumulate_in_order() {
    let tree = SexpTree::parse(r#"(args (arg "x") (arg "y") (arg "x"))"#).expect("parse failed");
    let pattern = Pattern::new(
        query("(args (arg)* @item_list) @root"),
        OutputSpec::Template("{item_list}".into()),
    );
    let mut table = CaptureTable::new();
    pattern.match_tree(&tree.root(), &mut table);

    let capture = table.get(tree.root().id()).expect("args captured");
    assert_eq!(capture.role(), RootRole::Rendered);
    assert_eq!(names(capture.bindings()), vec!["item_list"]);

    let Binding::Sequence(items) = &capture.bindings()["item_list"] else {
        panic!("expected a sequence");
    };
    let texts: Vec<_> = items.iter().map(|node| node.text()).collect();
    assert_eq!(texts, vec!["x", "y", "x"]);
}

#[test]
fn scalar_binding_keeps_last_node() {
    let tree = SexpTree::parse(r#"(pair (item "a") (item "b"))"#).expect("parse failed");
    let pattern = Pattern::new(
        query("(pair (item) @v (item) @v) @root"),
        OutputSpec::Template("{v}".into()),
    );
    let mut table = CaptureTable::new();
    pattern.match_tree(&tree.root(), &mut table);

    let capture = table.get(tree.root().id()).expect("pair captured");
    let Binding::Scalar(node) = &capture.bindings()["v"] else {
        panic!("expected a scalar");
    };
    assert_eq!(node.text(), "b");
}

#[test]
fn root_text_sets_text_role() {
    let tree = SexpTree::parse(r#"(num "1")"#).expect("parse failed");
    let pattern = Pattern::new(query("(num) @root_text"), OutputSpec::Template(String::new()));
    let mut table = CaptureTable::new();
    pattern.match_tree(&tree.root(), &mut table);

    let capture = table.get(tree.root().id()).expect("num captured");
    assert_eq!(capture.role(), RootRole::Text);
    assert!(capture.bindings().is_empty());
}

#[test]
fn root_takes_precedence_over_root_text() {
    let tree = SexpTree::parse(r#"(pair (num "1"))"#).expect("parse failed");
    let pattern = Pattern::new(
        query("(pair (num) @root_text) @root"),
        OutputSpec::Template(String::new()),
    );
    let mut table = CaptureTable::new();
    pattern.match_tree(&tree.root(), &mut table);

    let capture = table.get(tree.root().id()).expect("pair captured");
    assert_eq!(capture.role(), RootRole::Rendered);
    assert_eq!(names(capture.bindings()), vec!["root_text"]);
}

#[test]
fn first_registration_wins() {
    let tree = SexpTree::parse(r#"(num "1")"#).expect("parse failed");
    let first = Pattern::new(query("(num) @root"), OutputSpec::Template("first".into()));
    let second = Pattern::new(query("(num) @root"), OutputSpec::Template("second".into()));

    let mut table = CaptureTable::new();
    first.match_tree(&tree.root(), &mut table);
    second.match_tree(&tree.root(), &mut table);

    assert_eq!(table.len(), 1);
    let capture = table.get(tree.root().id()).expect("num captured");
    assert_eq!(capture.template(), Some("first"));
}

#[test]
fn ancestor_limits_matches_to_scopes() {
    let tree = SexpTree::parse(r#"(module (id "a") (fn (id "b") (fn (id "c"))))"#)
        .expect("parse failed");
    let pattern = Pattern::new(query("(id) @root"), OutputSpec::Template("local".into()))
        .with_ancestor(query("(fn) @root"));

    let mut table = CaptureTable::new();
    pattern.match_tree(&tree.root(), &mut table);

    let outer_id = tree.root().children()[0];
    assert!(!table.contains(outer_id.id()));
    assert_eq!(table.len(), 2);
}

#[test]
fn ancestor_without_root_binding_scopes_nothing() {
    let tree = SexpTree::parse(r#"(fn (id "a"))"#).expect("parse failed");
    let pattern = Pattern::new(query("(id) @root"), OutputSpec::Template("x".into()))
        .with_ancestor(query("(fn) @scope"));

    let mut table = CaptureTable::new();
    pattern.match_tree(&tree.root(), &mut table);
    assert!(table.is_empty());
}

#[test]
fn html_list_markup() {
    assert_eq!(HtmlList::Paragraph.wrap("a</p><p>b"), "<p>a</p><p>b</p>");
    assert_eq!(HtmlList::OrderedList.separator(), "</li><li>");
    assert_eq!(HtmlList::OrderedList.wrap("a"), "<ol><li>a</li></ol>");
    assert_eq!(ListForm::default().join, None);
}

#[test]
fn condition_may_name_the_root_binding() {
    let tree = SexpTree::parse(r#"(num "1")"#).expect("parse failed");
    let output = OutputSpec::Alternatives(vec![
        alternative(&["root"], "has root"),
        alternative(&[], "no root"),
    ]);
    let pattern = Pattern::new(query("(num) @root"), output);

    let mut table = CaptureTable::new();
    pattern.match_tree(&tree.root(), &mut table);

    let capture = table.get(tree.root().id()).expect("num captured");
    assert_eq!(capture.template(), Some("has root"));
}

#[test]
fn condition_may_name_root_text() {
    let tree = SexpTree::parse(r#"(num "1")"#).expect("parse failed");
    let output = OutputSpec::Alternatives(vec![alternative(&["root_text"], "n={root_text}")]);
    let patterns = [Pattern::new(query("(num) @root_text"), output)];

    let out = crate::render(&patterns, &tree.root(), crate::RenderOptions::new());
    assert_eq!(out, "n=1");
}
