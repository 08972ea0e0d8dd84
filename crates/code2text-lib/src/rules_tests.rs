use std::fs;

use code2text_core::sexp::SexpCompiler;
use indoc::indoc;

use crate::pattern::{HtmlList, OutputSpec};
use crate::rules::{RawCondition, RawOutput, load_rules, parse_rules};
use crate::Error;

#[test]
fn parses_template_and_alternatives() {
    let rules = parse_rules(indoc! {r#"
        [
          {"pattern": "(num) @root_text", "output": ""},
          {"pattern": "(call) @root", "ancestor": "(fn) @root",
           "output": [{"condition": ["args", {"has": "name"}], "template": "call {name}",
                       "listForms": {"arg_list": {"join": ", ", "htmlType": "orderedList"}}},
                      {}]}
        ]
    "#})
    .expect("parse failed");

    assert_eq!(rules.len(), 2);
    assert_eq!(rules.rules()[0].output, RawOutput::Template(String::new()));
    assert_eq!(rules.rules()[1].ancestor.as_deref(), Some("(fn) @root"));

    let OutputSpec::Alternatives(alternatives) = rules.rules()[1].output_spec() else {
        panic!("expected alternatives");
    };
    assert_eq!(alternatives[0].condition, vec!["args", "name"]);
    assert_eq!(alternatives[0].template, "call {name}");
    assert_eq!(alternatives[0].list_forms["arg_list"].join.as_deref(), Some(", "));
    assert_eq!(
        alternatives[0].list_forms["arg_list"].html,
        Some(HtmlList::OrderedList)
    );
    assert!(alternatives[1].condition.is_empty());
    assert_eq!(alternatives[1].template, "");
}

#[test]
fn accepts_legacy_keys() {
    let rules = parse_rules(indoc! {r#"
        [{"pattern": "(block) @root",
          "output": [{"cond": [{"has": "stmt_list"}], "output": "{stmt_list}",
                      "lists": {"stmt_list": {"html_type": "p"}}}]}]
    "#})
    .expect("parse failed");

    let RawOutput::Alternatives(alternatives) = &rules.rules()[0].output else {
        panic!("expected alternatives");
    };
    let alt = &alternatives[0];
    assert_eq!(alt.condition, vec![RawCondition::Has { has: "stmt_list".into() }]);
    assert_eq!(alt.template.as_deref(), Some("{stmt_list}"));
    assert_eq!(alt.list_forms["stmt_list"].html_type, Some(HtmlList::Paragraph));
}

#[test]
fn rejects_malformed_json() {
    let err = parse_rules(r#"[{"pattern": "(a) @root"}]"#).expect_err("output is required");
    assert!(matches!(err, Error::MalformedRules(_)));
}

#[test]
fn compile_reports_failing_rule() {
    let rules = parse_rules(
        r#"[{"pattern": "(a) @root", "output": ""}, {"pattern": "(b", "output": ""}]"#,
    )
    .expect("parse failed");

    let err = rules.compile(&SexpCompiler).expect_err("second rule is invalid");
    insta::assert_snapshot!(err.to_string(), @"rule 1: invalid pattern: unclosed `(` (at byte 2)");
}

#[test]
fn compile_reports_failing_ancestor() {
    let rules = parse_rules(r#"[{"pattern": "(a) @root", "ancestor": "@x", "output": ""}]"#)
        .expect("parse failed");

    let err = rules.compile(&SexpCompiler).expect_err("ancestor is invalid");
    assert!(matches!(err, Error::InvalidAncestor { index: 0, .. }));
}

#[test]
fn loads_directory_in_name_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("b.json"),
        r#"[{"pattern": "(b) @root", "output": "b"}]"#,
    )
    .expect("write");
    fs::write(
        dir.path().join("a.json"),
        r#"[{"pattern": "(a) @root", "output": "a"}]"#,
    )
    .expect("write");
    fs::write(dir.path().join("notes.txt"), "ignored").expect("write");

    let rules = load_rules(dir.path()).expect("load failed");
    let patterns: Vec<_> = rules.rules().iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["(a) @root", "(b) @root"]);
}

#[test]
fn loads_single_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rules.json");
    fs::write(&path, r#"[{"pattern": "(a) @root", "output": "a"}]"#).expect("write");

    assert_eq!(load_rules(&path).expect("load failed").len(), 1);
}

#[test]
fn empty_directory_has_no_rules() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_rules(dir.path()).expect_err("no rule files");
    assert!(matches!(err, Error::NoRules(_)));
}

#[test]
fn malformed_file_names_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{").expect("write");

    let err = load_rules(&path).expect_err("malformed");
    match err {
        Error::MalformedFile { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected MalformedFile, got {other:?}"),
    }
}

#[test]
fn missing_path_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_rules(&dir.path().join("missing.json")).expect_err("missing");
    assert!(matches!(err, Error::Io { .. }));
}
