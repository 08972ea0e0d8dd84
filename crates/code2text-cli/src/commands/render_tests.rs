use code2text_lib::{RenderOptions, parse_rules};
use indoc::indoc;

use super::lang_resolver::SourceLang;
use super::render::render_source;

const RULES: &str = indoc! {r#"
    [
      {"pattern": "(add left: (_) @a right: (_) @b) @root", "output": "{a} plus {b}"},
      {"pattern": "(num) @root_text", "output": ""}
    ]
"#};

#[test]
fn renders_sexp_source() {
    let rules = parse_rules(RULES).expect("rules parse failed");
    let out = render_source(
        &rules,
        &SourceLang::Sexp,
        r#"(add left: (num "1") right: (num "2"))"#,
        RenderOptions::new(),
        None,
    );
    assert_eq!(out.as_deref(), Ok("1 plus 2"));
}

#[test]
fn renders_html() {
    let rules = parse_rules(RULES).expect("rules parse failed");
    let out = render_source(
        &rules,
        &SourceLang::Sexp,
        r#"(add left: (num "1") right: (num "<2>"))"#,
        RenderOptions::html(),
        None,
    )
    .expect("render failed");
    insta::assert_snapshot!(out, @r#"<span class="tree-node" data-id="0"><span class="tree-node" data-id="1">1</span> plus <span class="tree-node" data-id="2">&lt;2&gt;</span></span>"#);
}

#[test]
fn invalid_tree_is_an_error() {
    let rules = parse_rules(RULES).expect("rules parse failed");
    let err = render_source(&rules, &SourceLang::Sexp, "(add", RenderOptions::new(), None)
        .expect_err("unclosed node");
    assert_eq!(err, "invalid tree: unclosed node (at byte 4)");
}

#[test]
fn invalid_pattern_names_the_rule() {
    let rules = parse_rules(r#"[{"pattern": "(add", "output": ""}]"#).expect("rules parse failed");
    let err = render_source(&rules, &SourceLang::Sexp, "(add)", RenderOptions::new(), None)
        .expect_err("bad pattern");
    assert_eq!(err, "rule 0: invalid pattern: unclosed `(` (at byte 4)");
}

#[test]
#[cfg(feature = "lang-javascript")]
fn renders_javascript_source() {
    let rules = parse_rules(indoc! {r#"
        [
          {"pattern": "(binary_expression left: (_) @a right: (_) @b) @root", "output": "{a} plus {b}"},
          {"pattern": "(expression_statement (_) @e) @root", "output": "{e}"},
          {"pattern": "(program (_) @s) @root", "output": "{s}"},
          {"pattern": "(number) @root_text", "output": ""}
        ]
    "#})
    .expect("rules parse failed");
    let lang = SourceLang::TreeSitter(code2text_langs::javascript());

    let out = render_source(&rules, &lang, "1 + 2;", RenderOptions::new(), None);
    assert_eq!(out.as_deref(), Ok("1 plus 2"));
}
