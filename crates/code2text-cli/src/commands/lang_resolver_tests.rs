use std::path::Path;

use super::lang_resolver::{from_ext, from_name, resolve_lang, suggest_language};

#[test]
fn sexp_is_a_language() {
    assert_eq!(from_name("sexp").map(|l| l.name().to_owned()), Some("sexp".into()));
    assert_eq!(from_name("SEXP").map(|l| l.name().to_owned()), Some("sexp".into()));
    assert_eq!(from_ext("sexp").map(|l| l.name().to_owned()), Some("sexp".into()));
}

#[test]
#[cfg(feature = "lang-javascript")]
fn explicit_flag_wins_over_extension() {
    let lang = resolve_lang(Some("js"), Some(Path::new("tree.sexp")), None).expect("resolved");
    assert_eq!(lang.name(), "javascript");
}

#[test]
#[cfg(feature = "lang-python")]
fn infers_from_source_extension() {
    let lang = resolve_lang(None, Some(Path::new("app.py")), None).expect("resolved");
    assert_eq!(lang.name(), "python");
}

#[test]
fn unknown_extension_is_an_error() {
    let err = resolve_lang(None, Some(Path::new("notes.xyz")), None).expect_err("unknown");
    assert_eq!(err, "cannot infer language from extension '.xyz', use -l/--lang");
}

#[test]
fn stdin_needs_explicit_language() {
    let err = resolve_lang(None, Some(Path::new("-")), None).expect_err("no language");
    assert_eq!(err, "-l/--lang is required (cannot infer the language)");
}

#[test]
fn unknown_name_suggests_alternative() {
    let err = resolve_lang(Some("sexq"), None, None).expect_err("unknown");
    insta::assert_snapshot!(err, @r"
    unknown language: 'sexq'

    Did you mean 'sexp'?

    Run 'code2text langs' for the full list.
    ");
}

#[test]
#[cfg(feature = "lang-rust")]
fn suggests_close_names() {
    assert_eq!(suggest_language("rusr").as_deref(), Some("rust"));
    assert_eq!(suggest_language("completely-different"), None);
}
