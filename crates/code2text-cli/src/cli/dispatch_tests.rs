//! Tests for CLI dispatch: argument parsing and params extraction.

use std::path::PathBuf;

use clap::error::ErrorKind;
use code2text_lib::Verbosity;

use super::*;
use crate::cli::commands::{check_command, render_command, tree_command};
use crate::commands::render::RenderArgs;

fn render_args(argv: &[&str]) -> RenderArgs {
    let m = render_command()
        .try_get_matches_from(argv)
        .expect("arguments should parse");
    RenderParams::from_matches(&m).into()
}

#[test]
fn render_extracts_paths_and_flags() {
    let args = render_args(&["render", "rules.json", "app.js", "--html", "-l", "js"]);

    assert_eq!(args.rules_path, PathBuf::from("rules.json"));
    assert_eq!(args.source_path, Some(PathBuf::from("app.js")));
    assert_eq!(args.source_text, None);
    assert_eq!(args.lang.as_deref(), Some("js"));
    assert!(args.html);
    assert_eq!(args.verbosity, None);
}

#[test]
fn render_accepts_inline_source() {
    let args = render_args(&["render", "rules/", "-s", "1 + 2", "-l", "js"]);

    assert_eq!(args.rules_path, PathBuf::from("rules/"));
    assert_eq!(args.source_path, None);
    assert_eq!(args.source_text.as_deref(), Some("1 + 2"));
    assert!(!args.html);
}

#[test]
fn verbose_count_maps_to_trace_verbosity() {
    let cases = [
        ("-v", Verbosity::Default),
        ("-vv", Verbosity::Verbose),
        ("-vvv", Verbosity::VeryVerbose),
        ("-vvvv", Verbosity::VeryVerbose),
    ];
    for (flag, expected) in cases {
        let args = render_args(&["render", "r.json", "t.sexp", flag]);
        assert_eq!(args.verbosity, Some(expected), "{flag}");
    }
}

#[test]
fn render_requires_rules() {
    let err = render_command()
        .try_get_matches_from(["render"])
        .expect_err("missing RULES");
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn inline_source_conflicts_with_source_file() {
    let err = render_command()
        .try_get_matches_from(["render", "rules.json", "app.js", "-s", "1"])
        .expect_err("conflicting sources");
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn tree_extracts_flags() {
    let m = tree_command()
        .try_get_matches_from(["tree", "app.py", "--raw", "--spans"])
        .expect("arguments should parse");
    let params = TreeParams::from_matches(&m);

    assert_eq!(params.source_path, Some(PathBuf::from("app.py")));
    assert!(params.raw);
    assert!(params.spans);
    assert_eq!(params.lang, None);
}

#[test]
fn tree_rejects_render_flags() {
    let err = tree_command()
        .try_get_matches_from(["tree", "app.py", "--html"])
        .expect_err("tree has no --html");
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[test]
fn check_extracts_rules_and_lang() {
    let m = check_command()
        .try_get_matches_from(["check", "rules.json", "--lang", "python"])
        .expect("arguments should parse");
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.rules_path, PathBuf::from("rules.json"));
    assert_eq!(params.lang.as_deref(), Some("python"));
}

#[test]
fn subcommand_is_required() {
    let err = build_cli()
        .try_get_matches_from(["code2text"])
        .expect_err("no subcommand");
    assert_eq!(
        err.kind(),
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    );
}

#[test]
fn cli_definition_is_consistent() {
    build_cli().debug_assert();
}
