//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("code2text")
        .about("Render syntax trees to natural language or HTML from pattern rules")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(render_command())
        .subcommand(tree_command())
        .subcommand(check_command())
        .subcommand(langs_command())
}

/// Render a source file with a rule library.
pub fn render_command() -> Command {
    Command::new("render")
        .about("Render a source file with a rule library")
        .override_usage(
            "\
  code2text render <RULES> <SOURCE>
  code2text render <RULES> -s <TEXT> -l <LANG>",
        )
        .after_help(
            r#"EXAMPLES:
  code2text render rules.json app.js            # plain text
  code2text render rules/ app.js --html         # directory of rule files, HTML
  code2text render rules.json -s '1 + 2' -l js  # inline source
  code2text render rules.json tree.sexp -vv     # S-expression tree, full trace"#,
        )
        .arg(rules_path_arg())
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(lang_arg())
        .arg(html_arg())
        .arg(verbose_arg())
}

/// Print the parsed tree of a source file.
pub fn tree_command() -> Command {
    Command::new("tree")
        .about("Print the syntax tree of a source file")
        .override_usage(
            "\
  code2text tree <SOURCE>
  code2text tree -s <TEXT> -l <LANG>",
        )
        .after_help(
            r#"EXAMPLES:
  code2text tree app.js               # named nodes only
  code2text tree app.js --raw         # include anonymous nodes
  code2text tree -s 'x = 1' -l py     # inline source"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(lang_arg())
        .arg(raw_arg())
        .arg(spans_arg())
}

/// Validate a rule library.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a rule library")
        .override_usage(
            "\
  code2text check <RULES>
  code2text check <RULES> -l <LANG>",
        )
        .after_help(
            r#"EXAMPLES:
  code2text check rules.json          # validate JSON only
  code2text check rules.json -l js    # also compile every pattern
  code2text check rules.js/           # language from directory name"#,
        )
        .arg(rules_path_arg())
        .arg(lang_arg())
}

/// List supported languages.
pub fn langs_command() -> Command {
    Command::new("langs").about("List supported languages")
}
