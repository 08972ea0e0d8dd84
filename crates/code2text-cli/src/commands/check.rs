use std::path::PathBuf;

use code2text_core::sexp::SexpCompiler;
use code2text_lib::load_rules;

use super::lang_resolver::{SourceLang, lang_from_rules_dir, resolve_lang};

pub struct CheckArgs {
    pub rules_path: PathBuf,
    pub lang: Option<String>,
}

pub fn run(args: CheckArgs) {
    let rules = load_rules(&args.rules_path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    // Without a language only the rule file structure is validated.
    let lang = match &args.lang {
        Some(name) => Some(resolve_lang(Some(name), None, None).unwrap_or_else(|msg| {
            eprintln!("error: {msg}");
            std::process::exit(1);
        })),
        None => lang_from_rules_dir(&args.rules_path),
    };

    let result = match &lang {
        Some(SourceLang::Sexp) => rules.compile(&SexpCompiler).map(drop),
        Some(SourceLang::TreeSitter(lang)) => rules.compile(&**lang).map(drop),
        None => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
