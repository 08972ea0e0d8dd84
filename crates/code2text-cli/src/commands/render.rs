use std::path::PathBuf;

use code2text_core::sexp::{SexpCompiler, SexpTree};
use code2text_core::{Query, SyntaxNode};
use code2text_langs::TsNode;
use code2text_lib::{
    Pattern, PrintTracer, RenderOptions, RuleSet, Verbosity, load_rules, render, render_with,
};

use super::lang_resolver::{SourceLang, resolve_lang};
use super::source_loader::load_source;

pub struct RenderArgs {
    pub rules_path: PathBuf,
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub html: bool,
    /// `None` disables tracing.
    pub verbosity: Option<Verbosity>,
}

pub fn run(args: RenderArgs) {
    let rules = load_rules(&args.rules_path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    let source = load_source(args.source_text.as_deref(), args.source_path.as_deref())
        .unwrap_or_else(|msg| {
            eprintln!("error: {msg}");
            std::process::exit(1);
        });

    let lang = resolve_lang(
        args.lang.as_deref(),
        args.source_path.as_deref(),
        Some(&args.rules_path),
    )
    .unwrap_or_else(|msg| {
        eprintln!("error: {msg}");
        std::process::exit(1);
    });

    let options = if args.html {
        RenderOptions::html()
    } else {
        RenderOptions::new()
    };

    match render_source(&rules, &lang, &source, options, args.verbosity) {
        Ok(output) => println!("{output}"),
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

/// Compile `rules` for `lang`, parse `source` and render it.
pub fn render_source(
    rules: &RuleSet,
    lang: &SourceLang,
    source: &str,
    options: RenderOptions,
    verbosity: Option<Verbosity>,
) -> Result<String, String> {
    match lang {
        SourceLang::Sexp => {
            let patterns = rules.compile(&SexpCompiler).map_err(|e| e.to_string())?;
            let tree = SexpTree::parse(source).map_err(|e| format!("invalid tree: {e}"))?;
            Ok(render_tree(&patterns, &tree.root(), options, verbosity))
        }
        SourceLang::TreeSitter(lang) => {
            let patterns = rules.compile(&**lang).map_err(|e| e.to_string())?;
            let tree = lang.parse(source).map_err(|e| e.to_string())?;
            Ok(render_tree(
                &patterns,
                &TsNode::root(&tree, source),
                options,
                verbosity,
            ))
        }
    }
}

fn render_tree<N, Q>(
    patterns: &[Pattern<Q>],
    root: &N,
    options: RenderOptions,
    verbosity: Option<Verbosity>,
) -> String
where
    N: SyntaxNode,
    Q: Query<N>,
{
    let Some(verbosity) = verbosity else {
        return render(patterns, root, options);
    };
    let mut tracer = PrintTracer::new(verbosity);
    let output = render_with(patterns, root, options, &mut tracer);
    tracer.print();
    output
}
