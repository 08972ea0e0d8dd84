//! `code2text tree`: print a parsed source tree as an S-expression.
//!
//! Without `--raw` the dump only contains named nodes and can be fed back to
//! `code2text render` as a `.sexp` file.

use std::path::PathBuf;

use arborium_tree_sitter as tree_sitter;
use code2text_core::sexp::{SexpNode, SexpTree};

use super::lang_resolver::{SourceLang, resolve_lang};
use super::source_loader::load_source;

pub struct TreeArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub raw: bool,
    pub spans: bool,
}

pub fn run(args: TreeArgs) {
    let source = load_source(args.source_text.as_deref(), args.source_path.as_deref())
        .unwrap_or_else(|msg| {
            eprintln!("error: {msg}");
            std::process::exit(1);
        });

    let lang = resolve_lang(args.lang.as_deref(), args.source_path.as_deref(), None)
        .unwrap_or_else(|msg| {
            eprintln!("error: {msg}");
            std::process::exit(1);
        });

    let dump = match &lang {
        SourceLang::Sexp => SexpTree::parse(&source)
            .map(|tree| dump_tree(tree.root(), args.raw, args.spans))
            .map_err(|e| format!("invalid tree: {e}")),
        SourceLang::TreeSitter(lang) => lang
            .parse(&source)
            .map(|tree| {
                let root = TsDumpNode {
                    node: tree.root_node(),
                    source: &source,
                };
                dump_tree(root, args.raw, args.spans)
            })
            .map_err(|e| e.to_string()),
    };

    match dump {
        Ok(dump) => print!("{dump}"),
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

/// What the dumper needs from a node.
pub(crate) trait DumpNode: Copy {
    fn kind(&self) -> &str;
    fn is_named(&self) -> bool;
    fn text(&self) -> &str;
    fn span(&self) -> Option<String>;
    /// Children with the field name each one carries.
    fn children(&self) -> Vec<(Option<String>, Self)>;
}

#[derive(Clone, Copy)]
pub(crate) struct TsDumpNode<'t> {
    pub node: tree_sitter::Node<'t>,
    pub source: &'t str,
}

impl DumpNode for TsDumpNode<'_> {
    fn kind(&self) -> &str {
        self.node.kind()
    }

    fn is_named(&self) -> bool {
        self.node.is_named()
    }

    fn text(&self) -> &str {
        self.source.get(self.node.byte_range()).unwrap_or("")
    }

    fn span(&self) -> Option<String> {
        let start = self.node.start_position();
        let end = self.node.end_position();
        Some(format!(
            "[{}:{}-{}:{}]",
            start.row, start.column, end.row, end.column
        ))
    }

    fn children(&self) -> Vec<(Option<String>, Self)> {
        let mut cursor = self.node.walk();
        let mut result = Vec::new();
        if cursor.goto_first_child() {
            loop {
                let child = Self {
                    node: cursor.node(),
                    source: self.source,
                };
                result.push((cursor.field_name().map(str::to_owned), child));
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }
        result
    }
}

impl DumpNode for SexpNode<'_> {
    fn kind(&self) -> &str {
        SexpNode::kind(self)
    }

    fn is_named(&self) -> bool {
        true
    }

    fn text(&self) -> &str {
        SexpNode::text(self)
    }

    fn span(&self) -> Option<String> {
        None
    }

    fn children(&self) -> Vec<(Option<String>, Self)> {
        SexpNode::children(self)
            .into_iter()
            .map(|child| (child.field().map(str::to_owned), child))
            .collect()
    }
}

enum Frame<N> {
    Open {
        node: N,
        field: Option<String>,
        depth: usize,
    },
    Close,
}

/// Dump a tree with one node per line. Leaves carry their text.
///
/// Anonymous nodes (only with `raw`) are written as bare strings, which the
/// S-expression parser reads back as tokens of their parent.
pub(crate) fn dump_tree<N: DumpNode>(root: N, raw: bool, spans: bool) -> String {
    let mut out = String::new();
    let mut stack = vec![Frame::Open {
        node: root,
        field: None,
        depth: 0,
    }];

    while let Some(frame) = stack.pop() {
        let (node, field, depth) = match frame {
            Frame::Open { node, field, depth } => (node, field, depth),
            Frame::Close => {
                out.push(')');
                continue;
            }
        };

        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&"  ".repeat(depth));

        if !node.is_named() {
            out.push_str(&quote(node.text()));
            continue;
        }

        if let Some(field) = field {
            out.push_str(&field);
            out.push_str(": ");
        }
        out.push('(');
        out.push_str(node.kind());
        if spans && let Some(span) = node.span() {
            out.push(' ');
            out.push_str(&span);
        }

        let children: Vec<_> = node
            .children()
            .into_iter()
            .filter(|(_, child)| raw || child.is_named())
            .collect();

        if children.is_empty() {
            let text = node.text();
            if !text.is_empty() {
                out.push(' ');
                out.push_str(&quote(text));
            }
            out.push(')');
            continue;
        }

        stack.push(Frame::Close);
        for (field, child) in children.into_iter().rev() {
            stack.push(Frame::Open {
                node: child,
                field,
                depth: depth + 1,
            });
        }
    }

    out.push('\n');
    out
}

fn quote(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            c => result.push(c),
        }
    }
    result.push('"');
    result
}
