//! A small tree-sitter-style query engine for [`SexpTree`](super::SexpTree).
//!
//! Supported syntax:
//!
//! ```text
//! (binary left: (num) @lhs right: (_) @rhs) @root
//! (args (arg)* @item_list)
//! ```
//!
//! - `(kind child...)`, `(_ child...)` and bare `_` node patterns
//! - `field:` prefixes on child patterns
//! - `@name` captures, any number per pattern
//! - `*`, `+`, `?` quantifiers on child patterns
//!
//! Plain children match an ordered, not necessarily adjacent, subsequence of
//! the node's children and every such embedding is reported as its own match.
//! A quantified child takes the run of consecutive matching children that
//! starts at the first child it accepts; there is no backtracking into that run.

use super::lexer::{Token, TokenKind, lex};
use super::tree::SexpNode;
use crate::{Query, QueryCompiler, QueryError, QueryMatch};

/// Maximum nesting of node patterns.
const MAX_PATTERN_DEPTH: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Quantifier {
    One,
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
}

impl Quantifier {
    fn min(self) -> usize {
        match self {
            Quantifier::One | Quantifier::OneOrMore => 1,
            Quantifier::ZeroOrOne | Quantifier::ZeroOrMore => 0,
        }
    }

    fn max(self) -> usize {
        match self {
            Quantifier::One | Quantifier::ZeroOrOne => 1,
            Quantifier::ZeroOrMore | Quantifier::OneOrMore => usize::MAX,
        }
    }
}

#[derive(Clone, Debug)]
struct NodePattern {
    /// `None` for the `_` wildcard.
    kind: Option<String>,
    field: Option<String>,
    quantifier: Quantifier,
    captures: Vec<String>,
    children: Vec<NodePattern>,
}

type Bindings<'t> = Vec<(String, SexpNode<'t>)>;

/// Compiled query: one or more top-level patterns.
#[derive(Clone, Debug)]
pub struct SexpQuery {
    patterns: Vec<NodePattern>,
}

impl SexpQuery {
    pub fn new(source: &str) -> Result<Self, QueryError> {
        let tokens = lex(source)?;
        let mut parser = PatternParser {
            source,
            tokens: &tokens,
            pos: 0,
        };
        let mut patterns = Vec::new();
        while !parser.at_end() {
            let pattern = parser.pattern(0)?;
            if pattern.quantifier != Quantifier::One {
                return Err(QueryError::new(
                    "quantifiers are only allowed on child patterns",
                    parser.offset(),
                ));
            }
            patterns.push(pattern);
        }
        if patterns.is_empty() {
            return Err(QueryError::new("query has no patterns", 0));
        }
        Ok(Self { patterns })
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

impl<'t> Query<SexpNode<'t>> for SexpQuery {
    fn matches(&self, node: &SexpNode<'t>) -> Vec<QueryMatch<SexpNode<'t>>> {
        let mut out = Vec::new();
        let mut stack = vec![*node];
        while let Some(current) = stack.pop() {
            for pattern in &self.patterns {
                for bindings in match_node(pattern, current) {
                    out.push(QueryMatch::new(bindings));
                }
            }
            let mut children = current.children();
            children.reverse();
            stack.extend(children);
        }
        out
    }
}

/// [`QueryCompiler`] for the S-expression backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct SexpCompiler;

impl QueryCompiler for SexpCompiler {
    type Query = SexpQuery;

    fn compile(&self, source: &str) -> Result<SexpQuery, QueryError> {
        SexpQuery::new(source)
    }
}

// ============================================================================
// Parsing
// ============================================================================

struct PatternParser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl PatternParser<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn peek_nth(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|t| t.span.start)
            .unwrap_or(self.source.len())
    }

    fn text(&self) -> &str {
        self.tokens[self.pos].text(self.source)
    }

    fn error(&self, message: impl Into<String>) -> QueryError {
        QueryError::new(message, self.offset())
    }

    fn pattern(&mut self, depth: usize) -> Result<NodePattern, QueryError> {
        if depth >= MAX_PATTERN_DEPTH {
            return Err(self.error("pattern nested too deeply"));
        }

        let field = if self.peek() == Some(TokenKind::Ident)
            && self.peek_nth(1) == Some(TokenKind::Colon)
        {
            let name = self.text().to_owned();
            self.pos += 2;
            Some(name)
        } else {
            None
        };

        let (kind, children) = match self.peek() {
            Some(TokenKind::LParen) => {
                self.pos += 1;
                if self.peek() != Some(TokenKind::Ident) {
                    return Err(self.error("expected node kind after `(`"));
                }
                let kind = self.text().to_owned();
                self.pos += 1;
                let mut children = Vec::new();
                loop {
                    match self.peek() {
                        Some(TokenKind::RParen) => {
                            self.pos += 1;
                            break;
                        }
                        None => return Err(self.error("unclosed `(`")),
                        Some(_) => children.push(self.pattern(depth + 1)?),
                    }
                }
                (kind, children)
            }
            Some(TokenKind::Ident) if self.text() == "_" => {
                self.pos += 1;
                ("_".to_owned(), Vec::new())
            }
            Some(_) => return Err(self.error(format!("unexpected `{}`", self.text()))),
            None => return Err(self.error("expected pattern")),
        };

        let quantifier = match self.peek() {
            Some(TokenKind::Star) => Quantifier::ZeroOrMore,
            Some(TokenKind::Plus) => Quantifier::OneOrMore,
            Some(TokenKind::Question) => Quantifier::ZeroOrOne,
            _ => Quantifier::One,
        };
        if quantifier != Quantifier::One {
            self.pos += 1;
        }

        let mut captures = Vec::new();
        while self.peek() == Some(TokenKind::Capture) {
            captures.push(self.text()[1..].to_owned());
            self.pos += 1;
        }

        Ok(NodePattern {
            kind: (kind != "_").then_some(kind),
            field,
            quantifier,
            captures,
            children,
        })
    }
}

// ============================================================================
// Matching
// ============================================================================

fn accepts(pattern: &NodePattern, node: SexpNode<'_>) -> bool {
    pattern.kind.as_deref().is_none_or(|kind| kind == node.kind())
        && pattern
            .field
            .as_deref()
            .is_none_or(|field| node.field() == Some(field))
}

/// Every way `pattern` matches `node` itself.
fn match_node<'t>(pattern: &NodePattern, node: SexpNode<'t>) -> Vec<Bindings<'t>> {
    if !accepts(pattern, node) {
        return Vec::new();
    }
    let children = node.children();
    match_children(&pattern.children, &children)
        .into_iter()
        .map(|inner| {
            let mut bindings: Bindings<'t> = pattern
                .captures
                .iter()
                .map(|name| (name.clone(), node))
                .collect();
            bindings.extend(inner);
            bindings
        })
        .collect()
}

/// Embeds `patterns` into `children`, left to right.
fn match_children<'t>(patterns: &[NodePattern], children: &[SexpNode<'t>]) -> Vec<Bindings<'t>> {
    let Some((first, rest)) = patterns.split_first() else {
        return vec![Vec::new()];
    };

    let mut out = Vec::new();

    if first.quantifier == Quantifier::One {
        for (i, child) in children.iter().enumerate() {
            for head in match_node(first, *child) {
                for tail in match_children(rest, &children[i + 1..]) {
                    let mut bindings = head.clone();
                    bindings.extend(tail);
                    out.push(bindings);
                }
            }
        }
        return out;
    }

    let start = children
        .iter()
        .position(|child| !match_node(first, *child).is_empty());

    let (run, next) = match start {
        Some(start) => {
            let mut run = Vec::new();
            let mut end = start;
            while end < children.len() && end - start < first.quantifier.max() {
                let Some(bindings) = match_node(first, children[end]).into_iter().next() else {
                    break;
                };
                run.extend(bindings);
                end += 1;
            }
            let taken = end - start;
            if taken < first.quantifier.min() {
                return out;
            }
            (run, end)
        }
        None if first.quantifier.min() == 0 => (Vec::new(), 0),
        None => return out,
    };

    for tail in match_children(rest, &children[next..]) {
        let mut bindings = run.clone();
        bindings.extend(tail);
        out.push(bindings);
    }
    out
}
