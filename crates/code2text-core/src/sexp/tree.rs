//! In-memory syntax trees written as S-expressions.
//!
//! ```text
//! (add left: (num "1") right: (num "2"))
//! ```
//!
//! String items are the tree's tokens. A node's text is every token inside it,
//! joined by single spaces, so the text of `add` above is `1 2`.

use std::fmt;
use std::ops::Range;

use super::lexer::{TokenKind, lex, unescape};
use crate::{NodeId, QueryError, SyntaxNode};

#[derive(Debug, Clone)]
struct NodeData {
    kind: String,
    field: Option<String>,
    children: Vec<u32>,
    span: Range<usize>,
}

/// An immutable tree of kinds, fields and tokens.
///
/// Node ids are assigned in pre-order, starting at 0 for the root.
#[derive(Debug, Clone)]
pub struct SexpTree {
    nodes: Vec<NodeData>,
    source: String,
}

impl SexpTree {
    /// Parse the S-expression syntax into a tree.
    pub fn parse(source: &str) -> Result<Self, QueryError> {
        parse_tree(source)
    }

    pub fn root(&self) -> SexpNode<'_> {
        SexpNode {
            tree: self,
            index: 0,
        }
    }

    /// All tokens of the tree joined by single spaces.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn data(&self, index: u32) -> &NodeData {
        &self.nodes[index as usize]
    }
}

/// Borrowed handle to one node of a [`SexpTree`].
#[derive(Clone, Copy)]
pub struct SexpNode<'t> {
    tree: &'t SexpTree,
    index: u32,
}

impl<'t> SexpNode<'t> {
    pub fn kind(&self) -> &'t str {
        &self.tree.data(self.index).kind
    }

    /// Field label this node carries in its parent, if any.
    pub fn field(&self) -> Option<&'t str> {
        self.tree.data(self.index).field.as_deref()
    }

    pub fn text(&self) -> &'t str {
        &self.tree.source[self.tree.data(self.index).span.clone()]
    }

    pub fn children(&self) -> Vec<SexpNode<'t>> {
        self.tree
            .data(self.index)
            .children
            .iter()
            .map(|&index| SexpNode {
                tree: self.tree,
                index,
            })
            .collect()
    }

    pub fn child_count(&self) -> usize {
        self.tree.data(self.index).children.len()
    }
}

impl PartialEq for SexpNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for SexpNode<'_> {}

impl fmt::Debug for SexpNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SexpNode")
            .field("index", &self.index)
            .field("kind", &self.kind())
            .finish()
    }
}

impl SyntaxNode for SexpNode<'_> {
    fn id(&self) -> NodeId {
        NodeId::from_raw(u64::from(self.index))
    }

    fn kind(&self) -> &str {
        SexpNode::kind(self)
    }

    fn children(&self) -> Vec<Self> {
        SexpNode::children(self)
    }

    fn text(&self) -> &str {
        SexpNode::text(self)
    }
}

/// Incremental tree construction without recursion.
///
/// Calls must nest: every `start_node` is closed by a `finish_node`, and
/// exactly one root node may be started.
#[derive(Debug, Default)]
pub struct SexpTreeBuilder {
    nodes: Vec<NodeData>,
    source: String,
    /// Open nodes with the token count seen when they were started.
    open: Vec<(u32, usize)>,
    token_starts: Vec<usize>,
    extra_root: bool,
}

impl SexpTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_node(&mut self, kind: impl Into<String>, field: Option<&str>) {
        let index = self.nodes.len() as u32;
        match self.open.last() {
            Some(&(parent, _)) => self.nodes[parent as usize].children.push(index),
            None if !self.nodes.is_empty() => self.extra_root = true,
            None => {}
        }
        let position = self.source.len();
        self.nodes.push(NodeData {
            kind: kind.into(),
            field: field.map(str::to_owned),
            children: Vec::new(),
            span: position..position,
        });
        self.open.push((index, self.token_starts.len()));
    }

    /// Append a token to the innermost open node.
    pub fn token(&mut self, text: &str) {
        if !self.source.is_empty() {
            self.source.push(' ');
        }
        self.token_starts.push(self.source.len());
        self.source.push_str(text);
    }

    pub fn finish_node(&mut self) {
        let Some((index, first_token)) = self.open.pop() else {
            return;
        };
        let end = self.source.len();
        let start = self.token_starts.get(first_token).copied().unwrap_or(end);
        self.nodes[index as usize].span = start..end;
    }

    pub fn finish(self) -> Result<SexpTree, QueryError> {
        if self.nodes.is_empty() {
            return Err(QueryError::new("tree has no root node", 0));
        }
        if self.extra_root {
            return Err(QueryError::new("tree has more than one root node", 0));
        }
        if !self.open.is_empty() {
            return Err(QueryError::new("unclosed node", self.source.len()));
        }
        Ok(SexpTree {
            nodes: self.nodes,
            source: self.source,
        })
    }
}

/// Parse the S-expression tree syntax.
///
/// Nesting depth is limited only by memory: the parser drives a
/// [`SexpTreeBuilder`] from a flat token loop.
pub fn parse_tree(source: &str) -> Result<SexpTree, QueryError> {
    let tokens = lex(source)?;
    let mut builder = SexpTreeBuilder::new();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut field: Option<&str> = None;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        match token.kind {
            TokenKind::LParen => {
                if depth == 0 && seen_root {
                    return Err(QueryError::new(
                        "unexpected input after root node",
                        token.span.start,
                    ));
                }
                let Some(kind) = tokens.get(i + 1).filter(|t| t.kind == TokenKind::Ident) else {
                    return Err(QueryError::new("expected node kind after `(`", token.span.end));
                };
                builder.start_node(kind.text(source), field.take());
                depth += 1;
                seen_root = true;
                i += 2;
                continue;
            }
            TokenKind::RParen => {
                if field.is_some() {
                    return Err(QueryError::new("field without node", token.span.start));
                }
                if depth == 0 {
                    return Err(QueryError::new("unmatched `)`", token.span.start));
                }
                builder.finish_node();
                depth -= 1;
            }
            TokenKind::Ident if depth > 0 && field.is_none() => {
                let is_field = tokens
                    .get(i + 1)
                    .is_some_and(|t| t.kind == TokenKind::Colon);
                if !is_field {
                    return Err(QueryError::new(
                        format!("unexpected `{}`, expected `(` or a string", token.text(source)),
                        token.span.start,
                    ));
                }
                field = Some(token.text(source));
                i += 2;
                continue;
            }
            TokenKind::Str if depth > 0 && field.is_none() => {
                builder.token(&unescape(token.text(source)));
            }
            _ => {
                return Err(QueryError::new(
                    format!("unexpected `{}`", token.text(source)),
                    token.span.start,
                ));
            }
        }
        i += 1;
    }

    if depth > 0 {
        return Err(QueryError::new("unclosed node", source.len()));
    }
    builder.finish()
}
