#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core abstractions shared by every code2text backend.
//!
//! Two layers:
//! - **Tree layer**: [`SyntaxNode`] and the opaque [`NodeId`]
//! - **Query layer**: [`QueryCompiler`] turns pattern text into a [`Query`],
//!   which yields [`QueryMatch`]es of named node bindings
//!
//! The renderer in `code2text-lib` only talks to these traits. Concrete
//! backends live in [`sexp`] (in-memory S-expression trees) and in
//! `code2text-langs` (tree-sitter grammars).

use std::fmt;

pub mod sexp;

#[cfg(test)]
mod lib_tests;

// ============================================================================
// Tree Layer
// ============================================================================

/// Opaque node identifier assigned by the tree backend.
///
/// Only equality, hashing and display are supported: ids are map keys and
/// the `data-id` attribute of HTML output, never numbers to compute with.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(u64);

impl NodeId {
    /// Wrap a backend-specific raw identifier.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node of a parsed syntax tree.
///
/// Handles are cheap to clone and borrow the tree they belong to.
pub trait SyntaxNode: Clone {
    /// Stable identifier, unique within one tree.
    fn id(&self) -> NodeId;

    /// Grammar type tag (e.g. `binary_expression`).
    fn kind(&self) -> &str;

    /// Direct children in source order.
    fn children(&self) -> Vec<Self>;

    /// Source text spanned by this node.
    fn text(&self) -> &str;
}

// ============================================================================
// Query Layer
// ============================================================================

/// One structural match: ordered `(binding name, node)` pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryMatch<N> {
    captures: Vec<(String, N)>,
}

impl<N> QueryMatch<N> {
    pub fn new(captures: Vec<(String, N)>) -> Self {
        Self { captures }
    }

    pub fn captures(&self) -> &[(String, N)] {
        &self.captures
    }

    /// First node bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&N> {
        self.captures
            .iter()
            .find(|(capture, _)| capture == name)
            .map(|(_, node)| node)
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    pub fn into_captures(self) -> Vec<(String, N)> {
        self.captures
    }
}

/// A compiled, runnable query.
pub trait Query<N: SyntaxNode> {
    /// Run the query over `node` and all of its descendants.
    ///
    /// Matches are returned in the order the backend finds them.
    fn matches(&self, node: &N) -> Vec<QueryMatch<N>>;
}

/// Compiles pattern text into a backend query.
pub trait QueryCompiler {
    type Query;

    fn compile(&self, source: &str) -> Result<Self::Query, QueryError>;
}

/// Malformed query text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} (at byte {offset})")]
pub struct QueryError {
    pub message: String,
    /// Byte offset into the query text.
    pub offset: usize,
}

impl QueryError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}
