//! S-expression backend: hand-written trees and a query engine over them.
//!
//! Useful for rule development and tests, where a real grammar would only get
//! in the way. Trees use the same shape `code2text tree` prints for
//! tree-sitter sources, so a dumped tree can be edited and rendered directly.

mod lexer;
mod query;
mod tree;

#[cfg(test)]
mod lexer_tests;

pub use query::{SexpCompiler, SexpQuery};
pub use tree::{SexpNode, SexpTree, SexpTreeBuilder, parse_tree};
