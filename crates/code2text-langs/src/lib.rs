#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Tree-sitter backend for code2text.
//!
//! Each built-in grammar is a [`Lang`] that parses source text and compiles
//! tree-sitter queries. Parsed trees are exposed to the renderer through
//! [`TsNode`], and compiled queries through [`TsQuery`].

use std::sync::Arc;

use arborium_tree_sitter as tree_sitter;
use code2text_core::{QueryCompiler, QueryError};

pub mod builtin;
mod node;
mod query;


pub use builtin::*;
pub use node::TsNode;
pub use query::TsQuery;

/// User-facing language handle.
pub type Lang = Arc<dyn LangImpl>;

/// A tree-sitter grammar: parsing plus query compilation.
pub trait LangImpl: Send + Sync {
    fn name(&self) -> &str;

    fn language(&self) -> &tree_sitter::Language;

    /// Parse source code into a tree-sitter tree.
    fn parse(&self, source: &str) -> Result<tree_sitter::Tree, LangError>;

    fn compile_query(&self, source: &str) -> Result<TsQuery, QueryError>;
}

impl QueryCompiler for dyn LangImpl {
    type Query = TsQuery;

    fn compile(&self, source: &str) -> Result<TsQuery, QueryError> {
        self.compile_query(source)
    }
}

/// [`LangImpl`] over a statically linked grammar.
#[derive(Debug)]
pub struct LangInner {
    name: String,
    ts_lang: tree_sitter::Language,
}

impl LangInner {
    pub fn new(name: &str, ts_lang: tree_sitter::Language) -> Self {
        Self {
            name: name.to_owned(),
            ts_lang,
        }
    }
}

impl LangImpl for LangInner {
    fn name(&self) -> &str {
        &self.name
    }

    fn language(&self) -> &tree_sitter::Language {
        &self.ts_lang
    }

    fn parse(&self, source: &str) -> Result<tree_sitter::Tree, LangError> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&self.ts_lang)
            .map_err(|source| LangError::SetLanguage {
                name: self.name.clone(),
                source,
            })?;
        parser
            .parse(source, None)
            .ok_or_else(|| LangError::Parse(self.name.clone()))
    }

    fn compile_query(&self, source: &str) -> Result<TsQuery, QueryError> {
        TsQuery::new(&self.ts_lang, source)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LangError {
    #[error("failed to load the {name} grammar: {source}")]
    SetLanguage {
        name: String,
        #[source]
        source: tree_sitter::LanguageError,
    },

    #[error("failed to parse {0} source")]
    Parse(String),
}
