use arborium_tree_sitter as tree_sitter;
use code2text_core::{Query, QueryError, QueryMatch};
use streaming_iterator::StreamingIterator;

use crate::TsNode;

/// A compiled tree-sitter query.
#[derive(Debug)]
pub struct TsQuery {
    query: tree_sitter::Query,
}

impl TsQuery {
    pub fn new(language: &tree_sitter::Language, source: &str) -> Result<Self, QueryError> {
        tree_sitter::Query::new(language, source)
            .map(|query| Self { query })
            .map_err(|err| QueryError::new(err.to_string(), err.offset))
    }

    pub fn capture_names(&self) -> &[&str] {
        self.query.capture_names()
    }

    pub fn pattern_count(&self) -> usize {
        self.query.pattern_count()
    }
}

impl<'t> Query<TsNode<'t>> for TsQuery {
    fn matches(&self, node: &TsNode<'t>) -> Vec<QueryMatch<TsNode<'t>>> {
        let names = self.query.capture_names();
        let source = node.source();
        let mut cursor = tree_sitter::QueryCursor::new();
        let mut matches = cursor.matches(&self.query, node.node(), source.as_bytes());

        let mut out = Vec::new();
        while let Some(m) = matches.next() {
            let captures = m
                .captures
                .iter()
                .map(|capture| {
                    let name = names[capture.index as usize].to_owned();
                    (name, TsNode::new(capture.node, source))
                })
                .collect();
            out.push(QueryMatch::new(captures));
        }
        out
    }
}
