use arborium_tree_sitter as tree_sitter;
use code2text_core::{NodeId, SyntaxNode};

/// A tree-sitter node paired with the source text it was parsed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TsNode<'t> {
    node: tree_sitter::Node<'t>,
    source: &'t str,
}

impl<'t> TsNode<'t> {
    pub fn new(node: tree_sitter::Node<'t>, source: &'t str) -> Self {
        Self { node, source }
    }

    pub fn root(tree: &'t tree_sitter::Tree, source: &'t str) -> Self {
        Self::new(tree.root_node(), source)
    }

    pub fn node(&self) -> tree_sitter::Node<'t> {
        self.node
    }

    pub fn source(&self) -> &'t str {
        self.source
    }
}

impl SyntaxNode for TsNode<'_> {
    fn id(&self) -> NodeId {
        NodeId::from_raw(self.node.id() as u64)
    }

    fn kind(&self) -> &str {
        self.node.kind()
    }

    /// Named and anonymous children alike.
    fn children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .children(&mut cursor)
            .map(|node| Self::new(node, self.source))
            .collect()
    }

    fn text(&self) -> &str {
        self.source.get(self.node.byte_range()).unwrap_or("")
    }
}
