//! Lossless syntax tree over `rowan` green nodes.
//!
//! A [`SyntaxTree`] owns the immutable green root. Cursors
//! ([`SyntaxNode`]) are created on demand, and an edit replaces one green
//! node so every untouched subtree stays shared with the previous tree.

use std::fmt;

use rowan::GreenNode;

use super::kind::{SyntaxElement, SyntaxNode, SyntaxToken};

/// Child indices leading from the root to a node. Indices count tokens as
/// well as nodes, trivia included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// The path from the root of `node`'s tree down to `node`.
    pub fn of(node: &SyntaxNode) -> Self {
        let mut indices: Vec<usize> = node
            .ancestors()
            .filter(|n| n.parent().is_some())
            .map(|n| n.index())
            .collect();
        indices.reverse();
        Self(indices)
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        let parts: Vec<String> = self.0.iter().map(usize::to_string).collect();
        f.write_str(&parts.join("/"))
    }
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxTree {
    green: GreenNode,
}

impl SyntaxTree {
    pub fn new(green: GreenNode) -> Self {
        Self { green }
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// The node at `path`, or `None` if the path leaves the tree or ends on
    /// a token.
    pub fn node_at(&self, path: &NodePath) -> Option<SyntaxNode> {
        let mut node = self.root();
        for &index in path.indices() {
            node = node.children_with_tokens().nth(index)?.into_node()?;
        }
        Some(node)
    }

    /// Nodes from the root down to the parent of `path`, nearest last.
    pub fn ancestors(&self, path: &NodePath) -> Vec<(NodePath, SyntaxNode)> {
        let indices = path.indices();
        (0..indices.len())
            .map_while(|depth| {
                let prefix = NodePath::from(indices[..depth].to_vec());
                self.node_at(&prefix).map(|node| (prefix, node))
            })
            .collect()
    }

    /// Replace the node at `path` with `replacement`.
    ///
    /// Returns `None` if `path` does not address a node.
    pub fn replace_node(&self, path: &NodePath, replacement: GreenNode) -> Option<Self> {
        let node = self.node_at(path)?;
        Some(Self::new(node.replace_with(replacement)))
    }

    /// Serialize back to source text.
    pub fn render(&self) -> String {
        self.root().text().to_string()
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Direct children of `node` that are nodes or non-trivia tokens.
pub fn significant_children(node: &SyntaxNode) -> impl Iterator<Item = SyntaxElement> + '_ {
    node.children_with_tokens()
        .filter(|element| !element.kind().is_trivia())
}

/// Every non-trivia token under `node`, in source order.
pub fn significant_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.descendants_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .filter(|token| !token.kind().is_trivia())
}

pub fn first_significant_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    significant_tokens(node).next()
}

pub fn last_significant_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    significant_tokens(node).last()
}

/// Source text of `node` without its outermost leading and trailing trivia.
pub fn trimmed_text(node: &SyntaxNode) -> String {
    let tokens: Vec<SyntaxToken> = node
        .descendants_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .collect();
    let first = tokens.iter().position(|t| !t.kind().is_trivia());
    let last = tokens.iter().rposition(|t| !t.kind().is_trivia());
    match (first, last) {
        (Some(first), Some(last)) => tokens[first..=last].iter().map(SyntaxToken::text).collect(),
        _ => String::new(),
    }
}
