//! Depth-first traversal with explicit control flow.

use std::ops::ControlFlow;

use rowan::NodeOrToken;

use super::kind::{SyntaxNode, SyntaxToken};
use super::tree::{NodePath, SyntaxTree};

/// What the walker does after a visit callback returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitControl {
    /// Descend into the children of this node.
    Continue,
    /// Move on to the next sibling without descending.
    SkipChildren,
    /// End the walk.
    Stop,
}

/// Callbacks for [`walk`]. Both default to [`VisitControl::Continue`].
pub trait Visitor {
    fn visit_node(&mut self, _node: &SyntaxNode, _path: &NodePath) -> VisitControl {
        VisitControl::Continue
    }

    /// `path` addresses the token within its parent. Trivia tokens are
    /// visited too.
    fn visit_token(&mut self, _token: &SyntaxToken, _path: &NodePath) -> VisitControl {
        VisitControl::Continue
    }
}

/// Visit every node and token of `tree` in pre-order.
///
/// Returns `true` if a callback stopped the walk early.
pub fn walk<V: Visitor + ?Sized>(tree: &SyntaxTree, visitor: &mut V) -> bool {
    walk_node(&tree.root(), &NodePath::root(), visitor).is_break()
}

fn walk_node<V: Visitor + ?Sized>(
    node: &SyntaxNode,
    path: &NodePath,
    visitor: &mut V,
) -> ControlFlow<()> {
    match visitor.visit_node(node, path) {
        VisitControl::Stop => return ControlFlow::Break(()),
        VisitControl::SkipChildren => return ControlFlow::Continue(()),
        VisitControl::Continue => {}
    }
    for (index, child) in node.children_with_tokens().enumerate() {
        let child_path = path.child(index);
        match child {
            NodeOrToken::Node(child) => walk_node(&child, &child_path, visitor)?,
            NodeOrToken::Token(token) => {
                if visitor.visit_token(&token, &child_path) == VisitControl::Stop {
                    return ControlFlow::Break(());
                }
            }
        }
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::kind::SyntaxKind;
    use crate::syntax::parser::parse;

    #[derive(Default)]
    struct Recorder {
        nodes: Vec<SyntaxKind>,
        tokens: Vec<String>,
        trivia: usize,
        skip: Option<SyntaxKind>,
        stop_at: Option<&'static str>,
    }

    impl Visitor for Recorder {
        fn visit_node(&mut self, node: &SyntaxNode, _path: &NodePath) -> VisitControl {
            self.nodes.push(node.kind());
            if Some(node.kind()) == self.skip {
                VisitControl::SkipChildren
            } else {
                VisitControl::Continue
            }
        }

        fn visit_token(&mut self, token: &SyntaxToken, _path: &NodePath) -> VisitControl {
            if token.kind().is_trivia() {
                self.trivia += 1;
                return VisitControl::Continue;
            }
            self.tokens.push(token.text().to_string());
            if Some(token.text()) == self.stop_at {
                VisitControl::Stop
            } else {
                VisitControl::Continue
            }
        }
    }

    #[test]
    fn visits_in_source_order() {
        let tree = parse("f(x) y").unwrap();
        let mut recorder = Recorder::default();
        assert!(!walk(&tree, &mut recorder));
        assert_eq!(recorder.tokens, vec!["f", "(", "x", ")", "y"]);
        assert_eq!(recorder.trivia, 1);
        assert_eq!(recorder.nodes[0], SyntaxKind::SourceFile);
        assert_eq!(recorder.nodes[1], SyntaxKind::CallExpr);
    }

    #[test]
    fn token_paths_address_the_token() {
        struct Paths(Vec<NodePath>);
        impl Visitor for Paths {
            fn visit_token(&mut self, token: &SyntaxToken, path: &NodePath) -> VisitControl {
                if token.text() == "x" {
                    self.0.push(path.clone());
                }
                VisitControl::Continue
            }
        }

        let tree = parse("f(x)").unwrap();
        let mut paths = Paths(Vec::new());
        walk(&tree, &mut paths);
        // SourceFile / CallExpr / ArgumentList / Argument / Expr / DeclReference / x
        assert_eq!(paths.0, vec![NodePath::from(vec![0, 1, 1, 0, 0, 0])]);
    }

    #[test]
    fn skip_children_prunes_subtree() {
        let tree = parse("f(x) y").unwrap();
        let mut recorder = Recorder {
            skip: Some(SyntaxKind::ArgumentList),
            ..Recorder::default()
        };
        walk(&tree, &mut recorder);
        assert_eq!(recorder.tokens, vec!["f", "y"]);
    }

    #[test]
    fn stop_ends_the_walk() {
        let tree = parse("a b c").unwrap();
        let mut recorder = Recorder {
            stop_at: Some("b"),
            ..Recorder::default()
        };
        assert!(walk(&tree, &mut recorder));
        assert_eq!(recorder.tokens, vec!["a", "b"]);
    }
}
