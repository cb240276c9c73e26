//! Rewrites of the syntax tree through green-node replacement.

use rowan::{GreenNode, GreenNodeBuilder, GreenNodeData, GreenToken, Language, NodeOrToken};
use tracing::debug;

use super::error::RewriteError;
use super::kind::{
    REFERENCE_KEYWORDS, SwiftLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken,
};
use super::lexer::is_identifier;
use super::tree::{
    NodePath, SyntaxTree, last_significant_token, significant_children, trimmed_text,
};

type GreenElement = NodeOrToken<GreenNode, GreenToken>;

const INDENT: &str = "    ";

/// Append `base.accessor` to the array literal at `list`.
///
/// The previous last element gets a comma if it lacks one. Spacing follows
/// the list's existing style: `[A.self, B.self]` on one line, or one
/// element per line with the indentation of the last element. A new element
/// never follows a line comment on the same line. Only the nodes from the
/// root down to the list are rebuilt.
pub fn insert_element(
    tree: &SyntaxTree,
    list: &NodePath,
    base: &str,
    accessor: &str,
) -> Result<SyntaxTree, RewriteError> {
    let missing = || RewriteError::Shape {
        expected: "array literal",
        found: format!("no node at {list}"),
    };
    let array = tree.node_at(list).ok_or_else(missing)?;
    if array.kind() != SyntaxKind::ArrayLiteral {
        return Err(RewriteError::Shape {
            expected: "array literal",
            found: array.kind().to_string(),
        });
    }
    if !is_identifier(base) {
        return Err(RewriteError::InvalidIdentifier(base.to_string()));
    }
    if !is_identifier(accessor) && !REFERENCE_KEYWORDS.contains(&accessor) {
        return Err(RewriteError::InvalidIdentifier(accessor.to_string()));
    }

    let children: Vec<SyntaxElement> = array.children_with_tokens().collect();
    let elements: Vec<(usize, &SyntaxNode)> = children
        .iter()
        .enumerate()
        .filter_map(|(i, child)| Some((i, child.as_node()?)))
        .filter(|(_, node)| node.kind() == SyntaxKind::ArrayElement)
        .collect();
    for (_, element) in &elements {
        ensure_member_access(element)?;
    }
    let close = children
        .iter()
        .rposition(|child| child.kind() == SyntaxKind::RBracket)
        .ok_or_else(missing)?;
    let newline = newline_text(&array);

    let mut green: Vec<GreenElement> = array.green().children().map(owned_child).collect();
    let placement = match elements.last() {
        Some(&(index, element)) => {
            after_element(&children, close, index, element, &mut green, &newline)
        }
        None => into_empty(&children, close, &newline),
    };

    let element = member_access_element(base, accessor, &placement.leading, &placement.trailing);
    green.insert(placement.index, NodeOrToken::Node(element));

    debug!(%list, base, accessor, "inserting array element");
    tree.replace_node(list, GreenNode::new(SyntaxKind::ArrayLiteral.into(), green))
        .ok_or_else(missing)
}

/// Where the new element goes among the list's children, and its trivia.
#[derive(Debug, Default)]
struct Placement {
    index: usize,
    leading: Vec<GreenToken>,
    trailing: Vec<GreenToken>,
}

/// Placement after the current last element, which is rewritten in `green`
/// to carry a comma.
fn after_element(
    children: &[SyntaxElement],
    close: usize,
    index: usize,
    element: &SyntaxNode,
    green: &mut [GreenElement],
    newline: &str,
) -> Placement {
    let has_comma =
        last_significant_token(element).is_some_and(|t| t.kind() == SyntaxKind::Comma);
    let own_line = leading_trivia(element)
        .iter()
        .any(|t| t.kind() == SyntaxKind::Newline);
    let (stripped, moved) = strip_trailing_trivia(&element.green());
    let after_comment = moved.iter().any(|t| kind_of(t) == SyntaxKind::LineComment);

    let mut parts: Vec<GreenElement> = stripped.children().map(owned_child).collect();
    if !has_comma {
        parts.push(NodeOrToken::Token(token(SyntaxKind::Comma, ",")));
    }

    let mut placement = Placement {
        index: index + 1,
        ..Placement::default()
    };
    if own_line || after_comment {
        let indent = if own_line {
            indentation(&leading_trivia(element))
        } else {
            format!("{}{INDENT}", indentation(&children_tokens(&children[index + 1..close])))
        };
        parts.extend(moved.into_iter().map(NodeOrToken::Token));
        placement.leading = line_start(newline, &indent);
    } else if has_comma {
        let spaced = moved
            .last()
            .is_some_and(|t| kind_of(t) == SyntaxKind::Whitespace);
        parts.extend(moved.into_iter().map(NodeOrToken::Token));
        if !spaced {
            placement.leading = vec![token(SyntaxKind::Whitespace, " ")];
        }
    } else {
        parts.push(NodeOrToken::Token(token(SyntaxKind::Whitespace, " ")));
        placement.trailing = moved;
    }

    green[index] = NodeOrToken::Node(GreenNode::new(SyntaxKind::ArrayElement.into(), parts));
    placement
}

/// Placement in a list with no elements, between `[` and `]`.
fn into_empty(children: &[SyntaxElement], close: usize, newline: &str) -> Placement {
    let open = children
        .iter()
        .position(|child| child.kind() == SyntaxKind::LBracket)
        .map_or(0, |i| i + 1);
    let inner = children_tokens(&children[open..close]);
    let breaks_line = inner
        .iter()
        .any(|t| matches!(t.kind(), SyntaxKind::Newline | SyntaxKind::LineComment));

    if breaks_line {
        let last_newline = children[open..close]
            .iter()
            .rposition(|child| child.kind() == SyntaxKind::Newline)
            .map_or(close, |i| open + i);
        let indent = format!("{}{INDENT}", indentation(&inner));
        return Placement {
            index: last_newline,
            leading: line_start(newline, &indent),
            trailing: Vec::new(),
        };
    }

    // `[ ]` keeps its padding on both sides of the element.
    let trailing = match inner.first() {
        Some(first) if first.kind() == SyntaxKind::Whitespace => {
            vec![token(SyntaxKind::Whitespace, first.text())]
        }
        _ => Vec::new(),
    };
    Placement {
        index: close,
        leading: Vec::new(),
        trailing,
    }
}

fn ensure_member_access(element: &SyntaxNode) -> Result<(), RewriteError> {
    let is_member_access = element
        .children()
        .find(|n| n.kind() == SyntaxKind::Expr)
        .and_then(|expr| {
            let mut children = significant_children(&expr);
            let only = children.next()?.into_node()?;
            children.next().is_none().then_some(only)
        })
        .is_some_and(|only| only.kind() == SyntaxKind::MemberAccessExpr);
    if is_member_access {
        Ok(())
    } else {
        Err(RewriteError::Shape {
            expected: "member access expression",
            found: trimmed_text(element),
        })
    }
}

fn kind_of(token: &GreenToken) -> SyntaxKind {
    SwiftLanguage::kind_from_raw(token.kind())
}

fn token(kind: SyntaxKind, text: &str) -> GreenToken {
    GreenToken::new(kind.into(), text)
}

fn owned_child(child: NodeOrToken<&GreenNodeData, &rowan::GreenTokenData>) -> GreenElement {
    match child {
        NodeOrToken::Node(node) => NodeOrToken::Node(node.to_owned()),
        NodeOrToken::Token(token) => NodeOrToken::Token(token.to_owned()),
    }
}

fn children_tokens(children: &[SyntaxElement]) -> Vec<SyntaxToken> {
    children
        .iter()
        .filter_map(|child| child.as_token().cloned())
        .collect()
}

/// Trivia before the first significant token of `node`.
fn leading_trivia(node: &SyntaxNode) -> Vec<SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .take_while(|t| t.kind().is_trivia())
        .collect()
}

/// The whitespace that starts the last line of `trivia`, or `""` if the run
/// has no line break.
fn indentation(trivia: &[SyntaxToken]) -> String {
    trivia
        .iter()
        .rposition(|t| t.kind() == SyntaxKind::Newline)
        .and_then(|nl| trivia.get(nl + 1))
        .filter(|t| t.kind() == SyntaxKind::Whitespace)
        .map(|t| t.text().to_string())
        .unwrap_or_default()
}

/// The line ending already used inside `array`, defaulting to `\n`.
fn newline_text(array: &SyntaxNode) -> String {
    array
        .descendants_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .find(|t| t.kind() == SyntaxKind::Newline)
        .map_or_else(|| "\n".to_string(), |t| t.text().to_string())
}

fn line_start(newline: &str, indent: &str) -> Vec<GreenToken> {
    let mut trivia = vec![token(SyntaxKind::Newline, newline)];
    if !indent.is_empty() {
        trivia.push(token(SyntaxKind::Whitespace, indent));
    }
    trivia
}

/// Split the trivia at the very end of `node`, however deeply nested, from
/// the rest of it. The trivia comes back in source order.
fn strip_trailing_trivia(node: &GreenNodeData) -> (GreenNode, Vec<GreenToken>) {
    let mut children: Vec<GreenElement> = node.children().map(owned_child).collect();
    let mut stripped = Vec::new();
    while let Some(last) = children.pop() {
        match last {
            NodeOrToken::Token(token) if kind_of(&token).is_trivia() => stripped.push(token),
            NodeOrToken::Node(inner) => {
                let (inner, nested) = strip_trailing_trivia(&inner);
                children.push(NodeOrToken::Node(inner));
                stripped.extend(nested.into_iter().rev());
                break;
            }
            other => {
                children.push(other);
                break;
            }
        }
    }
    stripped.reverse();
    (GreenNode::new(node.kind(), children), stripped)
}

/// `ArrayElement[Expr[MemberAccessExpr[DeclReference[base], ., accessor]]]`
fn member_access_element(
    base: &str,
    accessor: &str,
    leading: &[GreenToken],
    trailing: &[GreenToken],
) -> GreenNode {
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(SyntaxKind::ArrayElement.into());
    builder.start_node(SyntaxKind::Expr.into());
    builder.start_node(SyntaxKind::MemberAccessExpr.into());
    builder.start_node(SyntaxKind::DeclReference.into());
    for trivia in leading {
        builder.token(trivia.kind(), trivia.text());
    }
    builder.token(SyntaxKind::for_word(base).into(), base);
    builder.finish_node();
    builder.token(SyntaxKind::Dot.into(), ".");
    builder.token(SyntaxKind::for_word(accessor).into(), accessor);
    for trivia in trailing {
        builder.token(trivia.kind(), trivia.text());
    }
    builder.finish_node();
    builder.finish_node();
    builder.finish_node();
    builder.finish()
}
