//! Structural pattern matching over the syntax tree.
//!
//! Matches are scoped by parentage: a labeled argument only counts when it
//! belongs to the argument list of the invocation being looked for, never
//! when the same label appears in some unrelated nested call.

use serde::{Deserialize, Serialize};

use super::kind::{SyntaxElement, SyntaxKind, SyntaxNode, unescaped_name};
use super::literal::decode_string_literal;
use super::tree::{NodePath, SyntaxTree, first_significant_token, significant_children};
use super::visit::{VisitControl, Visitor, walk};

/// Where the project name lives in a manifest: `callee(label: "...")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestPattern {
    pub callee: String,
    pub label: String,
}

impl Default for ManifestPattern {
    fn default() -> Self {
        Self {
            callee: "Package".into(),
            label: "name".into(),
        }
    }
}

/// Where registered types live: `#macro_name(label: [Type.accessor, ...])`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryPattern {
    pub macro_name: String,
    pub label: String,
    pub accessor: String,
}

impl Default for RegistryPattern {
    fn default() -> Self {
        Self {
            macro_name: "initSwiftExtension".into(),
            label: "types".into(),
            accessor: "self".into(),
        }
    }
}

/// The name an invocation is called by: the plain identifier callee of a
/// call, or the identifier after `#` of a macro expansion.
pub fn invocation_name(node: &SyntaxNode) -> Option<String> {
    match node.kind() {
        SyntaxKind::CallExpr => {
            let callee = significant_children(node).next()?.into_node()?;
            if callee.kind() != SyntaxKind::DeclReference {
                return None;
            }
            Some(unescaped_name(first_significant_token(&callee)?.text()).to_string())
        }
        SyntaxKind::MacroExpansionExpr => {
            let name = significant_children(node).nth(1)?.into_token()?;
            Some(unescaped_name(name.text()).to_string())
        }
        _ => None,
    }
}

/// The label of an `Argument` node, if it has one.
pub fn argument_label(argument: &SyntaxNode) -> Option<String> {
    let mut children = significant_children(argument);
    let label = children.next()?.into_token()?;
    let colon = children.next()?.into_token()?;
    if colon.kind() != SyntaxKind::Colon
        || !matches!(label.kind(), SyntaxKind::Identifier | SyntaxKind::Keyword)
    {
        return None;
    }
    Some(unescaped_name(label.text()).to_string())
}

fn child_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|child| child.kind() == kind)
}

/// The value (`Expr`) of the argument labeled `label` in the invocation
/// `node`, looking only at that invocation's own arguments.
fn labeled_value(node: &SyntaxNode, label: &str) -> Option<(NodePath, SyntaxNode)> {
    let list = child_of_kind(node, SyntaxKind::ArgumentList)?;
    let argument = list
        .children()
        .filter(|n| n.kind() == SyntaxKind::Argument)
        .find(|n| argument_label(n).as_deref() == Some(label))?;
    let expr = child_of_kind(&argument, SyntaxKind::Expr)?;
    Some((NodePath::of(&expr), expr))
}

/// The single element making up `expr`, if there is exactly one.
fn sole_child(expr: &SyntaxNode) -> Option<SyntaxElement> {
    let mut children = significant_children(expr);
    let only = children.next()?;
    children.next().is_none().then_some(only)
}

/// Pre-order search for the first invocation named `name` for which `found`
/// returns a value.
struct InvocationSearch<'a, T, F> {
    name: &'a str,
    found: F,
    result: Option<T>,
}

impl<T, F> Visitor for InvocationSearch<'_, T, F>
where
    F: FnMut(&SyntaxNode) -> Option<T>,
{
    fn visit_node(&mut self, node: &SyntaxNode, _path: &NodePath) -> VisitControl {
        if invocation_name(node).as_deref() != Some(self.name) {
            return VisitControl::Continue;
        }
        match (self.found)(node) {
            Some(value) => {
                self.result = Some(value);
                VisitControl::Stop
            }
            None => VisitControl::Continue,
        }
    }
}

fn search<T>(
    tree: &SyntaxTree,
    name: &str,
    found: impl FnMut(&SyntaxNode) -> Option<T>,
) -> Option<T> {
    let mut search = InvocationSearch {
        name,
        found,
        result: None,
    };
    walk(tree, &mut search);
    search.result
}

/// The decoded project name declared as `Package(name: "...")`.
pub fn find_project_name(tree: &SyntaxTree) -> Option<String> {
    find_project_name_with(tree, &ManifestPattern::default())
}

pub fn find_project_name_with(tree: &SyntaxTree, pattern: &ManifestPattern) -> Option<String> {
    search(tree, &pattern.callee, |node| {
        let (_, expr) = labeled_value(node, &pattern.label)?;
        let token = sole_child(&expr)?.into_token()?;
        if token.kind() != SyntaxKind::StringLiteral {
            return None;
        }
        decode_string_literal(token.text())
    })
}

/// Path to the array literal passed as `inner_label:` to the call or macro
/// named `outer_call_name`.
pub fn find_argument_list(
    tree: &SyntaxTree,
    outer_call_name: &str,
    inner_label: &str,
) -> Option<NodePath> {
    search(tree, outer_call_name, |node| {
        let (_, expr) = labeled_value(node, inner_label)?;
        let array = sole_child(&expr)?.into_node()?;
        (array.kind() == SyntaxKind::ArrayLiteral).then(|| NodePath::of(&array))
    })
}

/// Path to the value of the first `inner_label:` argument of
/// `outer_call_name`, whatever its shape.
pub fn locate_argument_value(
    tree: &SyntaxTree,
    outer_call_name: &str,
    inner_label: &str,
) -> Option<NodePath> {
    search(tree, outer_call_name, |node| {
        labeled_value(node, inner_label).map(|(expr_path, _)| expr_path)
    })
}

/// Base names of the `Base.accessor` elements of an array literal.
pub fn member_entries(array: &SyntaxNode, accessor: &str) -> Vec<String> {
    array
        .children()
        .filter(|n| n.kind() == SyntaxKind::ArrayElement)
        .filter_map(|element| {
            let expr = child_of_kind(&element, SyntaxKind::Expr)?;
            let access = sole_child(&expr)?.into_node()?;
            if access.kind() != SyntaxKind::MemberAccessExpr {
                return None;
            }
            let parts: Vec<SyntaxElement> = significant_children(&access).collect();
            let [base, _dot, member] = parts.as_slice() else {
                return None;
            };
            if unescaped_name(member.as_token()?.text()) != accessor {
                return None;
            }
            let base = base.as_node()?;
            if base.kind() != SyntaxKind::DeclReference {
                return None;
            }
            first_significant_token(base).map(|t| unescaped_name(t.text()).to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parser::parse;
    use crate::syntax::tree::trimmed_text;

    const MANIFEST: &str = r#"// swift-tools-version: 5.9
import PackageDescription

let package = Package(
    name: "Demo",
    products: [
        .library(name: "DemoLib", type: .dynamic, targets: ["Demo"]),
    ],
    targets: [
        .target(name: "Demo", dependencies: ["SwiftGodot"]),
    ]
)
"#;

    #[test]
    fn finds_package_name() {
        let tree = parse(MANIFEST).unwrap();
        assert_eq!(find_project_name(&tree).as_deref(), Some("Demo"));
    }

    #[test]
    fn decoy_before_target_is_ignored() {
        let source = r#"
let lib = Product.library(name: "Decoy", targets: [])
let other = Target(name: "AlsoDecoy")
let package = Package(name: "Real", products: [.library(name: "Inner")])
"#;
        let tree = parse(source).unwrap();
        assert_eq!(find_project_name(&tree).as_deref(), Some("Real"));
    }

    #[test]
    fn skips_calls_with_non_literal_names() {
        let source = r#"
let a = Package(name: projectName)
let b = Package(name: "prefix" + suffix)
let c = Package(name: "Third")
"#;
        let tree = parse(source).unwrap();
        assert_eq!(find_project_name(&tree).as_deref(), Some("Third"));
    }

    #[test]
    fn interpolated_name_is_absent() {
        let tree = parse(r#"let p = Package(name: "Demo\(n)")"#).unwrap();
        assert_eq!(find_project_name(&tree), None);
    }

    #[test]
    fn absent_name() {
        let tree = parse("let x = 1\nprint(x)\n").unwrap();
        assert_eq!(find_project_name(&tree), None);
    }

    #[test]
    fn custom_manifest_pattern() {
        let tree = parse(r#"Workspace(title: "Mine")"#).unwrap();
        let pattern = ManifestPattern {
            callee: "Workspace".into(),
            label: "title".into(),
        };
        assert_eq!(find_project_name_with(&tree, &pattern).as_deref(), Some("Mine"));
    }

    #[test]
    fn locates_types_list_in_macro() {
        let source = "#initSwiftExtension(cdecl: \"swift_entry_point\", types: [Foo.self, Bar.self])\n";
        let tree = parse(source).unwrap();
        let path = find_argument_list(&tree, "initSwiftExtension", "types").unwrap();
        let array = tree.node_at(&path).unwrap();
        assert_eq!(array.kind(), SyntaxKind::ArrayLiteral);
        assert_eq!(member_entries(&array, "self"), vec!["Foo", "Bar"]);
    }

    #[test]
    fn unrelated_types_label_is_not_matched() {
        let source = "let config = Settings(types: [Wrong.self])\n#initSwiftExtension(types: [Right.self])\n";
        let tree = parse(source).unwrap();
        let path = find_argument_list(&tree, "initSwiftExtension", "types").unwrap();
        let array = tree.node_at(&path).unwrap();
        assert_eq!(member_entries(&array, "self"), vec!["Right"]);
    }

    #[test]
    fn non_array_value_is_located_but_not_listed() {
        let tree = parse("#initSwiftExtension(types: allTypes)").unwrap();
        assert!(find_argument_list(&tree, "initSwiftExtension", "types").is_none());
        let value = locate_argument_value(&tree, "initSwiftExtension", "types").unwrap();
        assert_eq!(trimmed_text(&tree.node_at(&value).unwrap()), "allTypes");
    }

    #[test]
    fn comments_between_label_and_value_are_skipped() {
        let source = "#initSwiftExtension(\n    types /* kinds */ : // registered\n    [Foo.self]\n)\n";
        let tree = parse(source).unwrap();
        let path = find_argument_list(&tree, "initSwiftExtension", "types").unwrap();
        assert_eq!(member_entries(&tree.node_at(&path).unwrap(), "self"), vec!["Foo"]);
    }

    #[test]
    fn unicode_project_name() {
        let tree = parse("let package = Package(name: \"Café\")").unwrap();
        assert_eq!(find_project_name(&tree).as_deref(), Some("Café"));
    }

    #[test]
    fn plain_call_can_be_the_outer_invocation() {
        let tree = parse("register(types: [])").unwrap();
        assert!(find_argument_list(&tree, "register", "types").is_some());
        assert!(find_argument_list(&tree, "initSwiftExtension", "types").is_none());
    }
}
