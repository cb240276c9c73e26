//! Source-aware patching of Swift files.
//!
//! Files are parsed into a lossless syntax tree, searched for a structural
//! pattern and, when editing, rewritten and rendered back. Rendering an
//! untouched tree reproduces the input byte for byte, so an edit changes
//! nothing but the intended span.
//!
//! ```
//! use swiftgodot_core::syntax::{extract_project_name, register_new_entry};
//!
//! let manifest = r#"let package = Package(name: "Demo", platforms: [.macOS(.v13)])"#;
//! assert_eq!(extract_project_name(manifest).unwrap().as_deref(), Some("Demo"));
//!
//! let init = "#initSwiftExtension(cdecl: \"swift_entry_point\", types: [Foo.self])";
//! assert_eq!(
//!     register_new_entry(init, "Bar").unwrap(),
//!     "#initSwiftExtension(cdecl: \"swift_entry_point\", types: [Foo.self, Bar.self])"
//! );
//! ```

pub mod error;
pub mod kind;
mod lexer;
pub mod literal;
pub mod matcher;
pub mod parser;
pub mod rewrite;
pub mod tree;
pub mod visit;

use tracing::{debug, instrument};

pub use error::{ParseError, ParseErrorReason, RewriteError};
pub use matcher::{
    ManifestPattern, RegistryPattern, find_argument_list, find_project_name,
    find_project_name_with, locate_argument_value,
};
pub use parser::parse;
pub use rewrite::insert_element;
pub use kind::{SwiftLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use lexer::is_identifier;
pub use tree::{NodePath, SyntaxTree};
pub use visit::{VisitControl, Visitor, walk};

/// The project name declared in a `Package.swift` manifest.
///
/// `Ok(None)` means the file parsed but declares no literal name.
pub fn extract_project_name(text: &str) -> Result<Option<String>, ParseError> {
    extract_project_name_with(&ManifestPattern::default(), text)
}

#[instrument(skip(text), fields(len = text.len()))]
pub fn extract_project_name_with(
    pattern: &ManifestPattern,
    text: &str,
) -> Result<Option<String>, ParseError> {
    let tree = parse(text)?;
    let name = find_project_name_with(&tree, pattern);
    debug!(?name, "extracted project name");
    Ok(name)
}

/// Register `new_name` in the `#initSwiftExtension(types: [...])` list of an
/// initializer source file, returning the edited text.
pub fn register_new_entry(text: &str, new_name: &str) -> Result<String, RewriteError> {
    register_new_entry_with(&RegistryPattern::default(), text, new_name)
}

#[instrument(skip(text), fields(len = text.len()))]
pub fn register_new_entry_with(
    pattern: &RegistryPattern,
    text: &str,
    new_name: &str,
) -> Result<String, RewriteError> {
    let tree = parse(text)?;
    let list = locate_registry(&tree, pattern)?;
    let rewritten = insert_element(&tree, &list, new_name, &pattern.accessor)?;
    Ok(rewritten.render())
}

/// Names already registered in the initializer's list, in order.
pub fn registered_entries(
    pattern: &RegistryPattern,
    text: &str,
) -> Result<Vec<String>, RewriteError> {
    let tree = parse(text)?;
    let list = locate_registry(&tree, pattern)?;
    Ok(tree
        .node_at(&list)
        .map(|array| matcher::member_entries(&array, &pattern.accessor))
        .unwrap_or_default())
}

fn locate_registry(tree: &SyntaxTree, pattern: &RegistryPattern) -> Result<NodePath, RewriteError> {
    if let Some(path) = find_argument_list(tree, &pattern.macro_name, &pattern.label) {
        return Ok(path);
    }
    match locate_argument_value(tree, &pattern.macro_name, &pattern.label)
        .and_then(|path| tree.node_at(&path))
    {
        Some(value) => Err(RewriteError::Shape {
            expected: "array literal",
            found: self::tree::trimmed_text(&value),
        }),
        None => Err(RewriteError::NotFound {
            call: pattern.macro_name.clone(),
            label: pattern.label.clone(),
        }),
    }
}
