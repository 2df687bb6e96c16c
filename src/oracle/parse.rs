use std::path::Path;

use tree_sitter::{Language, Node, Parser, Tree};

use crate::core_api::Result;
use crate::core_api::error::TsReadmeError;

/// Read and parse a TypeScript source file.
pub(crate) fn parse_file(path: &Path) -> Result<(String, Tree)> {
	let text = std::fs::read_to_string(path).map_err(|e| TsReadmeError::io(path, e))?;
	let tree = parse_source(&text, path)?;
	Ok((text, tree))
}

/// Parse source text, picking the TSX grammar for `.tsx` paths.
pub(crate) fn parse_source(text: &str, path: &Path) -> Result<Tree> {
	let language: Language = if path.extension().is_some_and(|ext| ext == "tsx") {
		tree_sitter_typescript::LANGUAGE_TSX.into()
	} else {
		tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
	};
	let mut parser = Parser::new();
	parser.set_language(&language).map_err(|e| TsReadmeError::Parse {
		path: path.to_path_buf(),
		message: format!("failed to load TypeScript grammar: {e}"),
	})?;

	parser.parse(text, None).ok_or_else(|| TsReadmeError::Parse {
		path: path.to_path_buf(),
		message: "tree-sitter parse returned None".to_string(),
	})
}

/// Source text covered by a node.
pub(crate) fn node_text<'a>(node: Node<'_>, text: &'a str) -> &'a str {
	text.get(node.byte_range()).unwrap_or_default()
}

/// Text of a named field, if present.
pub(crate) fn field_text<'a>(node: Node<'_>, field: &str, text: &'a str) -> Option<&'a str> {
	node.child_by_field_name(field).map(|child| node_text(child, text))
}

/// Strip the leading `:` of a `type_annotation` node.
pub(crate) fn annotation_text(node: Node<'_>, text: &str) -> String {
	let raw = node_text(node, text).trim();
	raw.strip_prefix(':').unwrap_or(raw).trim().to_string()
}

/// Whether any direct child (named or anonymous) has the given kind.
pub(crate) fn has_child_kind(node: Node<'_>, kind: &str) -> bool {
	let mut cursor = node.walk();
	node.children(&mut cursor).any(|child| child.kind() == kind)
}
