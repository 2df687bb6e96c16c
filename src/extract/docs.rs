use crate::oracle::{DeclId, DeclKind, DocComment, Program, Tag};

use super::Resolution;

/// The doc comment attached to a declaration.
///
/// Variables also look at their declaration list and then the enclosing statement, which is
/// where `/** */` before `export const` ends up.
pub fn extract_doc(program: &Program, declaration: DeclId) -> Option<&DocComment> {
	let decl = program.declaration(declaration);
	if let Some(doc) = &decl.doc {
		return Some(doc);
	}
	if !matches!(decl.kind, DeclKind::Variable(_)) {
		return None;
	}
	let list = program.declaration(decl.parent?);
	if let Some(doc) = &list.doc {
		return Some(doc);
	}
	program.declaration(list.parent?).doc.as_ref()
}

/// Documentation for a resolved export: the export site first, then the resolved declaration.
pub fn lookup_doc<'p>(program: &'p Program, resolution: &Resolution) -> Option<&'p DocComment> {
	extract_doc(program, resolution.original).or_else(|| extract_doc(program, resolution.declaration))
}

/// Body of the `@param` tag whose name matches exactly.
pub fn param_doc<'d>(doc: Option<&'d DocComment>, name: &str) -> Option<&'d str> {
	doc?.param(name).filter(|body| !body.is_empty())
}

/// `@template` bodies, matched to type parameters by position.
pub fn template_docs(doc: Option<&DocComment>) -> Vec<&str> {
	doc.map(|doc| doc.tags_named("template").map(|tag| tag.body.as_str()).collect())
		.unwrap_or_default()
}

/// First `@returns` body.
pub fn returns_doc(doc: Option<&DocComment>) -> Option<&str> {
	doc?.tags_named("returns").map(|tag| tag.body.as_str()).find(|body| !body.is_empty())
}

/// `@throws` tags in source order.
pub fn throws_tags(doc: Option<&DocComment>) -> Vec<&Tag> {
	doc.map(|doc| doc.tags_named("throws").collect()).unwrap_or_default()
}

/// `@example` bodies in source order.
pub fn examples(doc: Option<&DocComment>) -> Vec<&str> {
	doc.map(|doc| {
		doc.tags_named("example")
			.map(|tag| tag.body.as_str())
			.filter(|body| !body.trim().is_empty())
			.collect()
	})
	.unwrap_or_default()
}

/// Summary text, if non-empty.
pub fn summary(doc: Option<&DocComment>) -> Option<&str> {
	doc.map(|doc| doc.summary.as_str()).filter(|summary| !summary.is_empty())
}
