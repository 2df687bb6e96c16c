//! Symbol resolution, classification and doc lookup for exported bindings.

mod classify;
mod docs;
mod resolve;

pub use self::classify::{Kind, classify, is_callable, is_immutable};
pub use self::docs::{examples, extract_doc, lookup_doc, param_doc, returns_doc, summary, template_docs, throws_tags};
pub use self::resolve::{Resolution, resolve};
use crate::oracle::{DocComment, ExportedBinding, Program};

/// Everything the renderer needs to know about one exported binding.
#[derive(Debug, Clone)]
pub struct ExtractedSymbol<'p> {
	/// Exported name.
	pub name: String,
	/// Declarations used for typing and for docs.
	pub resolution: Resolution,
	/// Semantic category.
	pub kind: Kind,
	/// Rendered type of the typing declaration, when available.
	pub type_string: Option<String>,
	/// Doc comment, export site first.
	pub doc: Option<&'p DocComment>,
}

/// Resolve, type, classify and document one export.
pub fn extract<'p>(program: &'p Program, binding: &ExportedBinding) -> Option<ExtractedSymbol<'p>> {
	let resolution = resolve(program, &binding.name, binding.symbol)?;
	let type_string = program.type_to_string(resolution.typing_symbol, resolution.declaration);
	let kind = classify(program, resolution.declaration, type_string.as_deref());
	Some(ExtractedSymbol {
		name: binding.name.clone(),
		resolution,
		kind,
		type_string,
		doc: lookup_doc(program, &resolution),
	})
}
