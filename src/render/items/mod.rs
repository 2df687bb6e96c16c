/// Class and interface rendering, members included.
pub mod class;
/// Function rendering.
pub mod function;
/// Type aliases, constants, variables and plain values.
pub mod others;

use crate::extract::{ExtractedSymbol, Kind, examples, param_doc, returns_doc, summary, template_docs, throws_tags};
use crate::oracle::{DocComment, Param, Signature, TypeParam};

use super::state::RenderState;
use super::utils::{code, join_blocks, labelled_list, ts_fence, with_doc};

pub(crate) const TYPE_UNAVAILABLE: &str = "*Type information unavailable*";
pub(crate) const NO_DOCUMENTATION: &str = "*No documentation*";

/// Render one exported symbol as a markdown fragment.
pub fn render_symbol(state: &RenderState, symbol: &ExtractedSymbol, heading_prefix: &str) -> String {
	let resolution = &symbol.resolution;
	let link_to = if resolution.via_alias {
		resolution.declaration
	} else {
		resolution.original
	};
	let mut blocks = vec![state.title(heading_prefix, &symbol.name, symbol.kind.label(), link_to)];

	let summary = summary(symbol.doc);
	let body = match symbol.kind {
		Kind::Function => function::function_body(state, symbol),
		Kind::Class | Kind::AbstractClass | Kind::Interface => class::class_body(state, symbol, heading_prefix),
		Kind::TypeAlias => others::type_alias_body(state, symbol),
		Kind::Constant => others::value_body("Value", symbol),
		Kind::Variable | Kind::Value => others::value_body("Type", symbol),
	};

	match summary {
		Some(summary) => blocks.push(summary.to_string()),
		None if body.is_empty() => blocks.push(NO_DOCUMENTATION.to_string()),
		None => {}
	}
	blocks.extend(body);
	join_blocks(&blocks)
}

/// Type parameters, parameters, returns, throws and examples of a callable.
pub(crate) fn callable_blocks(signature: &Signature, doc: Option<&DocComment>) -> Vec<String> {
	[
		type_params_block(&signature.type_params, doc),
		params_block("Parameters", &signature.params, doc),
		returns_block(signature, doc),
		throws_block(doc),
		examples_block(doc),
	]
	.into_iter()
	.flatten()
	.collect()
}

/// `**Type Parameters:**` with `@template` docs matched by position.
pub(crate) fn type_params_block(type_params: &[TypeParam], doc: Option<&DocComment>) -> Option<String> {
	let templates = template_docs(doc);
	let entries: Vec<String> = type_params
		.iter()
		.enumerate()
		.map(|(idx, param)| with_doc(format!("- {}", code(&param.display())), templates.get(idx).copied()))
		.collect();
	labelled_list("Type Parameters", &entries)
}

/// A parameter list with `@param` docs matched by name.
pub(crate) fn params_block(label: &str, params: &[Param], doc: Option<&DocComment>) -> Option<String> {
	let entries: Vec<String> = params.iter().map(|param| param_entry(param, doc)).collect();
	labelled_list(label, &entries)
}

fn param_entry(param: &Param, doc: Option<&DocComment>) -> String {
	let name = if param.rest {
		format!("...{}", param.name)
	} else {
		param.name.clone()
	};
	let mut entry = format!("- {}", code(&name));
	if let Some(ty) = &param.type_annotation {
		entry.push_str(": ");
		entry.push_str(&code(ty));
	}
	if param.optional {
		entry.push_str(" *(optional)*");
	}
	if let Some(default) = &param.default {
		entry.push_str(&format!(" *(default: {})*", code(default)));
	}
	with_doc(entry, param_doc(doc, &param.name))
}

/// `**Returns:**` when there is a `@returns` tag or an annotated non-void return type.
pub(crate) fn returns_block(signature: &Signature, doc: Option<&DocComment>) -> Option<String> {
	let returns = returns_doc(doc);
	let annotated = signature.return_type.as_deref().filter(|ty| *ty != "void");
	if returns.is_none() && annotated.is_none() {
		return None;
	}
	Some(with_doc(format!("**Returns:** {}", code(signature.effective_return())), returns))
}

/// `**Throws:**` listing every `@throws` tag in source order.
pub(crate) fn throws_block(doc: Option<&DocComment>) -> Option<String> {
	let entries: Vec<String> = throws_tags(doc)
		.into_iter()
		.map(|tag| match &tag.type_expression {
			Some(ty) => with_doc(format!("- {}", code(ty)), Some(&tag.body)),
			None => format!("- {}", tag.body.replace('\n', " ")),
		})
		.collect();
	labelled_list("Throws", &entries)
}

/// `**Example:**` or `**Examples:**` followed by one code block per `@example` tag.
pub(crate) fn examples_block(doc: Option<&DocComment>) -> Option<String> {
	let bodies = examples(doc);
	let label = match bodies.len() {
		0 => return None,
		1 => "Example",
		_ => "Examples",
	};
	let rendered: Vec<String> = bodies
		.into_iter()
		.map(|body| {
			if body.contains("```") {
				body.trim_end().to_string()
			} else {
				ts_fence(body)
			}
		})
		.collect();
	Some(format!("**{label}:**\n\n{}", rendered.join("\n\n")))
}
