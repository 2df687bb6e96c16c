use crate::extract::ExtractedSymbol;
use crate::oracle::DeclKind;
use crate::oracle::types::type_params;

use super::super::state::RenderState;
use super::super::utils::{code, ts_fence};
use super::{TYPE_UNAVAILABLE, examples_block, type_params_block};

/// The declared text of a type alias, kept verbatim.
pub(crate) fn type_alias_body(state: &RenderState, symbol: &ExtractedSymbol) -> Vec<String> {
	let decl = state.program.declaration(symbol.resolution.declaration);
	let DeclKind::TypeAlias(alias) = &decl.kind else {
		return value_body("Type", symbol);
	};
	let header = format!("type {}{} = {}", symbol.name, type_params(&alias.type_params), alias.type_text);
	std::iter::once(ts_fence(&header))
		.chain(type_params_block(&alias.type_params, symbol.doc))
		.chain(examples_block(symbol.doc))
		.collect()
}

/// `**{label}:** `type`` for constants, variables and values.
pub(crate) fn value_body(label: &str, symbol: &ExtractedSymbol) -> Vec<String> {
	let line = match &symbol.type_string {
		Some(ty) => format!("**{label}:** {}", code(ty)),
		None => TYPE_UNAVAILABLE.to_string(),
	};
	std::iter::once(line).chain(examples_block(symbol.doc)).collect()
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use pretty_assertions::assert_eq;

	use crate::oracle::Program;
	use crate::render::Renderer;

	fn render(src: &str) -> String {
		let prog = Program::from_source(Path::new("o.ts"), src).expect("program");
		Renderer::new().render_exports(&prog, "####").expect("render").join("\n")
	}

	#[test]
	fn trivial_constant() {
		assert_eq!(
			render("/** The universe... */\nexport const answer = 42;\n"),
			"#### answer · constant\n\nThe universe...\n\n**Value:** `42`\n"
		);
	}

	#[test]
	fn type_alias_keeps_declared_text() {
		assert_eq!(
			render("/** Options. */\nexport type Options<T = string> = {\n  value: T;\n  nested: { deep: boolean };\n};\n"),
			"#### Options · type\n\nOptions.\n\n```ts\ntype Options<T = string> = {\n  value: T;\n  nested: { deep: boolean };\n}\n```\n\n**Type Parameters:**\n\n- `T = string`\n"
		);
	}

	#[test]
	fn variables_and_values() {
		assert_eq!(render("export let counter = 0;\n"), "#### counter · variable\n\n**Type:** `number`\n");
		assert_eq!(render("export enum Color { Red }\n"), "#### Color · value\n\n**Type:** `typeof Color`\n");
		assert_eq!(
			render("export const data = load();\n"),
			"#### data · constant\n\n*Type information unavailable*\n"
		);
	}
}
