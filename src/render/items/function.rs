use crate::extract::{ExtractedSymbol, Resolution};
use crate::oracle::types::declaration_signature;
use crate::oracle::{DeclKind, Expr, Program, Signature, VariableDecl};

use super::super::state::RenderState;
use super::super::utils::ts_fence;
use super::{TYPE_UNAVAILABLE, callable_blocks, examples_block, throws_block};

/// Signature block followed by the callable sections.
pub(crate) fn function_body(state: &RenderState, symbol: &ExtractedSymbol) -> Vec<String> {
	let signatures = signatures(state.program, &symbol.resolution);
	let Some(primary) = signatures.first() else {
		// Callable only through its type, e.g. `const f: Handler = ...`.
		let signature = match &symbol.type_string {
			Some(ty) => ts_fence(&format!("{}: {ty}", symbol.name)),
			None => TYPE_UNAVAILABLE.to_string(),
		};
		return std::iter::once(signature)
			.chain(throws_block(symbol.doc))
			.chain(examples_block(symbol.doc))
			.collect();
	};

	let lines: Vec<String> = signatures
		.iter()
		.map(|signature| declaration_signature(&symbol.name, signature))
		.collect();
	let mut blocks = vec![ts_fence(&lines.join("\n"))];
	blocks.extend(callable_blocks(primary, symbol.doc));
	blocks
}

/// Signatures shown for a function: overload signatures when present, otherwise the
/// implementation.
fn signatures<'p>(program: &'p Program, resolution: &Resolution) -> Vec<&'p Signature> {
	let decl = program.declaration(resolution.declaration);
	match &decl.kind {
		DeclKind::Function(_) => {
			let all: Vec<&Signature> = program
				.symbol(resolution.typing_symbol)
				.declarations
				.iter()
				.filter_map(|id| match &program.declaration(*id).kind {
					DeclKind::Function(signature) => Some(signature),
					_ => None,
				})
				.collect();
			overload_signatures(all)
		}
		DeclKind::Variable(VariableDecl {
			type_annotation: None,
			initializer: Some(Expr::Function(signature)),
		}) => vec![signature],
		_ => Vec::new(),
	}
}

/// Drop the implementation signature when overload signatures exist.
pub(crate) fn overload_signatures(all: Vec<&Signature>) -> Vec<&Signature> {
	if all.len() > 1 && all.iter().any(|signature| !signature.has_body) {
		all.into_iter().filter(|signature| !signature.has_body).collect()
	} else {
		all
	}
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use pretty_assertions::assert_eq;

	use crate::oracle::Program;
	use crate::render::Renderer;

	fn render(src: &str) -> String {
		let prog = Program::from_source(Path::new("f.ts"), src).expect("program");
		Renderer::new().render_exports(&prog, "###").expect("render").join("\n")
	}

	#[test]
	fn documented_function() {
		let out = render(
			"/**\n * Clamp a value.\n *\n * @template T - numeric type\n * @param value - input\n * @param max - upper bound\n * @returns the clamped value\n * @throws {RangeError} when max is negative\n * @example\n * clamp(5, 3); // 3\n */\nexport function clamp<T extends number>(value: T, max = 10): number { return Math.min(value, max); }\n",
		);
		assert_eq!(
			out,
			"### clamp · function\n\nClamp a value.\n\n```ts\nclamp<T extends number>(value: T, max?: number): number\n```\n\n**Type Parameters:**\n\n- `T extends number` - numeric type\n\n**Parameters:**\n\n- `value`: `T` - input\n- `max` *(default: `10`)* - upper bound\n\n**Returns:** `number` - the clamped value\n\n**Throws:**\n\n- `RangeError` - when max is negative\n\n**Example:**\n\n```ts\nclamp(5, 3); // 3\n```\n"
		);
	}

	#[test]
	fn overloads_show_signatures_only() {
		let out = render(
			"export function parse(input: string): number;\nexport function parse(input: number): number;\nexport function parse(input: any): number { return Number(input); }\n",
		);
		assert!(out.contains("```ts\nparse(input: string): number\nparse(input: number): number\n```"));
		assert!(!out.contains("input: any"));
	}

	#[test]
	fn arrow_const_renders_as_function() {
		let out = render("/** Wrap. */\nexport const wrap = <T,>(x: T): T[] => [x];\n");
		assert!(out.starts_with("### wrap · function\n\nWrap.\n\n```ts\nwrap<T>(x: T): T[]\n```"));
	}

	#[test]
	fn rest_and_optional_parameters() {
		let out = render("export function log(prefix?: string, ...parts: unknown[]): void {}\n");
		assert!(out.contains("- `prefix`: `string` *(optional)*\n- `...parts`: `unknown[]`"));
		assert!(!out.contains("**Returns:**"));
	}
}
