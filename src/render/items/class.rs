use crate::extract::{ExtractedSymbol, extract_doc, summary};
use crate::oracle::types::declaration_signature;
use crate::oracle::{DeclId, DeclKind, Declaration, Expr, Modifiers, Program, VariableDecl};

use super::super::state::RenderState;
use super::super::utils::{code, deeper, join_blocks, lower_first, ts_fence};
use super::function::overload_signatures;
use super::{NO_DOCUMENTATION, TYPE_UNAVAILABLE, callable_blocks, examples_block, others, params_block, type_params_block};

/// Bound on `const A = B` chains followed to reach a class.
const MAX_VALUE_HOPS: usize = 8;

/// Type parameters, examples, constructor parameters and member fragments.
pub(crate) fn class_body(state: &RenderState, symbol: &ExtractedSymbol, heading_prefix: &str) -> Vec<String> {
	let program = state.program;
	let Some(decl) = class_declaration(program, symbol.resolution.declaration) else {
		// A class-typed value whose class cannot be found: only its type is known.
		return others::value_body("Type", symbol);
	};
	let (type_params, members) = match &decl.kind {
		DeclKind::Class(class) => (&class.type_params, &class.members),
		DeclKind::Interface(interface) => (&interface.type_params, &interface.members),
		_ => return others::value_body("Type", symbol),
	};

	let mut blocks: Vec<String> = [type_params_block(type_params, symbol.doc), examples_block(symbol.doc)]
		.into_iter()
		.flatten()
		.collect();

	let constructor = members.iter().find_map(|id| {
		let member = program.declaration(*id);
		match &member.kind {
			DeclKind::Constructor(signature) => Some((*id, signature)),
			_ => None,
		}
	});
	if let Some((ctor, signature)) = constructor {
		// Constructor parameter docs come from the constructor's own comment.
		let ctor_doc = extract_doc(program, ctor);
		blocks.extend(params_block("Constructor Parameters", &signature.params, ctor_doc));
	}

	let owner = if symbol.name == "default" {
		decl.name()
	} else {
		symbol.name.as_str()
	};
	let member_prefix = deeper(heading_prefix);
	let (statics, instance): (Vec<DeclId>, Vec<DeclId>) = members
		.iter()
		.copied()
		.filter(|id| is_documented_member(state, *id))
		.partition(|id| program.declaration(*id).has(Modifiers::STATIC));
	for member in statics.into_iter().chain(instance) {
		blocks.push(render_member(state, owner, member, &member_prefix));
	}
	blocks
}

/// The class or interface behind `decl`, following `const Alias = Impl` bindings.
fn class_declaration(program: &Program, decl: DeclId) -> Option<&Declaration> {
	let mut current = program.declaration(decl);
	for _ in 0..MAX_VALUE_HOPS {
		match &current.kind {
			DeclKind::Class(_) | DeclKind::Interface(_) => return Some(current),
			DeclKind::Variable(VariableDecl {
				initializer: Some(Expr::Identifier(name)),
				..
			}) => {
				let target = program.resolve_name(current.file, name)?;
				current = program.declaration(program.symbol(target).primary()?);
			}
			_ => return None,
		}
	}
	None
}

fn is_documented_member(state: &RenderState, member: DeclId) -> bool {
	let decl = state.program.declaration(member);
	let name = decl.name();
	!matches!(decl.kind, DeclKind::Constructor(_))
		&& !name.starts_with('_')
		&& !name.starts_with('#')
}

/// `static`/`abstract` prefixes plus the member kind.
pub(crate) fn member_label(state: &RenderState, member: DeclId) -> String {
	let decl = state.program.declaration(member);
	let base = match decl.kind {
		DeclKind::Method(_) => "method",
		DeclKind::Getter(_) => "getter",
		DeclKind::Setter(_) => "setter",
		DeclKind::Constructor(_) => "constructor",
		_ => "property",
	};
	let mut label = String::new();
	if decl.has(Modifiers::ABSTRACT) {
		label.push_str("abstract ");
	}
	if decl.has(Modifiers::STATIC) {
		label.push_str("static ");
	}
	label.push_str(base);
	label
}

/// `Class.member` for statics, `class.member` for instance members.
pub(crate) fn member_display_name(owner: &str, name: &str, is_static: bool) -> String {
	if is_static {
		format!("{owner}.{name}")
	} else {
		format!("{}.{name}", lower_first(owner))
	}
}

fn render_member(state: &RenderState, owner: &str, member: DeclId, heading_prefix: &str) -> String {
	let program = state.program;
	let decl = program.declaration(member);
	let shown = member_display_name(owner, decl.name(), decl.has(Modifiers::STATIC));
	let doc = extract_doc(program, member);

	let mut blocks = vec![state.title(heading_prefix, &shown, &member_label(state, member), member)];
	if let Some(summary) = summary(doc) {
		blocks.push(summary.to_string());
	}

	match &decl.kind {
		DeclKind::Method(_) => {
			let signatures = overload_signatures(
				std::iter::once(member)
					.chain(decl.overloads.iter().copied())
					.filter_map(|id| match &program.declaration(id).kind {
						DeclKind::Method(signature) => Some(signature),
						_ => None,
					})
					.collect(),
			);
			let lines: Vec<String> = signatures
				.iter()
				.map(|signature| declaration_signature(decl.name(), signature))
				.collect();
			blocks.push(ts_fence(&lines.join("\n")));
			if let Some(primary) = signatures.first() {
				blocks.extend(callable_blocks(primary, doc));
			}
		}
		_ => {
			match program.declaration_type(member) {
				Some(ty) => blocks.push(format!("**Type:** {}", code(&ty))),
				None => {
					tracing::warn!("no type information for member `{shown}`");
					blocks.push(TYPE_UNAVAILABLE.to_string());
				}
			}
			blocks.extend(examples_block(doc));
		}
	}

	if blocks.len() == 1 {
		blocks.push(NO_DOCUMENTATION.to_string());
	}
	join_blocks(&blocks)
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::oracle::Program;
	use crate::render::Renderer;

	fn render(src: &str) -> String {
		let prog = Program::from_source(Path::new("c.ts"), src).expect("program");
		Renderer::new().render_exports(&prog, "###").expect("render").join("\n")
	}

	#[test]
	fn display_names() {
		assert_eq!(member_display_name("EventBus", "emit", false), "eventBus.emit");
		assert_eq!(member_display_name("EventBus", "create", true), "EventBus.create");
	}

	#[test]
	fn class_with_members() {
		let out = render(
			"/** A queue. */\nexport class Queue<T> {\n  /**\n   * @param limit - max size\n   */\n  constructor(limit: number) {}\n  /** Items. */\n  items: T[] = [];\n  /** Make one. */\n  static create(): Queue<number> { return new Queue(1); }\n  private _hidden = 1;\n  _internal(): void {}\n}\n",
		);
		assert_eq!(
			out,
			"### Queue · class\n\nA queue.\n\n**Type Parameters:**\n\n- `T`\n\n**Constructor Parameters:**\n\n- `limit`: `number` - max size\n\n#### Queue.create · static method\n\nMake one.\n\n```ts\ncreate(): Queue<number>\n```\n\n**Returns:** `Queue<number>`\n\n#### queue.items · property\n\nItems.\n\n**Type:** `T[]`\n"
		);
	}

	#[test]
	fn abstract_members_and_accessors() {
		let out = render(
			"export abstract class Shape {\n  abstract area(): number;\n  get name(): string { return 'shape'; }\n  set scale(value: number) {}\n}\n",
		);
		assert!(out.starts_with("### Shape · abstract class\n"));
		assert!(out.contains("#### shape.area · abstract method\n"));
		assert!(out.contains("#### shape.name · getter\n\n**Type:** `string`\n"));
		assert!(out.contains("#### shape.scale · setter\n\n**Type:** `number`\n"));
	}

	#[test]
	fn interface_members() {
		let out = render("/** A point. */\nexport interface Point {\n  /** Horizontal. */\n  x: number;\n  label?: string;\n  move(dx: number): Point;\n}\n");
		assert!(out.starts_with("### Point · interface\n\nA point.\n"));
		assert!(out.contains("#### point.x · property\n\nHorizontal.\n\n**Type:** `number`\n"));
		assert!(out.contains("#### point.label · property\n\n**Type:** `string`\n"));
		assert!(out.contains("#### point.move · method\n\n```ts\nmove(dx: number): Point\n```"));
	}

	#[test]
	fn class_valued_binding_renders_the_class_members() {
		let out = render(
			"class Impl {\n  /** @param size - initial size */\n  constructor(size: number) {}\n  /** Runs. */\n  run(): void {}\n}\n/** Public. */\nexport const Public = Impl;\n",
		);
		assert_eq!(
			out,
			"### Public · class\n\nPublic.\n\n**Constructor Parameters:**\n\n- `size`: `number` - initial size\n\n#### public.run · method\n\nRuns.\n\n```ts\nrun(): void\n```\n"
		);
	}

	#[test]
	fn method_overloads_show_every_signature() {
		let out = render("export class Codec {\n  /** Encode. */\n  foo(a: string): void;\n  foo(a: number): void;\n  foo(a: any) {}\n}\n");
		assert!(out.contains("#### codec.foo · method\n\nEncode.\n\n```ts\nfoo(a: string): void\nfoo(a: number): void\n```\n"));
		assert!(!out.contains("foo(a: any)"));
	}

	#[test]
	fn only_prefixed_names_are_hidden() {
		let out = render("export class Vault {\n  private key = 'k';\n  _scratch = 0;\n  #sealed = 1;\n}\n");
		assert!(out.contains("#### vault.key · property\n\n**Type:** `string`\n"));
		assert!(!out.contains("_scratch"));
		assert!(!out.contains("sealed"));
	}

	#[test]
	fn untyped_member_degrades() {
		let out = render("export class Box {\n  value = compute();\n}\n");
		assert!(out.contains("#### box.value · property\n\n*Type information unavailable*\n"));
	}
}
