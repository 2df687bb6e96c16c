use crate::oracle::{DeclId, DeclKind, Modifiers, Program};

/// Semantic category of an exported symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// Function declaration or callable value.
	Function,
	/// Concrete class, or a value holding a class.
	Class,
	/// `abstract class`.
	AbstractClass,
	/// `interface`.
	Interface,
	/// `type` alias.
	TypeAlias,
	/// Immutable, non-callable binding.
	Constant,
	/// Mutable, non-callable binding.
	Variable,
	/// Anything only known through its type.
	Value,
}

impl Kind {
	/// Label used in rendered headings.
	pub fn label(self) -> &'static str {
		match self {
			Kind::Function => "function",
			Kind::Class => "class",
			Kind::AbstractClass => "abstract class",
			Kind::Interface => "interface",
			Kind::TypeAlias => "type",
			Kind::Constant => "constant",
			Kind::Variable => "variable",
			Kind::Value => "value",
		}
	}
}

/// Classify a resolved declaration, using its rendered type for variables and fallbacks.
pub fn classify(program: &Program, declaration: DeclId, rendered: Option<&str>) -> Kind {
	let decl = program.declaration(declaration);
	let callable = rendered.is_some_and(is_callable);
	match &decl.kind {
		DeclKind::Function(_) => Kind::Function,
		DeclKind::Class(_) if decl.has(Modifiers::ABSTRACT) => Kind::AbstractClass,
		DeclKind::Class(_) => Kind::Class,
		DeclKind::Interface(_) => Kind::Interface,
		DeclKind::TypeAlias(_) => Kind::TypeAlias,
		DeclKind::Variable(_) => {
			// Call shape wins over const-ness.
			if callable {
				Kind::Function
			} else if rendered.is_some_and(|ty| ty.starts_with("typeof ")) {
				Kind::Class
			} else if is_immutable(program, declaration) {
				Kind::Constant
			} else {
				Kind::Variable
			}
		}
		_ if callable => Kind::Function,
		_ => Kind::Value,
	}
}

/// Whether a rendered type string denotes something callable.
pub fn is_callable(ty: &str) -> bool {
	ty.contains("=>") || ty.starts_with("{ (") || ty.starts_with("{ <")
}

/// Walk declaration, list and statement for a `const` flag. The first level carrying it wins.
pub fn is_immutable(program: &Program, declaration: DeclId) -> bool {
	let mut current = Some(declaration);
	while let Some(id) = current {
		let decl = program.declaration(id);
		if decl.has(Modifiers::CONST) {
			return true;
		}
		current = match decl.kind {
			DeclKind::Variable(_) | DeclKind::VariableList => decl.parent,
			_ => None,
		};
	}
	false
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use super::*;
	use crate::extract::resolve;

	fn kind_of(src: &str, name: &str) -> Kind {
		let prog = Program::from_source(Path::new("c.ts"), src).expect("program");
		let symbol = prog.lookup_export(prog.entry(), name).expect("export");
		let res = resolve(&prog, name, symbol).expect("resolution");
		let rendered = prog.type_to_string(res.typing_symbol, res.declaration);
		classify(&prog, res.declaration, rendered.as_deref())
	}

	#[test]
	fn const_literal_is_constant() {
		assert_eq!(kind_of("/** The universe... */\nexport const answer = 42;", "answer"), Kind::Constant);
	}

	#[test]
	fn const_arrow_is_function() {
		assert_eq!(kind_of("export const f = <T,>(x: T): T[] => [x];", "f"), Kind::Function);
	}

	#[test]
	fn abstract_and_concrete_classes() {
		let src = "export abstract class Shape { abstract area(): number; }\nexport class Square extends Shape { area() { return 1; } }\n";
		assert_eq!(kind_of(src, "Shape"), Kind::AbstractClass);
		assert_eq!(kind_of(src, "Square"), Kind::Class);
	}

	#[test]
	fn class_valued_variable_is_class() {
		assert_eq!(kind_of("class Impl {}\nexport const Public = Impl;", "Public"), Kind::Class);
	}

	#[test]
	fn let_binding_is_variable() {
		assert_eq!(kind_of("export let counter = 0;", "counter"), Kind::Variable);
	}

	#[test]
	fn structural_kinds() {
		assert_eq!(kind_of("export interface Point { x: number }", "Point"), Kind::Interface);
		assert_eq!(kind_of("export type Id = string | number;", "Id"), Kind::TypeAlias);
		assert_eq!(kind_of("export enum Color { Red }", "Color"), Kind::Value);
	}

	#[test]
	fn callable_markers() {
		assert!(is_callable("(a: number) => void"));
		assert!(is_callable("{ (a: number): void; name: string }"));
		assert!(is_callable("{ <T>(a: T): T }"));
		assert!(!is_callable("typeof Impl"));
		assert!(!is_callable("42"));
	}
}
