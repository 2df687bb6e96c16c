use std::path::PathBuf;

use bitflags::bitflags;

use super::jsdoc::DocComment;

/// Index of a parsed source file inside a [`super::Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(pub(crate) usize);

/// Index of a declaration inside a [`super::Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(pub(crate) usize);

/// Index of a symbol inside a [`super::Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub(crate) usize);

bitflags! {
	/// Syntactic modifiers attached to a declaration.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
	pub struct Modifiers: u32 {
		/// `export`
		const EXPORT = 1 << 0;
		/// `export default`
		const DEFAULT = 1 << 1;
		/// `declare`
		const DECLARE = 1 << 2;
		/// `abstract`
		const ABSTRACT = 1 << 3;
		/// `static`
		const STATIC = 1 << 4;
		/// `readonly`
		const READONLY = 1 << 5;
		/// `const` on a variable declaration list.
		const CONST = 1 << 6;
		/// `async`
		const ASYNC = 1 << 7;
		/// `?` on a member or parameter.
		const OPTIONAL = 1 << 8;
		/// `private`
		const PRIVATE = 1 << 9;
		/// `protected`
		const PROTECTED = 1 << 10;
	}
}

/// A parsed source file and its module surface.
#[derive(Debug, Clone)]
pub struct SourceFile {
	/// Canonical path of the file on disk.
	pub path: PathBuf,
	/// Exported bindings in source order. `None` when the file exports nothing.
	pub exports: Option<Vec<ExportedBinding>>,
}

/// A name visible at a module's public surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedBinding {
	/// Exported name (`default` for default exports).
	pub name: String,
	/// Symbol the name refers to.
	pub symbol: SymbolId,
}

/// A named construct, either declared directly or aliasing another module's symbol.
#[derive(Debug, Clone)]
pub struct Symbol {
	/// Local name of the symbol.
	pub name: String,
	/// File that owns the symbol.
	pub file: FileId,
	/// Declarations in source order; the first one is the primary declaration.
	pub declarations: Vec<DeclId>,
	/// Alias target when this symbol is an import binding or export specifier.
	pub alias: Option<AliasTarget>,
}

impl Symbol {
	/// Primary declaration of the symbol.
	pub fn primary(&self) -> Option<DeclId> {
		self.declarations.first().copied()
	}

	/// Secondary declarations, such as additional overload signatures.
	pub fn secondary(&self) -> &[DeclId] {
		self.declarations.get(1..).unwrap_or(&[])
	}
}

/// What an alias symbol points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTarget {
	/// Scope the name is looked up in.
	pub scope: AliasScope,
	/// Name looked up in the target scope.
	pub name: String,
}

/// Where an alias target lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasScope {
	/// Local bindings of the file that owns the alias (`export { a as b }`).
	Local,
	/// Export table of another loaded module.
	Module(FileId),
	/// A specifier that could not be mapped to a file, such as a package import.
	External(String),
}

/// One syntactic declaration.
#[derive(Debug, Clone)]
pub struct Declaration {
	/// Declared name, when the declaration has one.
	pub name: Option<String>,
	/// Variant-specific structure.
	pub kind: DeclKind,
	/// Modifiers written on the declaration.
	pub modifiers: Modifiers,
	/// Syntactic parent (declaration list, statement, or owning class).
	pub parent: Option<DeclId>,
	/// JSDoc comment attached directly to this node.
	pub doc: Option<DocComment>,
	/// File the declaration lives in.
	pub file: FileId,
	/// One-based source line.
	pub line: usize,
	/// Later overload declarations of the same class or interface method.
	pub overloads: Vec<DeclId>,
}

impl Declaration {
	/// Name of the declaration or an empty string.
	pub fn name(&self) -> &str {
		self.name.as_deref().unwrap_or_default()
	}

	/// Test a modifier flag.
	pub fn has(&self, modifier: Modifiers) -> bool {
		self.modifiers.contains(modifier)
	}
}

/// Closed set of declaration shapes understood by the extractor.
#[derive(Debug, Clone)]
pub enum DeclKind {
	/// `function f() {}` or an overload signature.
	Function(Signature),
	/// `class C {}` or `abstract class C {}`.
	Class(ClassDecl),
	/// `interface I {}`.
	Interface(InterfaceDecl),
	/// `type T = ...`.
	TypeAlias(TypeAliasDecl),
	/// One declarator of a `const`/`let`/`var` list.
	Variable(VariableDecl),
	/// The declarator list (`const a = 1, b = 2`).
	VariableList,
	/// The statement wrapping a declarator list (`export const ...`).
	VariableStatement,
	/// Class or interface method.
	Method(Signature),
	/// Class field or interface property.
	Property(PropertyDecl),
	/// `get x()`.
	Getter(Signature),
	/// `set x(v)`.
	Setter(Signature),
	/// `constructor(...)`.
	Constructor(Signature),
	/// `export { local as name }`.
	ExportSpecifier,
	/// Enums, namespaces and other constructs only rendered as values.
	Other,
}

/// Parameters, type parameters and return type of a callable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
	/// Declared type parameters.
	pub type_params: Vec<TypeParam>,
	/// Declared parameters.
	pub params: Vec<Param>,
	/// Return type annotation.
	pub return_type: Option<String>,
	/// Best-effort return type when no annotation is written.
	pub inferred_return: String,
	/// Whether the callable has an implementation body (false for overload signatures).
	pub has_body: bool,
}

impl Signature {
	/// Annotated return type, or the inferred one.
	pub fn effective_return(&self) -> &str {
		self.return_type.as_deref().unwrap_or(&self.inferred_return)
	}
}

/// A formal parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Param {
	/// Parameter name or destructuring pattern text.
	pub name: String,
	/// Type annotation.
	pub type_annotation: Option<String>,
	/// Written with `?`.
	pub optional: bool,
	/// Default value expression.
	pub default: Option<String>,
	/// Primitive type of a literal default, used when there is no annotation.
	pub default_type: Option<String>,
	/// `...rest` parameter.
	pub rest: bool,
}

/// A type parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeParam {
	/// Type parameter name.
	pub name: String,
	/// `extends` constraint.
	pub constraint: Option<String>,
	/// Default type.
	pub default: Option<String>,
}

impl TypeParam {
	/// Render as written in a declaration header.
	pub fn display(&self) -> String {
		let mut out = self.name.clone();
		if let Some(constraint) = &self.constraint {
			out.push_str(" extends ");
			out.push_str(constraint);
		}
		if let Some(default) = &self.default {
			out.push_str(" = ");
			out.push_str(default);
		}
		out
	}
}

/// Class structure.
#[derive(Debug, Clone, Default)]
pub struct ClassDecl {
	/// Declared type parameters.
	pub type_params: Vec<TypeParam>,
	/// Members in declaration order, constructor included.
	pub members: Vec<DeclId>,
}

/// Interface structure.
#[derive(Debug, Clone, Default)]
pub struct InterfaceDecl {
	/// Declared type parameters.
	pub type_params: Vec<TypeParam>,
	/// Members in declaration order.
	pub members: Vec<DeclId>,
}

/// Type alias structure.
#[derive(Debug, Clone, Default)]
pub struct TypeAliasDecl {
	/// Declared type parameters.
	pub type_params: Vec<TypeParam>,
	/// The aliased type exactly as written.
	pub type_text: String,
}

/// A single variable declarator.
#[derive(Debug, Clone, Default)]
pub struct VariableDecl {
	/// Type annotation.
	pub type_annotation: Option<String>,
	/// Initializer expression.
	pub initializer: Option<Expr>,
}

/// A class field or interface property.
#[derive(Debug, Clone, Default)]
pub struct PropertyDecl {
	/// Type annotation.
	pub type_annotation: Option<String>,
	/// Initializer expression.
	pub initializer: Option<Expr>,
}

/// The subset of initializer expressions the oracle understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
	/// Number, string, boolean, null or template literal.
	Literal(Literal),
	/// Arrow function or function expression.
	Function(Signature),
	/// Reference to a binding by name.
	Identifier(String),
	/// `expression as Type` or `<Type>expression`.
	Assertion {
		/// Wrapped expression.
		expression: Box<Expr>,
		/// Asserted type text.
		asserted: String,
	},
	/// `new Ctor(...)`, holding the constructor text.
	New(String),
	/// Anything else, kept as source text.
	Other(String),
}

/// A literal value and its widened primitive type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
	/// Literal type text (`42`, `"hi"`, `true`).
	pub text: String,
	/// Widened type (`number`, `string`, `boolean`).
	pub widened: &'static str,
}
