use crate::oracle::{DeclId, DeclKind, Expr, Program, SymbolId, VariableDecl};

/// Where an exported binding's type and documentation come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
	/// Declaration used for classification and type rendering.
	pub declaration: DeclId,
	/// Symbol owning `declaration`.
	pub typing_symbol: SymbolId,
	/// Declaration of the exported binding itself, consulted first for docs.
	pub original: DeclId,
	/// Whether `declaration` was reached by following a re-export.
	pub via_alias: bool,
}

/// Follow re-exports and `value as Type` initializers to the declaration carrying real types.
///
/// Unresolvable aliases fall back to the exported symbol. Returns `None` only when the
/// exported symbol has no declaration at all.
pub fn resolve(program: &Program, name: &str, symbol: SymbolId) -> Option<Resolution> {
	let original = program.symbol(symbol).primary()?;
	let mut resolution = Resolution {
		declaration: original,
		typing_symbol: symbol,
		original,
		via_alias: false,
	};

	if program.symbol(symbol).alias.is_some() {
		match program
			.resolve_alias(symbol)
			.and_then(|target| Some((target, program.symbol(target).primary()?)))
		{
			Some((target, declaration)) => {
				resolution.declaration = declaration;
				resolution.typing_symbol = target;
				resolution.via_alias = true;
			}
			None => tracing::debug!("could not resolve alias for export `{name}`, documenting the specifier"),
		}
	}

	if let Some((target, declaration)) = asserted_target(program, resolution.declaration) {
		resolution.declaration = declaration;
		resolution.typing_symbol = target;
	}

	Some(resolution)
}

/// For `const x = y as T`, the symbol and declaration `y` refers to.
fn asserted_target(program: &Program, declaration: DeclId) -> Option<(SymbolId, DeclId)> {
	let decl = program.declaration(declaration);
	let DeclKind::Variable(VariableDecl {
		initializer: Some(Expr::Assertion { expression, .. }),
		..
	}) = &decl.kind
	else {
		return None;
	};
	let Expr::Identifier(inner) = expression.as_ref() else {
		return None;
	};
	let target = program.resolve_name(decl.file, inner);
	let found = target.and_then(|target| Some((target, program.symbol(target).primary()?)));
	if found.is_none() {
		tracing::debug!("assertion target `{inner}` did not resolve, keeping `{}`", decl.name());
	}
	found
}
