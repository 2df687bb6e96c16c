use std::collections::HashSet;

use super::Program;
use super::model::*;

impl Program {
	/// Display string for the type of `symbol` as seen at declaration `site`.
	///
	/// Rendering is syntactic. `None` means the type could not be determined and callers should
	/// degrade to a placeholder.
	pub fn type_to_string(&self, symbol: SymbolId, site: DeclId) -> Option<String> {
		let mut visiting = HashSet::new();
		if let Some(rendered) = self.decl_type(site, &mut visiting) {
			return Some(rendered);
		}
		let target = self.resolve_alias(symbol)?;
		let primary = self.symbol(target).primary()?;
		self.decl_type(primary, &mut visiting)
	}

	/// Display string for the type of a single declaration, such as a class member.
	pub fn declaration_type(&self, site: DeclId) -> Option<String> {
		self.decl_type(site, &mut HashSet::new())
	}

	fn decl_type(&self, id: DeclId, visiting: &mut HashSet<DeclId>) -> Option<String> {
		if !visiting.insert(id) {
			return None;
		}
		let decl = self.declaration(id);
		match &decl.kind {
			DeclKind::Function(signature) | DeclKind::Method(signature) | DeclKind::Constructor(signature) => {
				Some(function_type(signature))
			}
			DeclKind::Getter(signature) => Some(signature.effective_return().to_string()),
			DeclKind::Setter(signature) => signature
				.params
				.first()
				.map(|param| param.type_annotation.clone().unwrap_or_else(|| "any".to_string())),
			DeclKind::Class(_) | DeclKind::Other => Some(format!("typeof {}", decl.name())),
			DeclKind::Interface(_) | DeclKind::TypeAlias(_) => Some(decl.name().to_string()),
			DeclKind::Variable(variable) => self.value_type(
				decl.file,
				variable.type_annotation.as_deref(),
				variable.initializer.as_ref(),
				self.declared_const(id),
				visiting,
			),
			DeclKind::Property(property) => self.value_type(
				decl.file,
				property.type_annotation.as_deref(),
				property.initializer.as_ref(),
				decl.has(Modifiers::READONLY),
				visiting,
			),
			DeclKind::VariableList | DeclKind::VariableStatement | DeclKind::ExportSpecifier => None,
		}
	}

	fn value_type(
		&self,
		file: FileId,
		annotation: Option<&str>,
		initializer: Option<&Expr>,
		constant: bool,
		visiting: &mut HashSet<DeclId>,
	) -> Option<String> {
		if let Some(annotation) = annotation {
			return Some(annotation.to_string());
		}
		match initializer? {
			Expr::Literal(literal) if constant => Some(literal.text.clone()),
			Expr::Literal(literal) => Some(literal.widened.to_string()),
			Expr::Function(signature) => Some(function_type(signature)),
			Expr::Identifier(name) => {
				let target = self.resolve_name(file, name)?;
				let primary = self.symbol(target).primary()?;
				self.decl_type(primary, visiting)
			}
			Expr::Assertion { asserted, .. } => Some(asserted.clone()),
			Expr::New(ctor) => Some(ctor.clone()),
			Expr::Other(_) => None,
		}
	}

	fn declared_const(&self, id: DeclId) -> bool {
		let mut current = Some(id);
		while let Some(decl) = current.map(|id| self.declaration(id)) {
			if decl.has(Modifiers::CONST) {
				return true;
			}
			current = decl.parent;
		}
		false
	}
}

/// `<T>(a: A, b?: B, ...rest: R) => Ret`
pub(crate) fn function_type(signature: &Signature) -> String {
	let mut out = type_params(&signature.type_params);
	out.push('(');
	out.push_str(&params(&signature.params));
	out.push_str(") => ");
	out.push_str(signature.effective_return());
	out
}

/// Declaration-style signature: `name<T>(a: A): Ret`.
pub(crate) fn declaration_signature(name: &str, signature: &Signature) -> String {
	format!(
		"{name}{}({}): {}",
		type_params(&signature.type_params),
		params(&signature.params),
		signature.effective_return()
	)
}

pub(crate) fn type_params(type_params: &[TypeParam]) -> String {
	if type_params.is_empty() {
		return String::new();
	}
	let inner: Vec<String> = type_params.iter().map(TypeParam::display).collect();
	format!("<{}>", inner.join(", "))
}

fn params(params: &[Param]) -> String {
	params
		.iter()
		.map(|param| {
			let ty = param
				.type_annotation
				.as_deref()
				.or(param.default_type.as_deref())
				.unwrap_or("any");
			if param.rest {
				format!("...{}: {ty}", param.name)
			} else if param.optional || param.default.is_some() {
				format!("{}?: {ty}", param.name)
			} else {
				format!("{}: {ty}", param.name)
			}
		})
		.collect::<Vec<_>>()
		.join(", ")
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use super::*;

	fn rendered(src: &str, name: &str) -> Option<String> {
		let prog = Program::from_source(Path::new("types.ts"), src).expect("program");
		let symbol = prog.lookup_export(prog.entry(), name).expect("export");
		let site = prog.symbol(symbol).primary().expect("declaration");
		prog.type_to_string(symbol, site)
	}

	#[test]
	fn const_literals_keep_their_literal_type() {
		assert_eq!(rendered("export const answer = 42;", "answer").as_deref(), Some("42"));
		assert_eq!(rendered("export const greeting = 'hi';", "greeting").as_deref(), Some("\"hi\""));
		assert_eq!(rendered("export let count = 0;", "count").as_deref(), Some("number"));
	}

	#[test]
	fn annotations_are_verbatim() {
		assert_eq!(
			rendered("export const table: Record<string, number[]> = {};", "table").as_deref(),
			Some("Record<string, number[]>")
		);
	}

	#[test]
	fn callables_render_as_arrow_types() {
		assert_eq!(
			rendered("export function pick<T>(items: T[], index = 0): T { return items[index]; }", "pick").as_deref(),
			Some("<T>(items: T[], index?: number) => T")
		);
		assert_eq!(
			rendered("export const log = (...parts: string[]) => { console.log(parts); };", "log").as_deref(),
			Some("(...parts: string[]) => void")
		);
	}

	#[test]
	fn unannotated_defaults_widen_their_literal() {
		assert_eq!(
			rendered("export function open(path, retries = 3, mode = 'r', flag = fallback()) {}", "open").as_deref(),
			Some("(path: any, retries?: number, mode?: string, flag?: any) => void")
		);
	}

	#[test]
	fn identifiers_follow_their_binding() {
		let src = "class Impl {}\nfunction make(): Impl { return new Impl(); }\nexport const Alias = Impl;\nexport const factory = make;\n";
		assert_eq!(rendered(src, "Alias").as_deref(), Some("typeof Impl"));
		assert_eq!(rendered(src, "factory").as_deref(), Some("() => Impl"));
	}

	#[test]
	fn assertions_and_unknown_expressions() {
		assert_eq!(rendered("export const n = JSON.parse('1') as number;", "n").as_deref(), Some("number"));
		assert_eq!(rendered("export const n = JSON.parse('1');", "n"), None);
	}

	#[test]
	fn self_reference_terminates() {
		assert_eq!(rendered("export const a = a;", "a"), None);
	}
}
