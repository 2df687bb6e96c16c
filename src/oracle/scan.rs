use std::path::PathBuf;

use tree_sitter::Node;

use super::jsdoc::{DocComment, parse_jsdoc};
use super::model::*;
use super::parse::{annotation_text, field_text, has_child_kind, node_text};
use super::{Program, resolve_module};

/// Populate `program` with the declarations, symbols and exports of one file.
pub(crate) fn scan_file(program: &mut Program, file: FileId, text: &str, root: Node<'_>) {
	let dir = program
		.file(file)
		.path
		.parent()
		.map(|p| p.to_path_buf())
		.unwrap_or_default();
	let mut scanner = FileScanner {
		program: &mut *program,
		file,
		text,
		dir,
		exports: Vec::new(),
		stars: Vec::new(),
	};

	let mut cursor = root.walk();
	for child in root.named_children(&mut cursor) {
		match child.kind() {
			"export_statement" => scanner.scan_export(child),
			"import_statement" => scanner.scan_import(child),
			_ => {
				let doc = scanner.doc_before(child);
				scanner.scan_declaration(child, None, Modifiers::empty(), doc);
			}
		}
	}

	let FileScanner { exports, stars, .. } = scanner;
	program.set_exports(file, exports, stars);
}

struct FileScanner<'p, 't> {
	program: &'p mut Program,
	file: FileId,
	text: &'t str,
	dir: PathBuf,
	exports: Vec<ExportedBinding>,
	stars: Vec<FileId>,
}

impl<'p, 't> FileScanner<'p, 't> {
	fn text_of(&self, node: Node<'_>) -> &'t str {
		node_text(node, self.text)
	}

	fn decl(&mut self, name: Option<&str>, kind: DeclKind, modifiers: Modifiers, parent: Option<DeclId>, doc: Option<DocComment>, node: Node<'_>) -> DeclId {
		self.program.push_decl(Declaration {
			name: name.map(str::to_string),
			kind,
			modifiers,
			parent,
			doc,
			file: self.file,
			line: node.start_position().row + 1,
			overloads: Vec::new(),
		})
	}

	/// The closest JSDoc block preceding `node`, skipping plain comments.
	fn doc_before(&self, node: Node<'_>) -> Option<DocComment> {
		let mut prev = node.prev_named_sibling();
		while let Some(candidate) = prev {
			if candidate.kind() != "comment" {
				return None;
			}
			if let Some(doc) = parse_jsdoc(self.text_of(candidate)) {
				return Some(doc);
			}
			prev = candidate.prev_named_sibling();
		}
		None
	}

	fn module_scope(&mut self, source: Node<'_>) -> AliasScope {
		let specifier = unquote(self.text_of(source));
		match resolve_module(&self.dir, specifier) {
			Some(path) => AliasScope::Module(self.program.file_for(&path)),
			None => AliasScope::External(specifier.to_string()),
		}
	}

	fn export(&mut self, name: &str, symbol: SymbolId) {
		if let Some(existing) = self.exports.iter_mut().find(|binding| binding.name == name) {
			existing.symbol = symbol;
			return;
		}
		self.exports.push(ExportedBinding {
			name: name.to_string(),
			symbol,
		});
	}

	fn scan_export(&mut self, node: Node<'_>) {
		let doc = self.doc_before(node);
		let is_default = has_child_kind(node, "default");
		let mut modifiers = Modifiers::EXPORT;
		if is_default {
			modifiers |= Modifiers::DEFAULT;
		}

		if let Some(declaration) = node.child_by_field_name("declaration") {
			let declared = if is_variable_statement(declaration) {
				let statement = self.decl(None, DeclKind::VariableStatement, modifiers, None, doc, node);
				self.scan_declaration(declaration, Some(statement), modifiers, None)
			} else {
				self.scan_declaration(declaration, None, modifiers, doc)
			};
			for symbol in declared {
				let name = if is_default {
					"default".to_string()
				} else {
					self.program.symbol(symbol).name.clone()
				};
				self.export(&name, symbol);
			}
			return;
		}

		if let Some(value) = node.child_by_field_name("value") {
			let symbol = self.scan_default_value(value, modifiers, doc);
			self.export("default", symbol);
			return;
		}

		let source = node.child_by_field_name("source").map(|s| self.module_scope(s));
		let mut cursor = node.walk();
		let clause = node.named_children(&mut cursor).find(|c| c.kind() == "export_clause");
		if let Some(clause) = clause {
			let mut cursor = clause.walk();
			let specifiers: Vec<Node<'_>> = clause
				.named_children(&mut cursor)
				.filter(|c| c.kind() == "export_specifier")
				.collect();
			let single = specifiers.len() == 1;
			for specifier in specifiers {
				let Some(local) = field_text(specifier, "name", self.text).map(unquote) else {
					continue;
				};
				let exported = field_text(specifier, "alias", self.text).map(unquote).unwrap_or(local);
				let spec_doc = if single { doc.clone() } else { None };
				let decl = self.decl(Some(exported), DeclKind::ExportSpecifier, modifiers, None, spec_doc, specifier);
				let symbol = self.program.push_symbol(Symbol {
					name: exported.to_string(),
					file: self.file,
					declarations: vec![decl],
					alias: Some(AliasTarget {
						scope: source.clone().unwrap_or(AliasScope::Local),
						name: local.to_string(),
					}),
				});
				self.export(exported, symbol);
			}
			return;
		}

		if has_child_kind(node, "*") && !has_child_kind(node, "namespace_export") {
			if let Some(AliasScope::Module(module)) = source {
				self.stars.push(module);
			}
		}
	}

	fn scan_default_value(&mut self, value: Node<'_>, modifiers: Modifiers, doc: Option<DocComment>) -> SymbolId {
		match value.kind() {
			"identifier" => {
				let target = self.text_of(value).to_string();
				let decl = self.decl(Some("default"), DeclKind::ExportSpecifier, modifiers, None, doc, value);
				self.program.push_symbol(Symbol {
					name: "default".to_string(),
					file: self.file,
					declarations: vec![decl],
					alias: Some(AliasTarget {
						scope: AliasScope::Local,
						name: target,
					}),
				})
			}
			"class" => self.scan_class(value, Some("default"), modifiers, doc),
			"function_expression" | "function" | "generator_function" => {
				let signature = self.signature(value);
				let decl = self.decl(Some("default"), DeclKind::Function(signature), modifiers, None, doc, value);
				self.detached_symbol("default", decl)
			}
			_ => {
				let variable = VariableDecl {
					type_annotation: None,
					initializer: Some(self.expr(value)),
				};
				let decl = self.decl(Some("default"), DeclKind::Variable(variable), modifiers | Modifiers::CONST, None, doc, value);
				self.detached_symbol("default", decl)
			}
		}
	}

	fn detached_symbol(&mut self, name: &str, decl: DeclId) -> SymbolId {
		self.program.push_symbol(Symbol {
			name: name.to_string(),
			file: self.file,
			declarations: vec![decl],
			alias: None,
		})
	}

	fn scan_import(&mut self, node: Node<'_>) {
		let Some(source) = node.child_by_field_name("source") else {
			return;
		};
		let scope = self.module_scope(source);
		let mut cursor = node.walk();
		let Some(clause) = node.named_children(&mut cursor).find(|c| c.kind() == "import_clause") else {
			return;
		};

		let mut cursor = clause.walk();
		for part in clause.named_children(&mut cursor) {
			match part.kind() {
				"identifier" => {
					let local = self.text_of(part);
					self.program.declare_import(
						self.file,
						local,
						AliasTarget {
							scope: scope.clone(),
							name: "default".to_string(),
						},
					);
				}
				"named_imports" => {
					let mut inner = part.walk();
					for specifier in part.named_children(&mut inner).filter(|c| c.kind() == "import_specifier") {
						let Some(imported) = field_text(specifier, "name", self.text).map(unquote) else {
							continue;
						};
						let local = field_text(specifier, "alias", self.text).unwrap_or(imported);
						self.program.declare_import(
							self.file,
							local,
							AliasTarget {
								scope: scope.clone(),
								name: imported.to_string(),
							},
						);
					}
				}
				_ => {}
			}
		}
	}

	/// Scan a top-level declaration and return the symbols it binds.
	fn scan_declaration(&mut self, node: Node<'_>, statement: Option<DeclId>, modifiers: Modifiers, doc: Option<DocComment>) -> Vec<SymbolId> {
		match node.kind() {
			"function_declaration" | "generator_function_declaration" | "function_signature" => {
				let Some(name) = field_text(node, "name", self.text) else {
					return Vec::new();
				};
				let mut modifiers = modifiers;
				if has_child_kind(node, "async") {
					modifiers |= Modifiers::ASYNC;
				}
				let signature = self.signature(node);
				let decl = self.decl(Some(name), DeclKind::Function(signature), modifiers, None, doc, node);
				vec![self.program.declare_local(self.file, name, decl)]
			}
			"class_declaration" | "abstract_class_declaration" => vec![self.scan_class(node, None, modifiers, doc)],
			"interface_declaration" => {
				let Some(name) = field_text(node, "name", self.text) else {
					return Vec::new();
				};
				let type_params = self.type_params(node);
				let decl = self.decl(
					Some(name),
					DeclKind::Interface(InterfaceDecl {
						type_params,
						members: Vec::new(),
					}),
					modifiers,
					None,
					doc,
					node,
				);
				let members = match node.child_by_field_name("body") {
					Some(body) => self.scan_members(body, decl),
					None => Vec::new(),
				};
				if let DeclKind::Interface(interface) = &mut self.program.decl_mut(decl).kind {
					interface.members = members;
				}
				vec![self.program.declare_local(self.file, name, decl)]
			}
			"type_alias_declaration" => {
				let Some(name) = field_text(node, "name", self.text) else {
					return Vec::new();
				};
				let alias = TypeAliasDecl {
					type_params: self.type_params(node),
					type_text: field_text(node, "value", self.text).unwrap_or_default().to_string(),
				};
				let decl = self.decl(Some(name), DeclKind::TypeAlias(alias), modifiers, None, doc, node);
				vec![self.program.declare_local(self.file, name, decl)]
			}
			"lexical_declaration" | "variable_declaration" => self.scan_variables(node, statement, modifiers, doc),
			"enum_declaration" | "internal_module" | "module" => {
				let Some(name) = field_text(node, "name", self.text) else {
					return Vec::new();
				};
				let decl = self.decl(Some(name), DeclKind::Other, modifiers, None, doc, node);
				vec![self.program.declare_local(self.file, name, decl)]
			}
			"ambient_declaration" => {
				let mut cursor = node.walk();
				let inner = node.named_children(&mut cursor).find(|c| c.kind() != "comment");
				match inner {
					Some(inner) => self.scan_declaration(inner, statement, modifiers | Modifiers::DECLARE, doc),
					None => Vec::new(),
				}
			}
			_ => Vec::new(),
		}
	}

	fn scan_variables(&mut self, node: Node<'_>, statement: Option<DeclId>, modifiers: Modifiers, doc: Option<DocComment>) -> Vec<SymbolId> {
		let mut list_modifiers = modifiers;
		if has_child_kind(node, "const") {
			list_modifiers |= Modifiers::CONST;
		}
		let list = self.decl(None, DeclKind::VariableList, list_modifiers, statement, doc, node);

		let mut declared = Vec::new();
		let mut cursor = node.walk();
		let declarators: Vec<Node<'_>> = node
			.named_children(&mut cursor)
			.filter(|c| c.kind() == "variable_declarator")
			.collect();
		for declarator in declarators {
			let Some(name_node) = declarator.child_by_field_name("name") else {
				continue;
			};
			if name_node.kind() != "identifier" {
				// Destructuring patterns bind several names without a single declared type.
				continue;
			}
			let name = self.text_of(name_node);
			let variable = VariableDecl {
				type_annotation: declarator.child_by_field_name("type").map(|t| annotation_text(t, self.text)),
				initializer: declarator.child_by_field_name("value").map(|v| self.expr(v)),
			};
			let decl = self.decl(Some(name), DeclKind::Variable(variable), modifiers & Modifiers::EXPORT, Some(list), None, declarator);
			declared.push(self.program.declare_local(self.file, name, decl));
		}
		declared
	}

	fn scan_class(&mut self, node: Node<'_>, name_override: Option<&str>, modifiers: Modifiers, doc: Option<DocComment>) -> SymbolId {
		let name = name_override
			.or_else(|| field_text(node, "name", self.text))
			.unwrap_or("default");
		let mut modifiers = modifiers;
		if node.kind() == "abstract_class_declaration" {
			modifiers |= Modifiers::ABSTRACT;
		}
		let class = ClassDecl {
			type_params: self.type_params(node),
			members: Vec::new(),
		};
		let decl = self.decl(Some(name), DeclKind::Class(class), modifiers, None, doc, node);
		let members = match node.child_by_field_name("body") {
			Some(body) => self.scan_members(body, decl),
			None => Vec::new(),
		};
		if let DeclKind::Class(class) = &mut self.program.decl_mut(decl).kind {
			class.members = members;
		}
		if name_override.is_some() {
			self.detached_symbol(name, decl)
		} else {
			self.program.declare_local(self.file, name, decl)
		}
	}

	/// Scan a class body or interface body.
	fn scan_members(&mut self, body: Node<'_>, owner: DeclId) -> Vec<DeclId> {
		let mut members: Vec<DeclId> = Vec::new();
		let mut cursor = body.walk();
		let nodes: Vec<Node<'_>> = body.named_children(&mut cursor).collect();
		for member in nodes {
			let Some(name) = field_text(member, "name", self.text) else {
				continue;
			};
			let mut modifiers = self.member_modifiers(member);
			let kind = match member.kind() {
				"method_definition" | "method_signature" | "abstract_method_signature" => {
					if member.kind() == "abstract_method_signature" {
						modifiers |= Modifiers::ABSTRACT;
					}
					let signature = self.signature(member);
					if name == "constructor" {
						DeclKind::Constructor(signature)
					} else if has_child_kind(member, "get") {
						DeclKind::Getter(signature)
					} else if has_child_kind(member, "set") {
						DeclKind::Setter(signature)
					} else {
						DeclKind::Method(signature)
					}
				}
				"public_field_definition" | "property_signature" => DeclKind::Property(PropertyDecl {
					type_annotation: member.child_by_field_name("type").map(|t| annotation_text(t, self.text)),
					initializer: member.child_by_field_name("value").map(|v| self.expr(v)),
				}),
				_ => continue,
			};

			let first = members.iter().copied().find(|existing| {
				let existing = self.program.declaration(*existing);
				existing.name() == name
					&& existing.has(Modifiers::STATIC) == modifiers.contains(Modifiers::STATIC)
					&& std::mem::discriminant(&existing.kind) == std::mem::discriminant(&kind)
					&& matches!(kind, DeclKind::Method(_) | DeclKind::Constructor(_))
			});

			let doc = self.doc_before(member);
			let decl = self.decl(Some(name), kind, modifiers, Some(owner), doc, member);
			match first {
				// Overloads hang off the first declaration so the member is listed once.
				Some(first) => self.program.decl_mut(first).overloads.push(decl),
				None => members.push(decl),
			}
		}
		members
	}

	fn member_modifiers(&self, member: Node<'_>) -> Modifiers {
		let mut modifiers = Modifiers::empty();
		let mut cursor = member.walk();
		for child in member.children(&mut cursor) {
			modifiers |= match child.kind() {
				"static" => Modifiers::STATIC,
				"readonly" => Modifiers::READONLY,
				"abstract" => Modifiers::ABSTRACT,
				"async" => Modifiers::ASYNC,
				"declare" => Modifiers::DECLARE,
				"?" => Modifiers::OPTIONAL,
				"accessibility_modifier" => match self.text_of(child) {
					"private" => Modifiers::PRIVATE,
					"protected" => Modifiers::PROTECTED,
					_ => Modifiers::empty(),
				},
				_ => Modifiers::empty(),
			};
		}
		modifiers
	}

	fn type_params(&self, node: Node<'_>) -> Vec<TypeParam> {
		let Some(list) = node.child_by_field_name("type_parameters") else {
			return Vec::new();
		};
		let mut cursor = list.walk();
		list.named_children(&mut cursor)
			.filter(|c| c.kind() == "type_parameter")
			.filter_map(|param| {
				let name = field_text(param, "name", self.text)?.to_string();
				let inner_type = |field: &str| {
					param
						.child_by_field_name(field)
						.and_then(|n| n.named_child(0))
						.map(|t| self.text_of(t).to_string())
				};
				Some(TypeParam {
					name,
					constraint: inner_type("constraint"),
					default: inner_type("value"),
				})
			})
			.collect()
	}

	fn signature(&self, node: Node<'_>) -> Signature {
		let mut params = Vec::new();
		if let Some(list) = node.child_by_field_name("parameters") {
			let mut cursor = list.walk();
			for param in list.named_children(&mut cursor) {
				if !matches!(param.kind(), "required_parameter" | "optional_parameter") {
					continue;
				}
				let Some(pattern) = param.child_by_field_name("pattern") else {
					continue;
				};
				let raw = self.text_of(pattern);
				if raw == "this" {
					continue;
				}
				let rest = pattern.kind() == "rest_pattern";
				params.push(Param {
					name: raw.trim_start_matches("...").to_string(),
					type_annotation: param.child_by_field_name("type").map(|t| annotation_text(t, self.text)),
					optional: param.kind() == "optional_parameter",
					default: field_text(param, "value", self.text).map(str::to_string),
					default_type: param.child_by_field_name("value").and_then(|value| match self.expr(value) {
						Expr::Literal(literal) => Some(literal.widened.to_string()),
						_ => None,
					}),
					rest,
				});
			}
		} else if let Some(single) = node.child_by_field_name("parameter") {
			params.push(Param {
				name: self.text_of(single).to_string(),
				..Param::default()
			});
		}

		Signature {
			type_params: self.type_params(node),
			params,
			return_type: node.child_by_field_name("return_type").map(|t| annotation_text(t, self.text)),
			inferred_return: self.infer_return(node),
			has_body: node.child_by_field_name("body").is_some(),
		}
	}

	/// Shallow return type inference for callables without an annotation.
	fn infer_return(&self, node: Node<'_>) -> String {
		let inner = match node.child_by_field_name("body") {
			None => "any".to_string(),
			Some(body) if body.kind() == "statement_block" => {
				if returns_value(body) {
					"unknown".to_string()
				} else {
					"void".to_string()
				}
			}
			Some(body) => match self.expr(body) {
				Expr::Literal(literal) => literal.widened.to_string(),
				Expr::Assertion { asserted, .. } => asserted,
				Expr::New(ctor) => ctor,
				_ => "unknown".to_string(),
			},
		};
		if has_child_kind(node, "async") {
			format!("Promise<{inner}>")
		} else {
			inner
		}
	}

	fn expr(&self, node: Node<'_>) -> Expr {
		let text = self.text_of(node);
		let literal = |text: String, widened: &'static str| Expr::Literal(Literal { text, widened });
		match node.kind() {
			"number" => literal(text.to_string(), "number"),
			"string" => literal(double_quoted(text), "string"),
			"template_string" => literal("string".to_string(), "string"),
			"true" | "false" => literal(text.to_string(), "boolean"),
			"null" => literal("null".to_string(), "null"),
			"undefined" => literal("undefined".to_string(), "undefined"),
			"unary_expression" if text.starts_with('-') => match node.child_by_field_name("argument") {
				Some(arg) if arg.kind() == "number" => literal(text.replace(' ', ""), "number"),
				_ => Expr::Other(text.to_string()),
			},
			"arrow_function" | "function_expression" | "function" | "generator_function" => Expr::Function(self.signature(node)),
			"identifier" if text == "undefined" => literal("undefined".to_string(), "undefined"),
			"identifier" => Expr::Identifier(text.to_string()),
			"as_expression" => {
				let mut cursor = node.walk();
				let parts: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
				match parts.as_slice() {
					[expression, asserted] => Expr::Assertion {
						expression: Box::new(self.expr(*expression)),
						asserted: self.text_of(*asserted).to_string(),
					},
					[expression] => self.expr(*expression),
					_ => Expr::Other(text.to_string()),
				}
			}
			"type_assertion" => {
				let mut cursor = node.walk();
				let parts: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
				match parts.as_slice() {
					[asserted, expression] => Expr::Assertion {
						expression: Box::new(self.expr(*expression)),
						asserted: self
							.text_of(*asserted)
							.trim_start_matches('<')
							.trim_end_matches('>')
							.trim()
							.to_string(),
					},
					_ => Expr::Other(text.to_string()),
				}
			}
			"satisfies_expression" | "non_null_expression" | "parenthesized_expression" => match node.named_child(0) {
				Some(inner) => self.expr(inner),
				None => Expr::Other(text.to_string()),
			},
			"new_expression" => match field_text(node, "constructor", self.text) {
				Some(ctor) => Expr::New(ctor.to_string()),
				None => Expr::Other(text.to_string()),
			},
			_ => Expr::Other(text.to_string()),
		}
	}
}

fn is_variable_statement(node: Node<'_>) -> bool {
	match node.kind() {
		"lexical_declaration" | "variable_declaration" => true,
		"ambient_declaration" => {
			let mut cursor = node.walk();
			node.named_children(&mut cursor).any(|c| matches!(c.kind(), "lexical_declaration" | "variable_declaration"))
		}
		_ => false,
	}
}

/// Whether a function body contains `return <value>` outside nested functions.
fn returns_value(node: Node<'_>) -> bool {
	let mut cursor = node.walk();
	for child in node.named_children(&mut cursor) {
		match child.kind() {
			"return_statement" if child.named_child_count() > 0 => return true,
			"function_declaration" | "function_expression" | "function" | "arrow_function" | "generator_function"
			| "generator_function_declaration" | "method_definition" | "class" | "class_declaration" => {}
			_ => {
				if returns_value(child) {
					return true;
				}
			}
		}
	}
	false
}

fn unquote(raw: &str) -> &str {
	let trimmed = raw.trim();
	for quote in ['"', '\'', '`'] {
		if let Some(inner) = trimmed.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
			return inner;
		}
	}
	trimmed
}

/// Render a string literal the way type displays show it.
fn double_quoted(raw: &str) -> String {
	let inner = unquote(raw);
	if raw.starts_with('"') || inner.contains('"') {
		raw.to_string()
	} else {
		format!("\"{inner}\"")
	}
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use super::*;

	fn program(src: &str) -> Program {
		Program::from_source(Path::new("scan.ts"), src).expect("program")
	}

	fn export_decl<'a>(prog: &'a Program, name: &str) -> &'a Declaration {
		let binding = prog
			.exports(prog.entry())
			.expect("exports")
			.iter()
			.find(|b| b.name == name)
			.expect("export");
		let decl = prog.symbol(binding.symbol).primary().expect("declaration");
		prog.declaration(decl)
	}

	#[test]
	fn const_flag_lives_on_the_list_and_doc_on_the_statement() {
		let prog = program("/** The universe... */\nexport const answer = 42;\n");
		let variable = export_decl(&prog, "answer");
		assert!(variable.doc.is_none());
		assert!(!variable.has(Modifiers::CONST));
		let list = prog.declaration(variable.parent.expect("list"));
		assert!(matches!(list.kind, DeclKind::VariableList));
		assert!(list.has(Modifiers::CONST));
		let statement = prog.declaration(list.parent.expect("statement"));
		assert!(matches!(statement.kind, DeclKind::VariableStatement));
		assert_eq!(statement.doc.as_ref().map(|d| d.summary.as_str()), Some("The universe..."));
		match &variable.kind {
			DeclKind::Variable(VariableDecl {
				initializer: Some(Expr::Literal(literal)),
				..
			}) => assert_eq!(literal.text, "42"),
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn function_parameters_and_type_parameters() {
		let prog = program(
			"/** Pick. */\nexport function pick<T extends object, K extends keyof T = keyof T>(obj: T, key?: K, ...rest: string[]): T[K] { return obj[key]; }\n",
		);
		let decl = export_decl(&prog, "pick");
		let DeclKind::Function(signature) = &decl.kind else {
			panic!("expected function");
		};
		assert_eq!(signature.type_params[0].display(), "T extends object");
		assert_eq!(signature.type_params[1].display(), "K extends keyof T = keyof T");
		assert_eq!(signature.params.len(), 3);
		assert!(signature.params[1].optional);
		assert!(signature.params[2].rest);
		assert_eq!(signature.params[2].name, "rest");
		assert_eq!(signature.return_type.as_deref(), Some("T[K]"));
		assert!(decl.doc.is_some());
	}

	#[test]
	fn class_members_and_modifiers() {
		let prog = program(
			"export abstract class Shape {\n  /** Sides. */\n  static readonly sides: number = 0;\n  constructor(public name: string) {}\n  abstract area(): number;\n  get label(): string { return this.name; }\n  private _secret = 1;\n}\n",
		);
		let decl = export_decl(&prog, "Shape");
		assert!(decl.has(Modifiers::ABSTRACT));
		let DeclKind::Class(class) = &decl.kind else {
			panic!("expected class");
		};
		let members: Vec<_> = class.members.iter().map(|m| prog.declaration(*m)).collect();
		assert_eq!(members.iter().map(|m| m.name()).collect::<Vec<_>>(), ["sides", "constructor", "area", "label", "_secret"]);
		assert!(members[0].has(Modifiers::STATIC | Modifiers::READONLY));
		assert!(members[0].doc.is_some());
		assert!(matches!(members[1].kind, DeclKind::Constructor(_)));
		assert!(members[2].has(Modifiers::ABSTRACT));
		assert!(matches!(members[3].kind, DeclKind::Getter(_)));
		assert!(members[4].has(Modifiers::PRIVATE));
	}

	#[test]
	fn method_overloads_hang_off_the_first_declaration() {
		let prog = program(
			"export class Parser {\n  parse(a: string): void;\n  parse(a: number): void;\n  parse(a: any) {}\n  static parse(): void {}\n}\n",
		);
		let DeclKind::Class(class) = &export_decl(&prog, "Parser").kind else {
			panic!("expected class");
		};
		assert_eq!(class.members.len(), 2);
		let first = prog.declaration(class.members[0]);
		assert_eq!(first.overloads.len(), 2);
		assert!(prog.declaration(class.members[1]).overloads.is_empty());
		let DeclKind::Method(last) = &prog.declaration(first.overloads[1]).kind else {
			panic!("expected method");
		};
		assert!(last.has_body);
	}

	#[test]
	fn assertion_initializer() {
		let prog = program("const impl = (x: number) => x;\nexport const api = impl as (x: number) => number;\n");
		let decl = export_decl(&prog, "api");
		match &decl.kind {
			DeclKind::Variable(VariableDecl {
				initializer: Some(Expr::Assertion { expression, asserted }),
				..
			}) => {
				assert_eq!(**expression, Expr::Identifier("impl".to_string()));
				assert_eq!(asserted, "(x: number) => number");
			}
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn inferred_returns() {
		let prog = program(
			"export const a = () => 1;\nexport const b = () => { console.log(1); };\nexport const c = async () => { return fetch(); };\n",
		);
		let inferred = |name: &str| match &export_decl(&prog, name).kind {
			DeclKind::Variable(VariableDecl {
				initializer: Some(Expr::Function(signature)),
				..
			}) => signature.inferred_return.clone(),
			other => panic!("unexpected {other:?}"),
		};
		assert_eq!(inferred("a"), "number");
		assert_eq!(inferred("b"), "void");
		assert_eq!(inferred("c"), "Promise<unknown>");
	}

	#[test]
	fn default_exports() {
		let prog = program("function main() {}\nexport default main;\n");
		let exports = prog.exports(prog.entry()).expect("exports");
		assert_eq!(exports[0].name, "default");
		let resolved = prog.resolve_alias(exports[0].symbol).expect("resolved");
		assert_eq!(prog.symbol(resolved).name, "main");
	}

	#[test]
	fn string_literals_display_double_quoted() {
		assert_eq!(double_quoted("'hi'"), "\"hi\"");
		assert_eq!(double_quoted("\"hi\""), "\"hi\"");
	}
}
