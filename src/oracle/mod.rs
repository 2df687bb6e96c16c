//! Type/AST oracle for TypeScript sources.
//!
//! The extractor and renderer only see the [`Program`] surface: export tables, symbols,
//! declarations and a type-rendering query. Parsing is done with tree-sitter; type rendering is
//! syntactic and returns `None` whenever it cannot produce a display string.

/// JSDoc comment parsing.
pub mod jsdoc;
/// Version-control deep-link lookup.
pub mod links;
/// Declaration, symbol and export data model.
pub mod model;
mod parse;
mod scan;
pub(crate) mod types;

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

pub use self::jsdoc::{DocComment, Tag};
pub use self::links::{GitLinker, SourceLinker, deep_link};
pub use self::model::*;
use crate::core_api::Result;

/// Parsed sources reachable from one entry file.
#[derive(Debug, Default)]
pub struct Program {
	files: Vec<SourceFile>,
	decls: Vec<Declaration>,
	symbols: Vec<Symbol>,
	scopes: Vec<HashMap<String, SymbolId>>,
	stars: Vec<Vec<FileId>>,
	by_path: HashMap<PathBuf, FileId>,
	pending: VecDeque<FileId>,
}

impl Program {
	/// Parse `entry` and every relative module it imports or re-exports.
	pub fn load(entry: &Path) -> Result<Self> {
		let (text, tree) = parse::parse_file(entry)?;
		Self::build(entry, &text, &tree)
	}

	/// Parse in-memory source for `entry`; relative modules are still read from disk.
	pub fn from_source(entry: &Path, text: &str) -> Result<Self> {
		let tree = parse::parse_source(text, entry)?;
		Self::build(entry, text, &tree)
	}

	fn build(entry: &Path, text: &str, tree: &tree_sitter::Tree) -> Result<Self> {
		let mut program = Self::default();
		let entry_path = canonical(entry);
		let entry_id = program.file_for(&entry_path);
		program.pending.clear();
		scan::scan_file(&mut program, entry_id, text, tree.root_node());

		while let Some(file) = program.pending.pop_front() {
			let path = program.files[file.0].path.clone();
			match parse::parse_file(&path) {
				Ok((text, tree)) => scan::scan_file(&mut program, file, &text, tree.root_node()),
				Err(err) => tracing::debug!("skipping module {}: {err}", path.display()),
			}
		}

		program.finalize_star_exports();
		Ok(program)
	}

	/// Register a file, queueing it for scanning the first time it is seen.
	pub(crate) fn file_for(&mut self, path: &Path) -> FileId {
		if let Some(id) = self.by_path.get(path) {
			return *id;
		}
		let id = FileId(self.files.len());
		self.files.push(SourceFile {
			path: path.to_path_buf(),
			exports: None,
		});
		self.scopes.push(HashMap::new());
		self.stars.push(Vec::new());
		self.by_path.insert(path.to_path_buf(), id);
		self.pending.push_back(id);
		id
	}

	/// The entry file.
	pub fn entry(&self) -> FileId {
		FileId(0)
	}

	/// Source file metadata.
	pub fn file(&self, id: FileId) -> &SourceFile {
		&self.files[id.0]
	}

	/// Export table of a file, `None` when the file has no exports.
	pub fn exports(&self, file: FileId) -> Option<&[ExportedBinding]> {
		self.files[file.0].exports.as_deref()
	}

	/// Look up a symbol.
	pub fn symbol(&self, id: SymbolId) -> &Symbol {
		&self.symbols[id.0]
	}

	/// Look up a declaration.
	pub fn declaration(&self, id: DeclId) -> &Declaration {
		&self.decls[id.0]
	}

	/// Find a local binding in a file's top-level scope.
	pub fn lookup(&self, file: FileId, name: &str) -> Option<SymbolId> {
		self.scopes[file.0].get(name).copied()
	}

	/// Find an exported name in a file's export table.
	pub fn lookup_export(&self, file: FileId, name: &str) -> Option<SymbolId> {
		self.exports(file)?
			.iter()
			.find(|binding| binding.name == name)
			.map(|binding| binding.symbol)
	}

	/// Follow an alias chain to the symbol that carries declarations.
	///
	/// Returns `None` when `id` is not an alias, when the chain is circular, or when a link
	/// in the chain cannot be found.
	pub fn resolve_alias(&self, id: SymbolId) -> Option<SymbolId> {
		self.symbol(id).alias.as_ref()?;
		let mut seen = HashSet::new();
		let mut current = id;
		while let Some(target) = &self.symbol(current).alias {
			if !seen.insert(current) {
				return None;
			}
			let owner = self.symbol(current).file;
			current = match &target.scope {
				AliasScope::Local => self.lookup(owner, &target.name)?,
				AliasScope::Module(module) => self.lookup_export(*module, &target.name)?,
				AliasScope::External(_) => return None,
			};
		}
		Some(current)
	}

	/// Resolve a name as seen from a file: local binding first, aliases followed.
	pub fn resolve_name(&self, file: FileId, name: &str) -> Option<SymbolId> {
		let local = self.lookup(file, name)?;
		match self.symbol(local).alias {
			Some(_) => self.resolve_alias(local),
			None => Some(local),
		}
	}

	pub(crate) fn push_decl(&mut self, decl: Declaration) -> DeclId {
		let id = DeclId(self.decls.len());
		self.decls.push(decl);
		id
	}

	pub(crate) fn decl_mut(&mut self, id: DeclId) -> &mut Declaration {
		&mut self.decls[id.0]
	}

	/// Declare a named local, merging with an existing declaration of the same name.
	pub(crate) fn declare_local(&mut self, file: FileId, name: &str, decl: DeclId) -> SymbolId {
		if let Some(existing) = self.scopes[file.0].get(name).copied()
			&& self.symbols[existing.0].alias.is_none()
		{
			self.symbols[existing.0].declarations.push(decl);
			return existing;
		}
		let id = self.push_symbol(Symbol {
			name: name.to_string(),
			file,
			declarations: vec![decl],
			alias: None,
		});
		self.scopes[file.0].insert(name.to_string(), id);
		id
	}

	/// Bind an import alias in a file's scope.
	pub(crate) fn declare_import(&mut self, file: FileId, local: &str, target: AliasTarget) {
		let id = self.push_symbol(Symbol {
			name: local.to_string(),
			file,
			declarations: Vec::new(),
			alias: Some(target),
		});
		self.scopes[file.0].insert(local.to_string(), id);
	}

	pub(crate) fn push_symbol(&mut self, symbol: Symbol) -> SymbolId {
		let id = SymbolId(self.symbols.len());
		self.symbols.push(symbol);
		id
	}

	pub(crate) fn set_exports(&mut self, file: FileId, exports: Vec<ExportedBinding>, stars: Vec<FileId>) {
		self.files[file.0].exports = Some(exports);
		self.stars[file.0] = stars;
	}

	fn finalize_star_exports(&mut self) {
		let mut done = HashSet::new();
		for idx in 0..self.files.len() {
			self.expand_stars(FileId(idx), &mut done, &mut HashSet::new());
		}
		for file in &mut self.files {
			if file.exports.as_ref().is_some_and(Vec::is_empty) {
				file.exports = None;
			}
		}
	}

	fn expand_stars(&mut self, file: FileId, done: &mut HashSet<FileId>, visiting: &mut HashSet<FileId>) {
		if done.contains(&file) || !visiting.insert(file) {
			return;
		}
		let stars = std::mem::take(&mut self.stars[file.0]);
		for module in stars {
			self.expand_stars(module, done, visiting);
			let inherited: Vec<ExportedBinding> = self.files[module.0]
				.exports
				.iter()
				.flatten()
				.filter(|binding| binding.name != "default")
				.cloned()
				.collect();
			let exports = self.files[file.0].exports.get_or_insert_with(Vec::new);
			for binding in inherited {
				if !exports.iter().any(|existing| existing.name == binding.name) {
					exports.push(binding);
				}
			}
		}
		visiting.remove(&file);
		done.insert(file);
	}
}

/// Map a relative module specifier to a source file on disk.
pub(crate) fn resolve_module(from_dir: &Path, specifier: &str) -> Option<PathBuf> {
	if !specifier.starts_with('.') {
		return None;
	}
	let base = from_dir.join(specifier);
	let stem = specifier
		.strip_suffix(".js")
		.or_else(|| specifier.strip_suffix(".mjs"))
		.map(|s| from_dir.join(s));

	let mut candidates = vec![base.clone()];
	for root in std::iter::once(&base).chain(stem.as_ref()) {
		let raw = root.as_os_str().to_string_lossy();
		for suffix in [".ts", ".tsx", ".d.ts"] {
			candidates.push(PathBuf::from(format!("{raw}{suffix}")));
		}
		candidates.push(root.join("index.ts"));
		candidates.push(root.join("index.tsx"));
	}

	candidates
		.into_iter()
		.find(|candidate| candidate.is_file() && is_typescript(candidate))
		.map(|path| canonical(&path))
}

fn is_typescript(path: &Path) -> bool {
	path.extension().is_some_and(|ext| ext == "ts" || ext == "tsx" || ext == "mts" || ext == "cts")
}

fn canonical(path: &Path) -> PathBuf {
	path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
