use crate::core_api::Result;
use crate::core_api::error::TsReadmeError;
use crate::extract::extract;
use crate::oracle::{ExportedBinding, GitLinker, Program, SourceLinker};

use super::items::render_symbol;
use super::state::RenderState;

/// Markdown renderer for the exported surface of a TypeScript module.
pub struct Renderer {
	/// Base repository URL used to build deep links. Links are off when unset.
	pub repo_url: Option<String>,
	/// Maps source files to repository-relative paths.
	pub linker: Box<dyn SourceLinker>,
}

impl Default for Renderer {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Renderer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Renderer").field("repo_url", &self.repo_url).finish_non_exhaustive()
	}
}

impl Renderer {
	/// Create a renderer without deep links, backed by `git ls-files` once a URL is set.
	pub fn new() -> Self {
		Self {
			repo_url: None,
			linker: Box::new(GitLinker::new()),
		}
	}

	/// Enable deep links under `repo_url`.
	pub fn with_repo_url(mut self, repo_url: Option<String>) -> Self {
		self.repo_url = repo_url.filter(|url| !url.trim().is_empty());
		self
	}

	/// Replace the version-control lookup.
	pub fn with_linker(mut self, linker: impl SourceLinker + 'static) -> Self {
		self.linker = Box::new(linker);
		self
	}

	/// Render every export of the program's entry file, in export-table order.
	///
	/// `heading_prefix` is the markdown marker for symbol headings (e.g. `###`); members are
	/// rendered one level deeper.
	pub fn render_exports(&self, program: &Program, heading_prefix: &str) -> Result<Vec<String>> {
		let entry = program.entry();
		let exports = program
			.exports(entry)
			.ok_or_else(|| TsReadmeError::NoExports(program.file(entry).path.clone()))?;
		Ok(exports
			.iter()
			.filter_map(|binding| self.render_binding(program, binding, heading_prefix))
			.collect())
	}

	/// Render a single exported binding. `None` when the binding has no declaration at all.
	pub fn render_binding(&self, program: &Program, binding: &ExportedBinding, heading_prefix: &str) -> Option<String> {
		let Some(symbol) = extract(program, binding) else {
			tracing::debug!("export `{}` has no declaration, skipping", binding.name);
			return None;
		};
		let state = RenderState::new(self, program);
		Some(render_symbol(&state, &symbol, heading_prefix))
	}
}
