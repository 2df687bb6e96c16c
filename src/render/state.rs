use crate::oracle::{DeclId, Program, deep_link};

use super::core::Renderer;

/// Read-only context shared by the item renderers.
pub struct RenderState<'a> {
	/// Renderer configuration.
	pub config: &'a Renderer,
	/// Program the symbols come from.
	pub program: &'a Program,
}

impl<'a> RenderState<'a> {
	/// Create a new render state.
	pub fn new(config: &'a Renderer, program: &'a Program) -> Self {
		Self { config, program }
	}

	/// Deep link to a declaration's source line. Any lookup failure yields `None`.
	pub fn link(&self, declaration: DeclId) -> Option<String> {
		let repo_url = self.config.repo_url.as_deref()?;
		let decl = self.program.declaration(declaration);
		let path = &self.program.file(decl.file).path;
		match self.config.linker.repo_relative_path(path) {
			Some(relative) => Some(deep_link(repo_url, &relative, decl.line)),
			None => {
				tracing::debug!("no repository path for {}, rendering without link", path.display());
				None
			}
		}
	}

	/// `{prefix} {name} · {label}` with the label linked when possible.
	pub fn title(&self, prefix: &str, name: &str, label: &str, link_to: DeclId) -> String {
		match self.link(link_to) {
			Some(url) => format!("{prefix} {name} · [{label}]({url})"),
			None => format!("{prefix} {name} · {label}"),
		}
	}
}
