//! High-level API: configure a [`TsReadme`] and run a generation pass over a document.
//!
//! A pass reads the target document, renders every marker region from the TypeScript source
//! the marker names, and writes the document back once. Any error aborts the pass before the
//! write, so the document on disk is never left half-updated.

/// Error helpers for the core API.
pub mod error;

use std::path::{Path, PathBuf};

use serde::Serialize;

pub use self::error::Result;
use self::error::TsReadmeError;
use crate::extract::extract;
use crate::oracle::{Program, SourceLinker};
use crate::render::Renderer;
use crate::render::utils::heading_prefix;
use crate::splice::{Spliced, splice_all};

/// Marker phrase used when none is configured.
pub const DEFAULT_SEARCH_PHRASE: &str = "The following is auto-generated from";

/// TsReadme keeps README sections in sync with the exported API of TypeScript sources.
///
/// Sections are marked by a line containing the search phrase followed by a source path,
/// resolved relative to the document:
///
/// ```markdown
/// ## API
/// The following is auto-generated from src/index.ts:
/// ```
#[derive(Debug)]
pub struct TsReadme {
	/// Phrase identifying marker lines.
	search_phrase: String,

	/// Renderer used for every marker.
	renderer: Renderer,

	/// Compare instead of writing.
	check: bool,
}

impl Default for TsReadme {
	fn default() -> Self {
		Self::new()
	}
}

/// Outcome of one generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
	/// The document was rewritten.
	Updated {
		/// Number of marker regions rendered.
		files: usize,
		/// Document path.
		path: PathBuf,
	},
	/// Check mode: the document already matches the sources.
	UpToDate {
		/// Number of marker regions rendered.
		files: usize,
		/// Document path.
		path: PathBuf,
	},
	/// Check mode: regenerating would change the document.
	Stale {
		/// Number of marker regions rendered.
		files: usize,
		/// Document path.
		path: PathBuf,
	},
	/// The document has no markers; nothing was written.
	NoMarkers {
		/// Phrase that was searched for.
		phrase: String,
		/// Document path.
		path: PathBuf,
	},
}

impl PassOutcome {
	/// Whether the CLI should exit successfully.
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Updated { .. } | Self::UpToDate { .. })
	}
}

/// Lightweight record describing one export for list mode output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
	/// Exported name.
	pub name: String,
	/// Kind label, as shown in rendered headings.
	pub kind: String,
	/// One-indexed line of the declaration used for typing.
	pub line: usize,
	/// Rendered type, when known.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub type_string: Option<String>,
}

impl TsReadme {
	/// Creates a new instance with the default phrase, no deep links and write mode.
	pub fn new() -> Self {
		Self {
			search_phrase: DEFAULT_SEARCH_PHRASE.to_string(),
			renderer: Renderer::new(),
			check: false,
		}
	}

	/// Sets the phrase identifying marker lines.
	pub fn with_search_phrase(mut self, phrase: impl Into<String>) -> Self {
		self.search_phrase = phrase.into();
		self
	}

	/// Enables deep links to `repo_url` when set.
	pub fn with_repo_url(mut self, repo_url: Option<String>) -> Self {
		self.renderer = self.renderer.with_repo_url(repo_url);
		self
	}

	/// Replaces the version-control lookup used for deep links.
	pub fn with_linker(mut self, linker: impl SourceLinker + 'static) -> Self {
		self.renderer = self.renderer.with_linker(linker);
		self
	}

	/// Enables check mode: [`Self::generate`] compares instead of writing.
	pub fn with_check(mut self, check: bool) -> Self {
		self.check = check;
		self
	}

	/// Returns the configured marker phrase.
	pub fn search_phrase(&self) -> &str {
		&self.search_phrase
	}

	/// Render the markdown for one source file with symbol headings at `prefix`.
	pub fn render_source(&self, source: &Path, prefix: &str) -> Result<String> {
		let program = Program::load(source)?;
		Ok(self.renderer.render_exports(&program, prefix)?.join("\n"))
	}

	/// Splice every marker region of `document`. Marker paths resolve against `base_dir`.
	///
	/// Returns `None` when the document contains no markers.
	pub fn render_document(&self, document: &str, base_dir: &Path) -> Result<Option<Spliced>> {
		splice_all(
			document,
			&self.search_phrase,
			|level| heading_prefix(level + 1),
			|marker, prefix| {
				tracing::info!("rendering {} at depth {}", marker.source, prefix.len());
				self.render_source(&base_dir.join(&marker.source), prefix)
			},
		)
	}

	/// Read the document at `path` and compute its updated text without writing it.
	pub fn splice_file(&self, path: &Path) -> Result<Option<Spliced>> {
		let document = std::fs::read_to_string(path).map_err(|e| TsReadmeError::io(path, e))?;
		let base_dir = match path.parent() {
			Some(dir) if !dir.as_os_str().is_empty() => dir,
			_ => Path::new("."),
		};
		self.render_document(&document, base_dir)
	}

	/// Run one generation pass over the document at `path`.
	pub fn generate(&self, path: &Path) -> Result<PassOutcome> {
		let Some(spliced) = self.splice_file(path)? else {
			return Ok(PassOutcome::NoMarkers {
				phrase: self.search_phrase.clone(),
				path: path.to_path_buf(),
			});
		};
		let files = spliced.sources.len();
		let path = path.to_path_buf();

		if self.check {
			let current = std::fs::read_to_string(&path).map_err(|e| TsReadmeError::io(&path, e))?;
			return Ok(if current == spliced.text {
				PassOutcome::UpToDate { files, path }
			} else {
				PassOutcome::Stale { files, path }
			});
		}

		std::fs::write(&path, &spliced.text).map_err(|e| TsReadmeError::io(&path, e))?;
		Ok(PassOutcome::Updated { files, path })
	}

	/// Produce a listing of the exports of one source file, in export-table order.
	pub fn list(&self, source: &Path) -> Result<Vec<ListItem>> {
		let program = Program::load(source)?;
		let entry = program.entry();
		let exports = program
			.exports(entry)
			.ok_or_else(|| TsReadmeError::NoExports(program.file(entry).path.clone()))?;
		Ok(exports
			.iter()
			.filter_map(|binding| extract(&program, binding))
			.map(|symbol| ListItem {
				name: symbol.name,
				kind: symbol.kind.label().to_string(),
				line: program.declaration(symbol.resolution.declaration).line,
				type_string: symbol.type_string,
			})
			.collect())
	}
}
