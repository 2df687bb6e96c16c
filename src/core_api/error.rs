use std::path::PathBuf;

/// Aggregate errors produced by the tsreadme API.
#[derive(Debug, thiserror::Error)]
pub enum TsReadmeError {
	/// Failed to read or write a file.
	#[error("failed to access {}: {source}", path.display())]
	Io {
		/// File being accessed.
		path: PathBuf,
		/// Underlying IO error.
		source: std::io::Error,
	},
	/// The source parser could not be set up or returned no tree.
	#[error("failed to parse {}: {message}", path.display())]
	Parse {
		/// File being parsed.
		path: PathBuf,
		/// Parser diagnostic.
		message: String,
	},
	/// The source file has no export table.
	#[error("no exports found in {}", .0.display())]
	NoExports(PathBuf),
	/// The marker pattern could not be compiled.
	#[error("invalid marker pattern: {0}")]
	Pattern(#[from] regex::Error),
	/// Failed to encode JSON output.
	#[error(transparent)]
	Serialization(#[from] serde_json::Error),
}

impl TsReadmeError {
	/// Attach a path to an IO error.
	pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}
}

/// Result type returned by the tsreadme library.
pub type Result<T> = std::result::Result<T, TsReadmeError>;
