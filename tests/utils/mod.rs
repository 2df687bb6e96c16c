//! Shared fixture helpers for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary project directory holding a README and TypeScript sources.
pub struct Fixture {
	dir: TempDir,
}

impl Fixture {
	/// Create an empty fixture directory.
	pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
		Ok(Self { dir: TempDir::new()? })
	}

	/// Root of the fixture.
	pub fn root(&self) -> &Path {
		self.dir.path()
	}

	/// Write `contents` to `relative`, creating parent directories.
	pub fn write(&self, relative: &str, contents: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
		let path = self.dir.path().join(relative);
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)?;
		}
		fs::write(&path, contents)?;
		Ok(path)
	}

	/// Read a file back.
	pub fn read(&self, relative: &str) -> Result<String, Box<dyn std::error::Error>> {
		Ok(fs::read_to_string(self.dir.path().join(relative))?)
	}
}

/// The documented constant used by the end-to-end scenarios.
pub const TRIVIAL_SOURCE: &str = "/** The universe... */\nexport const answer = 42;\n";
