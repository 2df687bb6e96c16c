use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command as ProcessCommand, Stdio};

/// Maps source files to repository-relative paths for deep links.
pub trait SourceLinker {
	/// Path of `file` relative to its repository root, or `None` when it is not tracked.
	fn repo_relative_path(&self, file: &Path) -> Option<String>;
}

/// Looks files up with `git ls-files`, caching answers per file.
#[derive(Debug, Default)]
pub struct GitLinker {
	cache: RefCell<HashMap<PathBuf, Option<String>>>,
}

impl GitLinker {
	/// Create a linker with an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	fn ls_files(file: &Path) -> Option<String> {
		let dir = file.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));
		let output = ProcessCommand::new("git")
			.args(["ls-files", "--full-name", "--"])
			.arg(file)
			.current_dir(dir)
			.stderr(Stdio::null())
			.output()
			.map_err(|e| tracing::debug!("git ls-files failed for {}: {e}", file.display()))
			.ok()?;
		if !output.status.success() {
			tracing::debug!("git ls-files exited with {} for {}", output.status, file.display());
			return None;
		}
		let stdout = String::from_utf8_lossy(&output.stdout);
		let path = stdout.lines().next()?.trim();
		(!path.is_empty()).then(|| path.to_string())
	}
}

impl SourceLinker for GitLinker {
	fn repo_relative_path(&self, file: &Path) -> Option<String> {
		if let Some(cached) = self.cache.borrow().get(file) {
			return cached.clone();
		}
		let found = Self::ls_files(file);
		self.cache.borrow_mut().insert(file.to_path_buf(), found.clone());
		found
	}
}

/// Build a browsable URL for `line` of `relative_path` under `repo_url`.
pub fn deep_link(repo_url: &str, relative_path: &str, line: usize) -> String {
	let base = repo_url.trim_end_matches('/');
	let base = base.strip_suffix(".git").unwrap_or(base);
	if host_of(base) == Some("bitbucket.org") {
		format!("{base}/src/HEAD/{relative_path}#lines-{line}")
	} else {
		format!("{base}/blob/HEAD/{relative_path}#L{line}")
	}
}

fn host_of(url: &str) -> Option<&str> {
	let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
	let authority = rest.split('/').next()?;
	let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
	Some(host.split(':').next().unwrap_or(host))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn github_style_links() {
		assert_eq!(
			deep_link("https://github.com/acme/widgets.git", "src/index.ts", 12),
			"https://github.com/acme/widgets/blob/HEAD/src/index.ts#L12"
		);
		assert_eq!(
			deep_link("https://gitlab.com/acme/widgets/", "a.ts", 1),
			"https://gitlab.com/acme/widgets/blob/HEAD/a.ts#L1"
		);
	}

	#[test]
	fn bitbucket_links() {
		assert_eq!(
			deep_link("https://bitbucket.org/acme/widgets", "src/index.ts", 7),
			"https://bitbucket.org/acme/widgets/src/HEAD/src/index.ts#lines-7"
		);
	}

	#[test]
	fn untracked_file_has_no_path() {
		let dir = tempfile::tempdir().expect("tempdir");
		let file = dir.path().join("loose.ts");
		std::fs::write(&file, "export const x = 1;\n").expect("write");
		let linker = GitLinker::new();
		assert_eq!(linker.repo_relative_path(&file), None);
		assert_eq!(linker.repo_relative_path(&file), None);
	}
}
