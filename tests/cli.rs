//! Exit codes and messages of the `tsreadme` binary.

mod utils;

use std::process::{Command, Output};

use utils::{Fixture, TRIVIAL_SOURCE};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn tsreadme(fx: &Fixture, args: &[&str]) -> std::io::Result<Output> {
	Command::new(env!("CARGO_BIN_EXE_tsreadme"))
		.current_dir(fx.root())
		.args(args)
		.env("NO_COLOR", "1")
		.env_remove("TSREADME_LOG")
		.output()
}

#[test]
fn document_without_markers_exits_with_failure() -> TestResult {
	let fx = Fixture::new()?;
	let original = "# Project\n\nNo generated sections.\n";
	fx.write("README.md", original)?;

	let output = tsreadme(&fx, &["--file", "README.md"])?;
	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8(output.stderr)?;
	assert!(
		stderr.contains("No \"The following is auto-generated from\" markers found in README.md"),
		"unexpected stderr: {stderr:?}"
	);
	assert_eq!(fx.read("README.md")?, original);
	Ok(())
}

#[test]
fn custom_phrase_is_named_in_the_message() -> TestResult {
	let fx = Fixture::new()?;
	fx.write("README.md", "The following is auto-generated from a.ts\n")?;

	let output = tsreadme(&fx, &["--search", "Generated from"])?;
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8(output.stderr)?.contains("No \"Generated from\" markers found"));
	Ok(())
}

#[test]
fn successful_pass_exits_cleanly() -> TestResult {
	let fx = Fixture::new()?;
	fx.write("a.ts", TRIVIAL_SOURCE)?;
	fx.write("README.md", "## API\nThe following is auto-generated from a.ts\n")?;

	let output = tsreadme(&fx, &[])?;
	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
	assert!(String::from_utf8(output.stdout)?.starts_with("Updated documentation for 1 file(s)"));
	assert!(fx.read("README.md")?.contains("### answer · constant\n"));

	let check = tsreadme(&fx, &["--check"])?;
	assert!(check.status.success());
	Ok(())
}

#[test]
fn errors_exit_with_failure_and_leave_the_document() -> TestResult {
	let fx = Fixture::new()?;
	let original = "## API\nThe following is auto-generated from missing.ts\n";
	fx.write("README.md", original)?;

	let output = tsreadme(&fx, &[])?;
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8(output.stderr)?.contains("error: "));
	assert_eq!(fx.read("README.md")?, original);
	Ok(())
}
