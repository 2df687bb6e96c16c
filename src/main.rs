//! CLI entrypoint.

use std::error::Error;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use tsreadme::{DEFAULT_SEARCH_PHRASE, PassOutcome, TsReadme};

/// Environment variable holding the tracing filter.
const LOG_ENV: &str = "TSREADME_LOG";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Keep README API sections in sync with TypeScript sources.
struct Cli {
	/// Markdown document containing marker lines
	#[arg(long, default_value = "README.md")]
	file: PathBuf,

	/// Phrase identifying marker lines
	#[arg(long, default_value = DEFAULT_SEARCH_PHRASE)]
	search: String,

	/// Repository base URL used to link kinds to source lines
	#[arg(long)]
	repo_url: Option<String>,

	/// Exit with an error instead of writing when the document is out of date
	#[arg(long, default_value_t = false)]
	check: bool,

	/// Print the updated document instead of writing it
	#[arg(long, default_value_t = false, conflicts_with = "check")]
	stdout: bool,

	/// Print the classified exports of a source file as JSON and exit
	#[arg(long, value_name = "SOURCE")]
	list: Option<PathBuf>,

	/// Disable ANSI colors in CLI output
	#[arg(long, default_value_t = false)]
	no_color: bool,
}

fn main() {
	let cli = Cli::parse();
	init_tracing();

	let color = should_color_output(&cli);
	match run(&cli) {
		Ok(true) => {}
		Ok(false) => process::exit(1),
		Err(e) => {
			if color {
				eprintln!("{} {e}", "error:".red().bold());
			} else {
				eprintln!("error: {e}");
			}
			process::exit(1);
		}
	}
}

/// Install the stderr subscriber. The filter comes from `TSREADME_LOG`, defaulting to `warn`.
fn init_tracing() {
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

/// Run the requested action; `Ok(false)` maps to exit code 1.
fn run(cli: &Cli) -> Result<bool, Box<dyn Error>> {
	let ts = TsReadme::new()
		.with_search_phrase(cli.search.clone())
		.with_repo_url(cli.repo_url.clone())
		.with_check(cli.check);

	if let Some(source) = &cli.list {
		let listings = ts.list(source)?;
		println!("{}", serde_json::to_string_pretty(&listings)?);
		return Ok(true);
	}

	if cli.stdout {
		return Ok(match ts.splice_file(&cli.file)? {
			Some(spliced) => {
				print!("{}", spliced.text);
				true
			}
			None => {
				report_no_markers(ts.search_phrase(), &cli.file);
				false
			}
		});
	}

	let outcome = ts.generate(&cli.file)?;
	match &outcome {
		PassOutcome::Updated { files, path } => {
			println!("Updated documentation for {files} file(s) in {}", path.display());
		}
		PassOutcome::UpToDate { files, path } => {
			println!("Documentation for {files} file(s) in {} is up to date", path.display());
		}
		PassOutcome::Stale { path, .. } => {
			eprintln!("{} is out of date", path.display());
		}
		PassOutcome::NoMarkers { phrase, path } => report_no_markers(phrase, path),
	}
	Ok(outcome.is_success())
}

fn report_no_markers(phrase: &str, path: &std::path::Path) {
	eprintln!("No \"{phrase}\" markers found in {}", path.display());
}

fn should_color_output(cli: &Cli) -> bool {
	if cli.no_color {
		return false;
	}
	if std::env::var_os("NO_COLOR").is_some() {
		return false;
	}
	if std::env::var("TERM").ok().as_deref() == Some("dumb") {
		return false;
	}
	std::io::stderr().is_terminal()
}
