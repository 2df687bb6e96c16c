/// Markdown heading marker for a given depth.
///
/// Not capped at six: below a `######` marker the generated lines stop being headings, which
/// keeps them from ending the marker's own region on the next pass.
pub fn heading_prefix(level: usize) -> String {
	"#".repeat(level.max(1))
}

/// One level deeper than `prefix`.
pub fn deeper(prefix: &str) -> String {
	format!("{prefix}#")
}

/// Lower-case the first character: `EventBus` becomes `eventBus`.
pub fn lower_first(name: &str) -> String {
	let mut chars = name.chars();
	match chars.next() {
		Some(first) => first.to_lowercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Wrap text as inline code, widening the delimiter when the text contains backticks.
pub fn code(text: &str) -> String {
	let text = collapse_whitespace(text);
	if !text.contains('`') {
		return format!("`{text}`");
	}
	let mut longest = 0;
	let mut run = 0;
	for ch in text.chars() {
		if ch == '`' {
			run += 1;
			longest = longest.max(run);
		} else {
			run = 0;
		}
	}
	let fence = "`".repeat(longest + 1);
	format!("{fence} {text} {fence}")
}

/// A fenced TypeScript code block.
pub fn ts_fence(body: &str) -> String {
	format!("```ts\n{}\n```", body.trim_end())
}

/// A bold label followed by a bullet list. Empty when there are no entries.
pub fn labelled_list(label: &str, entries: &[String]) -> Option<String> {
	if entries.is_empty() {
		return None;
	}
	Some(format!("**{label}:**\n\n{}", entries.join("\n")))
}

/// Join rendered blocks with blank lines and terminate with a newline.
pub fn join_blocks(blocks: &[String]) -> String {
	let mut out = blocks
		.iter()
		.map(|block| block.trim_end())
		.filter(|block| !block.is_empty())
		.collect::<Vec<_>>()
		.join("\n\n");
	out.push('\n');
	out
}

/// Append ` - doc` to a list entry when there is inline documentation.
pub fn with_doc(entry: String, doc: Option<&str>) -> String {
	match doc.map(str::trim).filter(|doc| !doc.is_empty()) {
		Some(doc) => format!("{entry} - {}", doc.replace('\n', " ")),
		None => entry,
	}
}

fn collapse_whitespace(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}
