//! JSDoc block parsing.

use once_cell::sync::Lazy;
use regex::Regex;

static PARAM_HEAD: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^(?:\{(?P<ty>[^}]*)\}\s*)?(?:\[(?P<opt>[^\]=\s]+)(?:=(?P<def>[^\]]*))?\]|(?P<name>[^\s]+))\s*(?P<rest>[\s\S]*)$")
		.expect("valid param tag pattern")
});

/// A parsed `/** ... */` comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
	/// Free text before the first tag.
	pub summary: String,
	/// Tags in source order.
	pub tags: Vec<Tag>,
}

/// A block tag such as `@param`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
	/// Canonical tag name without `@`.
	pub name: String,
	/// Identifier the tag documents, for `@param` and `@template`.
	pub identifier: Option<String>,
	/// `{Type}` expression written on the tag.
	pub type_expression: Option<String>,
	/// Remaining text.
	pub body: String,
}

impl DocComment {
	/// All tags with a given canonical name.
	pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
		self.tags.iter().filter(move |tag| tag.name == name)
	}

	/// Body of the `@param` tag documenting `param`.
	pub fn param(&self, param: &str) -> Option<&str> {
		self.tags_named("param")
			.find(|tag| tag.identifier.as_deref() == Some(param))
			.map(|tag| tag.body.as_str())
	}
}

/// Parse the raw text of a comment node. Returns `None` for non-JSDoc comments.
pub fn parse_jsdoc(raw: &str) -> Option<DocComment> {
	let inner = raw.strip_prefix("/**")?.strip_suffix("*/")?;
	if inner.starts_with('*') {
		// `/***` banners are not documentation.
		return None;
	}

	let lines: Vec<&str> = inner
		.lines()
		.enumerate()
		.map(|(idx, line)| if idx == 0 { strip_gutter(line).trim_start() } else { strip_gutter(line) })
		.collect();

	let mut summary = Vec::new();
	let mut tags: Vec<(String, Vec<&str>)> = Vec::new();
	let mut in_fence = false;
	for line in lines {
		let trimmed = line.trim_start();
		if trimmed.starts_with("```") {
			in_fence = !in_fence;
		}
		if !in_fence && let Some(rest) = trimmed.strip_prefix('@') {
			let (name, body) = match rest.find(char::is_whitespace) {
				Some(idx) => (&rest[..idx], &rest[idx..]),
				None => (rest, ""),
			};
			let body = body.strip_prefix(' ').unwrap_or(body);
			tags.push((name.to_string(), vec![body]));
			continue;
		}
		match tags.last_mut() {
			Some((_, body)) => body.push(line),
			None => summary.push(line),
		}
	}

	Some(DocComment {
		summary: join_trimmed(&summary),
		tags: tags
			.into_iter()
			.map(|(name, body)| build_tag(&name, &body))
			.collect(),
	})
}

fn strip_gutter(line: &str) -> &str {
	let trimmed = line.trim_start();
	match trimmed.strip_prefix('*') {
		Some(rest) => rest.strip_prefix(' ').unwrap_or(rest).trim_end(),
		None => line.trim_end(),
	}
}

fn join_trimmed(lines: &[&str]) -> String {
	let start = lines.iter().position(|l| !l.trim().is_empty());
	let end = lines.iter().rposition(|l| !l.trim().is_empty());
	match (start, end) {
		(Some(start), Some(end)) => lines[start..=end].join("\n"),
		_ => String::new(),
	}
}

fn canonical_name(name: &str) -> &str {
	match name {
		"return" => "returns",
		"throw" | "exception" => "throws",
		"arg" | "argument" => "param",
		other => other,
	}
}

fn build_tag(raw_name: &str, body_lines: &[&str]) -> Tag {
	let name = canonical_name(raw_name).to_string();
	let body = join_trimmed(body_lines);
	match name.as_str() {
		"param" => parse_param_tag(name, &body),
		"template" => parse_template_tag(name, &body),
		"returns" | "throws" => {
			let (type_expression, body) = split_type_expression(&body);
			Tag {
				name,
				identifier: None,
				type_expression,
				body: strip_dash(body).to_string(),
			}
		}
		_ => Tag {
			name,
			identifier: None,
			type_expression: None,
			body,
		},
	}
}

fn parse_param_tag(name: String, body: &str) -> Tag {
	let Some(caps) = PARAM_HEAD.captures(body) else {
		return Tag {
			name,
			identifier: None,
			type_expression: None,
			body: body.to_string(),
		};
	};
	let identifier = caps
		.name("opt")
		.or_else(|| caps.name("name"))
		.map(|m| m.as_str().to_string());
	let rest = caps.name("rest").map(|m| m.as_str()).unwrap_or_default();
	Tag {
		name,
		identifier,
		type_expression: caps.name("ty").map(|m| m.as_str().trim().to_string()),
		body: strip_dash(rest).to_string(),
	}
}

fn parse_template_tag(name: String, body: &str) -> Tag {
	let (type_expression, body) = split_type_expression(body);
	let (identifier, rest) = match body.find(char::is_whitespace) {
		Some(idx) => (&body[..idx], &body[idx..]),
		None => (body, ""),
	};
	Tag {
		name,
		identifier: (!identifier.is_empty()).then(|| identifier.to_string()),
		type_expression,
		body: strip_dash(rest.trim_start()).to_string(),
	}
}

fn split_type_expression(body: &str) -> (Option<String>, &str) {
	if let Some(rest) = body.strip_prefix('{')
		&& let Some(end) = rest.find('}')
	{
		return (Some(rest[..end].trim().to_string()), rest[end + 1..].trim_start());
	}
	(None, body)
}

fn strip_dash(text: &str) -> &str {
	match text.strip_prefix('-') {
		Some(rest) => rest.trim_start(),
		None => text,
	}
}
