//! Marker discovery and region replacement inside a markdown document.
//!
//! A marker is a line containing the search phrase followed by a source path, optionally
//! directly preceded by a heading. The region it owns runs to the next heading at or above
//! that heading's depth, the next marker, or the end of the document.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core_api::Result;

/// Depth used when a marker has no heading directly above it.
pub const DEFAULT_BASE_LEVEL: usize = 2;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})(?:[ \t]|$)").expect("valid heading pattern"));

/// One marker occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
	/// Byte range of the whole match, heading line included.
	pub span: Range<usize>,
	/// Source path written after the phrase.
	pub source: String,
	/// Depth of the heading directly above the marker, or [`DEFAULT_BASE_LEVEL`].
	pub base_level: usize,
	/// Whether the marker line is the last line and has no newline.
	pub at_eof: bool,
}

/// A pending `(span, text)` edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
	/// Byte range being replaced.
	pub span: Range<usize>,
	/// New text for the range.
	pub text: String,
}

/// Result of splicing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
	/// Updated document text.
	pub text: String,
	/// Source paths of the markers, in document order.
	pub sources: Vec<String>,
}

fn marker_pattern(phrase: &str) -> Result<Regex> {
	let pattern = format!(
		r"(?m)(?:^(#{{1,6}})[ \t][^\n]*\n)?^[^\n]*?{}[ `]*([^\s`]+?)[`: ]*\r?(?:\n|\z)",
		regex::escape(phrase)
	);
	Ok(Regex::new(&pattern)?)
}

/// Find every marker for `phrase` in document order.
pub fn find_markers(document: &str, phrase: &str) -> Result<Vec<Marker>> {
	let pattern = marker_pattern(phrase)?;
	Ok(pattern
		.captures_iter(document)
		.filter_map(|caps| {
			let whole = caps.get(0)?;
			let source = caps.get(2)?.as_str().to_string();
			let base_level = caps.get(1).map_or(DEFAULT_BASE_LEVEL, |hashes| hashes.len());
			Some(Marker {
				span: whole.range(),
				source,
				base_level,
				at_eof: !whole.as_str().ends_with('\n'),
			})
		})
		.collect())
}

/// End of the region owned by `marker`: the next heading at depth `<= base_level` outside
/// fenced code, bounded by `limit`.
pub fn region_end(document: &str, marker: &Marker, limit: usize) -> usize {
	let start = marker.span.end;
	let mut offset = start;
	let mut in_fence = false;
	for line in document[start..limit].split_inclusive('\n') {
		let trimmed = line.trim_start();
		if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
			in_fence = !in_fence;
		} else if !in_fence
			&& let Some(caps) = HEADING.captures(line)
			&& caps[1].len() <= marker.base_level
		{
			return offset;
		}
		offset += line.len();
	}
	limit
}

/// Compute every replacement before touching the document.
///
/// `heading_prefix` maps a marker's base level to the heading marker for generated symbols;
/// `generate` produces the markdown for one marker.
pub fn plan<H, G>(document: &str, markers: &[Marker], heading_prefix: H, mut generate: G) -> Result<Vec<Replacement>>
where
	H: Fn(usize) -> String,
	G: FnMut(&Marker, &str) -> Result<String>,
{
	let mut replacements = Vec::with_capacity(markers.len());
	for (idx, marker) in markers.iter().enumerate() {
		let limit = markers.get(idx + 1).map_or(document.len(), |next| next.span.start);
		let end = region_end(document, marker, limit);
		let content = generate(marker, &heading_prefix(marker.base_level))?;

		let mut text = String::from(if marker.at_eof { "\n\n" } else { "\n" });
		text.push_str(&content);
		if end < document.len() {
			text.push('\n');
		}
		replacements.push(Replacement {
			span: marker.span.end..end,
			text,
		});
	}
	Ok(replacements)
}

/// Apply non-overlapping replacements right to left so earlier offsets stay valid.
pub fn apply(document: &str, replacements: &[Replacement]) -> String {
	let mut ordered: Vec<&Replacement> = replacements.iter().collect();
	ordered.sort_by_key(|replacement| replacement.span.start);
	let mut out = document.to_string();
	for replacement in ordered.into_iter().rev() {
		out.replace_range(replacement.span.clone(), &replacement.text);
	}
	out
}

/// Replace every marker region. `None` when the document has no markers.
pub fn splice_all<H, G>(document: &str, phrase: &str, heading_prefix: H, generate: G) -> Result<Option<Spliced>>
where
	H: Fn(usize) -> String,
	G: FnMut(&Marker, &str) -> Result<String>,
{
	let markers = find_markers(document, phrase)?;
	if markers.is_empty() {
		return Ok(None);
	}
	let replacements = plan(document, &markers, heading_prefix, generate)?;
	Ok(Some(Spliced {
		text: apply(document, &replacements),
		sources: markers.into_iter().map(|marker| marker.source).collect(),
	}))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::render::utils::heading_prefix;

	const PHRASE: &str = "The following is auto-generated from";

	fn splice(document: &str, generate: impl FnMut(&Marker, &str) -> Result<String>) -> Option<String> {
		splice_all(document, PHRASE, |level| heading_prefix(level + 1), generate)
			.expect("splice")
			.map(|spliced| spliced.text)
	}

	fn fixed(marker: &Marker, prefix: &str) -> Result<String> {
		Ok(format!("{prefix} {} · constant\n\nBody.\n", marker.source))
	}

	#[test]
	fn marker_forms() {
		let doc = "## API\nThe following is auto-generated from `src/a.ts`:\n\nSee also: The following is auto-generated from src/b.ts\n";
		let markers = find_markers(doc, PHRASE).expect("markers");
		assert_eq!(markers.len(), 2);
		assert_eq!(markers[0].source, "src/a.ts");
		assert_eq!(markers[0].base_level, 2);
		assert_eq!(markers[0].span.start, 0);
		assert_eq!(markers[1].source, "src/b.ts");
		assert_eq!(markers[1].base_level, DEFAULT_BASE_LEVEL);
	}

	#[test]
	fn heading_depth_follows_marker_heading() {
		let doc = "# Title\n\n### Reference\nThe following is auto-generated from a.ts:\nstale\n\n## Next\n";
		let out = splice(doc, fixed).expect("markers");
		assert_eq!(
			out,
			"# Title\n\n### Reference\nThe following is auto-generated from a.ts:\n\n#### a.ts · constant\n\nBody.\n\n## Next\n"
		);
	}

	#[test]
	fn region_runs_to_end_of_document() {
		let doc = "## API\nThe following is auto-generated from a.ts\n### old · constant\nold\n";
		let out = splice(doc, fixed).expect("markers");
		assert_eq!(out, "## API\nThe following is auto-generated from a.ts\n\n### a.ts · constant\n\nBody.\n");
	}

	#[test]
	fn headings_inside_fences_do_not_end_regions() {
		let doc = "## API\nThe following is auto-generated from a.ts\n```md\n# not a heading\n```\nstale\n## Next\n";
		let out = splice(doc, fixed).expect("markers");
		assert_eq!(out, "## API\nThe following is auto-generated from a.ts\n\n### a.ts · constant\n\nBody.\n\n## Next\n");
	}

	#[test]
	fn splicing_is_idempotent() {
		let doc = "## A\nThe following is auto-generated from a.ts:\n## B\nThe following is auto-generated from b.ts:";
		let once = splice(doc, fixed).expect("markers");
		let twice = splice(&once, fixed).expect("markers");
		assert_eq!(once, twice);
	}

	#[test]
	fn level_six_marker_stays_idempotent() {
		let doc = "###### Deep\nThe following is auto-generated from a.ts\n";
		let once = splice(doc, fixed).expect("markers");
		assert_eq!(
			once,
			"###### Deep\nThe following is auto-generated from a.ts\n\n####### a.ts · constant\n\nBody.\n"
		);
		let twice = splice(&once, fixed).expect("markers");
		assert_eq!(once, twice);
	}

	#[test]
	fn every_marker_gets_its_own_region() {
		let doc = "## A\nThe following is auto-generated from a.ts\nThe following is auto-generated from b.ts\n#### deep\nThe following is auto-generated from c.ts\n";
		let mut seen = Vec::new();
		let out = splice(doc, |marker, prefix| {
			seen.push(marker.source.clone());
			fixed(marker, prefix)
		})
		.expect("markers");
		assert_eq!(seen, ["a.ts", "b.ts", "c.ts"]);
		assert_eq!(out.matches(" · constant").count(), 3);
		assert_eq!(out.matches(PHRASE).count(), 3);
	}

	#[test]
	fn longer_and_shorter_replacements_keep_other_regions_intact() {
		let doc = "## A\nThe following is auto-generated from long.ts\nx\n## B\nThe following is auto-generated from short.ts\nyyyyyyyyyyyyyyyyyyyyyyyyyyyyyy\n## C\nkeep me\n";
		let out = splice(doc, |marker, prefix| {
			Ok(if marker.source == "long.ts" {
				format!("{prefix} long\n\n{}\n", "z".repeat(200))
			} else {
				format!("{prefix} s\n")
			})
		})
		.expect("markers");
		assert_eq!(
			out,
			format!(
				"## A\nThe following is auto-generated from long.ts\n\n### long\n\n{}\n\n## B\nThe following is auto-generated from short.ts\n\n### s\n\n## C\nkeep me\n",
				"z".repeat(200)
			)
		);
	}

	#[test]
	fn no_markers_is_none() {
		assert_eq!(splice("# Nothing here\n", fixed), None);
	}

	#[test]
	fn generation_errors_propagate() {
		let doc = "## A\nThe following is auto-generated from a.ts\n";
		let result = splice_all(doc, PHRASE, heading_prefix, |_, _| {
			Err(crate::core_api::error::TsReadmeError::NoExports("a.ts".into()))
		});
		assert!(result.is_err());
	}
}
