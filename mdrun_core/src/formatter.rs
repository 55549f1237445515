use std::sync::OnceLock;

use regex::Regex;

use crate::config::FormatConfig;
use crate::config::Markers;

/// Captured command output after post-processing, split into the header
/// lines that belong above the fenced block and the body lines that go
/// inside it.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FormattedOutput {
	/// Header lines, emitted verbatim outside the fence.
	pub header: Vec<String>,
	/// Post-processed output lines, emitted inside the fence.
	pub body: Vec<String>,
}

/// Matches evaluator echo frames like `code=>'1.plus(2)',` that the
/// console injects when evaluating remote code.
fn echo_frame_regex() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| Regex::new(r"code=>'.*?',").expect("valid echo frame regex"))
}

/// Matches source code callouts in console syntax (`--- <1>`), rewritten
/// to comment syntax (`// <1>`) so they render as callouts again.
fn callout_regex() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();
	RE.get_or_init(|| Regex::new(r"--- <(?P<a>[0-9]+)>").expect("valid callout regex"))
}

/// Escape literal pipe characters so a line cannot be misread as a table
/// cell boundary. Already-escaped pipes are normalized first, which makes
/// the pass idempotent.
pub fn escape_pipes(line: &str) -> String {
	line.replace("\\|", "|").replace('|', "\\|")
}

/// Post-process a single raw output line. Returns `None` when the line is
/// console noise that must be dropped entirely.
fn post_process_line(line: &str, in_table: bool, config: &FormatConfig) -> Option<String> {
	if config
		.artifacts
		.iter()
		.any(|artifact| line.contains(artifact.as_str()))
	{
		return None;
	}

	let line = echo_frame_regex().replace_all(line, "");
	let line = callout_regex().replace_all(&line, "// <$a>");

	if in_table {
		// Inside a table the command already carries correct escaping.
		Some(line.into_owned())
	} else {
		Some(escape_pipes(&line))
	}
}

/// Apply context-sensitive filtering and escaping to raw captured output.
///
/// Header-prefixed lines are extracted (prefix stripped) so the caller can
/// place them outside the fenced block it wraps around the body.
pub fn format(
	raw: &[String],
	in_table: bool,
	markers: &Markers,
	config: &FormatConfig,
) -> FormattedOutput {
	let mut formatted = FormattedOutput::default();

	for line in raw {
		if let Some(header) = line.strip_prefix(&markers.header_prefix) {
			formatted.header.push(header.to_string());
		} else if let Some(body) = post_process_line(line, in_table, config) {
			formatted.body.push(body);
		}
	}

	formatted
}
