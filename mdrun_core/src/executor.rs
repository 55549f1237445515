use std::path::Path;
use std::process::Command;

use crate::MdrunResult;
use crate::config::Markers;

/// Languages a command block can be executed as.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[non_exhaustive]
pub enum Language {
	/// Execute through `sh -c`, capturing stdout.
	Shell,
}

/// Strip the trailing continuation marker from a joined entry. Entries
/// after the first carry surrounding quotes, so the marker may sit just
/// inside the closing quote; in that case the quote must be restored
/// after stitching.
fn strip_continuation<'a>(entry: &'a str, continuation: &str) -> (&'a str, bool) {
	let trimmed = entry.trim_end();
	if let Some(base) = trimmed.strip_suffix(&format!("{continuation}\"")) {
		(base.trim_end(), true)
	} else if let Some(base) = trimmed.strip_suffix(continuation) {
		(base.trim_end(), false)
	} else {
		(trimmed, false)
	}
}

/// Join buffered command lines into one executable command string.
///
/// The first line is taken verbatim and each following line becomes an
/// independently double-quoted argument token, all joined by spaces. A
/// line ending with the continuation marker stitches the next line onto
/// the same logical statement instead: the marker is stripped and the
/// continuation is appended on a new, indented line with the closing
/// quote restored.
pub fn join_command_lines(lines: &[String], continuation: &str) -> String {
	let mut entries: Vec<String> = Vec::new();
	let mut continuing = false;

	for line in lines {
		if entries.is_empty() {
			entries.push(line.clone());
		} else if continuing {
			let Some(previous) = entries.pop() else {
				continue;
			};
			let (base, requote) = strip_continuation(&previous, continuation);
			let closing = if requote { "\"" } else { "" };
			entries.push(format!("{base}\n        {line}{closing}"));
		} else {
			entries.push(format!("\"{line}\""));
		}

		continuing = line.trim_end().ends_with(continuation);
	}

	entries.join(" ")
}

/// Execute a command block and return its captured output as lines.
///
/// When `output_target` is given, the reconstructed command text is
/// written verbatim to that path instead of being executed and the
/// returned output is empty. Otherwise the command runs synchronously
/// through the shell; only stdout reaches the document. Exit status and
/// stderr are logged at debug level and otherwise ignored, so a broken
/// example degrades to whatever partial output it produced.
pub fn execute(
	lines: &[String],
	language: Language,
	markers: &Markers,
	output_target: Option<&Path>,
) -> MdrunResult<Vec<String>> {
	let joined = join_command_lines(lines, &markers.continuation);
	// Pipes escaped by a previous formatting pass must reach the shell
	// unescaped.
	let command = joined.replace("\\|", "|");

	if let Some(path) = output_target {
		tracing::debug!(path = %path.display(), "writing command text instead of executing");
		std::fs::write(path, &command)?;
		return Ok(Vec::new());
	}

	match language {
		Language::Shell => {
			tracing::debug!(%command, "executing shell block");
			let output = Command::new("sh").arg("-c").arg(&command).output()?;

			if !output.status.success() {
				tracing::debug!(status = %output.status, "command exited non-zero");
			}
			if !output.stderr.is_empty() {
				let stderr = String::from_utf8_lossy(&output.stderr);
				tracing::debug!(%stderr, "command wrote to stderr");
			}

			let stdout = String::from_utf8_lossy(&output.stdout);
			Ok(stdout.split('\n').map(str::to_string).collect())
		}
	}
}

/// Run a finalized command buffer as one block.
///
/// Header lines are kept verbatim at the front of the returned output,
/// prefix intact; the formatter strips it later. Hidden lines are
/// executed with a quoted hidden tag appended so their result lines can
/// be recognized and excluded from the captured output.
pub fn run_block(
	buffer: &[String],
	markers: &Markers,
	output_target: Option<&Path>,
) -> MdrunResult<Vec<String>> {
	let hidden_tag = markers.hidden_prefix.trim_end();
	let mut headers: Vec<String> = Vec::new();
	let mut to_execute: Vec<String> = Vec::new();

	for line in buffer {
		if line.starts_with(&markers.header_prefix) {
			headers.push(line.clone());
		} else if let Some(rest) = line.strip_prefix(&markers.hidden_prefix) {
			to_execute.push(format!("{rest};'{hidden_tag}'"));
		} else {
			to_execute.push(line.clone());
		}
	}

	let raw = execute(&to_execute, Language::Shell, markers, output_target)?;

	let mut output = headers;
	output.extend(raw.into_iter().filter(|line| !line.contains(hidden_tag)));
	Ok(output)
}
