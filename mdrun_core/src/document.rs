use std::path::Path;

use crate::MdrunResult;
use crate::config::RunnerConfig;
use crate::scanner::Scanner;

/// Run the scanner over an in-memory document given as lines.
pub fn process_lines(lines: &[String], config: &RunnerConfig) -> MdrunResult<Vec<String>> {
	let mut scanner = Scanner::new(config);
	for line in lines {
		scanner.process_line(line)?;
	}
	scanner.finish()
}

/// Process a whole document and return the replacement content. Trailing
/// whitespace is normalized to a single final newline.
pub fn process_content(content: &str, config: &RunnerConfig) -> MdrunResult<String> {
	let lines: Vec<String> = content.lines().map(str::to_string).collect();
	let processed = process_lines(&lines, config)?;
	Ok(format!("{}\n", processed.join("\n").trim_end()))
}

/// Read a document and compute its updated content without touching disk.
/// Returns the original and updated content, for callers that want to
/// diff or preview before writing.
pub fn render_file(input: &Path, config: &RunnerConfig) -> MdrunResult<(String, String)> {
	let original = std::fs::read_to_string(input)?;
	let updated = process_content(&original, config)?;
	Ok((original, updated))
}

/// Rewrite a document in place (or to `output` when given) by executing
/// its command blocks and splicing their captured output. The source is
/// fully read and fully processed before anything is written, so a failed
/// pass never leaves a partially-written destination.
pub fn update_file(
	input: &Path,
	output: Option<&Path>,
	config: &RunnerConfig,
) -> MdrunResult<()> {
	let (_, updated) = render_file(input, config)?;
	let destination = output.unwrap_or(input);
	tracing::debug!(destination = %destination.display(), "writing updated document");
	std::fs::write(destination, updated)?;
	Ok(())
}
