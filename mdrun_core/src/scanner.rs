use crate::MdrunError;
use crate::MdrunResult;
use crate::config::RunnerConfig;
use crate::decor::apply_brand;
use crate::executor::run_block;
use crate::formatter;
use crate::formatter::escape_pipes;

/// The mode the scanner is in for the current line. Exactly one is active
/// at a time and every transition is driven by sentinel tokens in the
/// current line.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ScanState {
	/// Plain document text; copied through (brand-substituted).
	Prose,
	/// Inside a command block; lines accumulate in the command buffer.
	CapturingCommand,
	/// Inside an output region; stale lines from a previous run are
	/// discarded until the region closes.
	CapturingOutput,
}

/// Line-by-line document scanner. Feed every line through
/// [`Scanner::process_line`] and collect the transformed document with
/// [`Scanner::finish`].
///
/// Each state has one handler that returns the next state together with
/// the lines to emit, so transitions stay explicit. The command buffer
/// and the pending output are owned here and reset on every block close;
/// at most one command/output pair is live at a time.
pub struct Scanner<'a> {
	config: &'a RunnerConfig,
	state: ScanState,
	command: Vec<String>,
	output: Option<Vec<String>>,
	in_table: bool,
	/// 1-indexed line where the current block or region started.
	block_line: usize,
	line_no: usize,
	result: Vec<String>,
}

impl<'a> Scanner<'a> {
	pub fn new(config: &'a RunnerConfig) -> Self {
		Self {
			config,
			state: ScanState::Prose,
			command: Vec::new(),
			output: None,
			in_table: false,
			block_line: 0,
			line_no: 0,
			result: Vec::new(),
		}
	}

	pub fn state(&self) -> ScanState {
		self.state
	}

	/// Process one document line, advancing the state machine.
	pub fn process_line(&mut self, line: &str) -> MdrunResult<()> {
		self.line_no += 1;

		// Table boundaries may straddle block boundaries, so the toggle is
		// evaluated in every state.
		if self.config.markers.is_table_delimiter(line) {
			self.in_table = !self.in_table;
		}

		tracing::debug!(
			line = self.line_no,
			state = ?self.state,
			in_table = self.in_table,
			content = %line,
			"scan"
		);

		let (next, emitted) = match self.state {
			ScanState::Prose => self.prose_line(line)?,
			ScanState::CapturingCommand => self.command_line(line)?,
			ScanState::CapturingOutput => self.output_line(line),
		};

		self.state = next;
		self.result.extend(emitted);
		Ok(())
	}

	/// Finalize the scan and return the transformed document lines. A block
	/// or region left open at end of input is a malformed document.
	pub fn finish(self) -> MdrunResult<Vec<String>> {
		match self.state {
			ScanState::Prose => Ok(self.result),
			ScanState::CapturingCommand => {
				Err(MdrunError::UnterminatedCommandBlock {
					line: self.block_line,
				})
			}
			ScanState::CapturingOutput => {
				Err(MdrunError::UnterminatedOutputRegion {
					line: self.block_line,
				})
			}
		}
	}

	fn prose_line(&mut self, line: &str) -> MdrunResult<(ScanState, Vec<String>)> {
		let markers = &self.config.markers;

		if markers.is_command_open(line) {
			self.block_line = self.line_no;
			let remainder = strip_comment(line.trim(), &markers.command);
			if !remainder.trim().is_empty() {
				self.command.push(remainder);
			}

			// A block that closes on its opening line executes immediately.
			if line.trim_end().ends_with("-->") {
				self.run_command_block()?;
				let emitted = self.splice_output(Some(line))?;
				return Ok((ScanState::CapturingOutput, emitted));
			}

			let emitted = vec![apply_brand(line, &self.config.brand)?];
			return Ok((ScanState::CapturingCommand, emitted));
		}

		let emitted = vec![apply_brand(line, &self.config.brand)?];
		Ok((ScanState::Prose, emitted))
	}

	fn command_line(&mut self, line: &str) -> MdrunResult<(ScanState, Vec<String>)> {
		if self.config.markers.is_command_close(line) {
			let mut emitted = vec![line.to_string()];
			self.run_command_block()?;
			emitted.extend(self.splice_output(None)?);
			return Ok((ScanState::CapturingOutput, emitted));
		}

		self.command.push(line.to_string());
		let emitted = vec![apply_brand(line, &self.config.brand)?];
		Ok((ScanState::CapturingCommand, emitted))
	}

	fn output_line(&mut self, line: &str) -> (ScanState, Vec<String>) {
		let markers = &self.config.markers;

		if line == markers.output_end_line() {
			let emitted = vec![String::new(), "++++".to_string(), line.to_string()];
			return (ScanState::Prose, emitted);
		}

		// A table delimiter that just closed its table also closes the
		// region, so output regions inside tables end structurally.
		if markers.is_table_delimiter(line) && !self.in_table {
			let emitted = vec![String::new(), "++++".to_string(), line.to_string()];
			return (ScanState::Prose, emitted);
		}

		// Stale output from a previous run; regenerated, not copied.
		(ScanState::CapturingOutput, Vec::new())
	}

	/// Execute the buffered command block and hold the raw output until the
	/// splice point.
	fn run_command_block(&mut self) -> MdrunResult<()> {
		let buffer = std::mem::take(&mut self.command);
		let raw = run_block(&buffer, &self.config.markers, None)?;
		self.output = Some(raw);
		Ok(())
	}

	/// Emit the formatted output block in place of the stale output region.
	/// Consuming output that was never captured is a contract violation.
	fn splice_output(&mut self, opening_line: Option<&str>) -> MdrunResult<Vec<String>> {
		let raw = self.output.take().ok_or(MdrunError::OutputUnavailable {
			line: self.line_no,
		})?;
		self.block_line = self.line_no;

		let formatted = formatter::format(
			&raw,
			self.in_table,
			&self.config.markers,
			&self.config.format,
		);

		let mut emitted = Vec::new();

		if let Some(line) = opening_line {
			let line = apply_brand(line, &self.config.brand)?;
			if self.in_table {
				emitted.push(line);
			} else {
				emitted.push(escape_pipes(&line));
			}
		}

		emitted.push("++++".to_string());
		emitted.push(String::new());
		emitted.extend(formatted.header);
		emitted.push(format!("[source,{}]", self.config.format.source_language));
		emitted.push("----".to_string());

		let mut body = formatted.body;
		// Captured stdout is split on newlines, which leaves one empty
		// trailing line per execution.
		if body.last().is_some_and(String::is_empty) {
			body.pop();
		}
		emitted.extend(body);

		emitted.push("----".to_string());
		Ok(emitted)
	}
}

/// Strip the comment framing and the command token from a block-opening
/// line, leaving the command text that seeds the buffer.
fn strip_comment(line: &str, command_token: &str) -> String {
	let line = line.strip_suffix(" -->").unwrap_or(line);
	line.replace("<!-- ", "").replace(command_token, "")
}
