use std::path::Path;

use serde::Deserialize;

use crate::MdrunError;
use crate::MdrunResult;

/// Supported config file locations in discovery order (highest precedence
/// first). Resolved relative to the directory of the document being
/// processed.
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["mdrun.toml", ".mdrun.toml"];

/// Sentinel tokens that delimit command blocks and output regions.
///
/// The scanner recognizes a command block on any comment line containing
/// the command token, and an output region ending at the line built by
/// [`Markers::output_end_line`]. All tokens can be overridden from
/// `mdrun.toml`:
///
/// ```toml
/// [markers]
/// command = "RUN"
/// output = "END"
/// ```
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Markers {
	/// Token that marks a comment line as the start of a command block.
	pub command: String,
	/// Token whose comment line closes an output region.
	pub output: String,
	/// Prefix of a table boundary line. Toggles table context.
	pub table_delimiter: String,
	/// Trailing marker that joins a buffered command line with the next one.
	pub continuation: String,
	/// Prefix of a block line emitted verbatim above the command output.
	pub header_prefix: String,
	/// Prefix of a block line that is executed but whose result is dropped.
	pub hidden_prefix: String,
}

impl Default for Markers {
	fn default() -> Self {
		Self {
			command: "🐖".to_string(),
			output: "🐓".to_string(),
			table_delimiter: "|===".to_string(),
			continuation: "/".to_string(),
			header_prefix: "[HEADER] ".to_string(),
			hidden_prefix: "[HIDDEN] ".to_string(),
		}
	}
}

impl Markers {
	/// True when the line opens a command block: a comment line carrying the
	/// command token.
	pub fn is_command_open(&self, line: &str) -> bool {
		line.trim_start().starts_with("<!--") && line.contains(&self.command)
	}

	/// True when the line closes a multi-line command block.
	pub fn is_command_close(&self, line: &str) -> bool {
		line.trim_start() == "-->"
	}

	/// The full line that terminates an output region.
	pub fn output_end_line(&self) -> String {
		format!("<!-- {} -->", self.output)
	}

	/// True when the line toggles table context.
	pub fn is_table_delimiter(&self, line: &str) -> bool {
		line.trim_start().starts_with(&self.table_delimiter)
	}
}

/// Formatting policy for captured command output.
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
	/// Language label placed on the fenced source block around spliced
	/// output.
	pub source_language: String,
	/// Output lines containing any of these substrings are console noise
	/// and are dropped entirely.
	pub artifacts: Vec<String>,
}

impl Default for FormatConfig {
	fn default() -> Self {
		Self {
			source_language: "console".to_string(),
			artifacts: vec![
				"thrown at inst console".to_string(),
				"==>noobj".to_string(),
				"[/io/console] thread spawned".to_string(),
			],
		}
	}
}

/// Settings for the decorative brand rendering substituted for the brand
/// token in prose and command lines.
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BrandConfig {
	/// Inline token replaced by a decorated rendering of [`Self::word`].
	pub token: String,
	/// The word to decorate.
	pub word: String,
	/// Color names drawn (without replacement) for each character. Must hold
	/// at least one color per character of `word`.
	pub palette: Vec<String>,
}

impl Default for BrandConfig {
	fn default() -> Self {
		Self {
			token: "[mdrun]".to_string(),
			word: "mdrun".to_string(),
			palette: ["red", "blue", "lime", "yellow", "fuchsia", "aqua"]
				.map(str::to_string)
				.to_vec(),
		}
	}
}

/// Complete runner configuration. Every field has a default, so an absent
/// or empty config file behaves exactly like the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
	pub markers: Markers,
	pub format: FormatConfig,
	pub brand: BrandConfig,
}

impl RunnerConfig {
	/// Load configuration from an explicit TOML file path.
	pub fn load_file(path: &Path) -> MdrunResult<Self> {
		let content = std::fs::read_to_string(path)?;
		toml::from_str(&content).map_err(|e| MdrunError::ConfigParse(e.to_string()))
	}

	/// Discover and load configuration from a directory, trying each
	/// candidate file name in order. Returns `None` when no config file
	/// exists.
	pub fn load(dir: &Path) -> MdrunResult<Option<Self>> {
		for candidate in CONFIG_FILE_CANDIDATES {
			let path = dir.join(candidate);
			if path.is_file() {
				return Self::load_file(&path).map(Some);
			}
		}

		Ok(None)
	}
}
