use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MdrunError {
	#[error(transparent)]
	#[diagnostic(code(mdrun::io_error))]
	Io(#[from] std::io::Error),

	#[error("command block opened on line {line} is never closed")]
	#[diagnostic(
		code(mdrun::unterminated_command_block),
		help("add a `-->` line to close the command block")
	)]
	UnterminatedCommandBlock { line: usize },

	#[error("output region opened on line {line} is never closed")]
	#[diagnostic(
		code(mdrun::unterminated_output_region),
		help("add the output end marker line to close the region")
	)]
	UnterminatedOutputRegion { line: usize },

	#[error("output region on line {line} has no captured command output")]
	#[diagnostic(
		code(mdrun::output_unavailable),
		help("every output region must be preceded by a command block")
	)]
	OutputUnavailable { line: usize },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdrun::config_parse),
		help("check that mdrun.toml is valid TOML with [markers], [format] and/or [brand] sections")
	)]
	ConfigParse(String),

	#[error("color palette has {colors} color(s) but `{word}` needs one per character")]
	#[diagnostic(
		code(mdrun::palette_too_small),
		help("add colors to the brand palette or shorten the brand word")
	)]
	PaletteTooSmall { word: String, colors: usize },
}

pub type MdrunResult<T> = Result<T, MdrunError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
