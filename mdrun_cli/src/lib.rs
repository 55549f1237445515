use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Execute the command blocks embedded in a document and splice their output back in.",
	long_about = "mdrun rewrites a literate document in place: it scans for comment-delimited \
	              command blocks, executes each block through the shell, and replaces the \
	              recorded output region with the freshly captured output.\n\nRunning mdrun \
	              twice over the same document is idempotent — the second pass reproduces the \
	              first pass's output exactly."
)]
pub struct MdrunCli {
	/// Path to the input document.
	pub input: PathBuf,

	/// Path to the output document (default: overwrite the input file).
	#[arg(long, short)]
	pub output: Option<PathBuf>,

	/// Enable verbose output: every scanned line, executed command, and
	/// captured output is logged to stderr.
	#[arg(long, short = 'd', default_value_t = false)]
	pub verbose: bool,

	/// Path to an explicit config file. Without this flag, `mdrun.toml` and
	/// `.mdrun.toml` are discovered next to the input document.
	#[arg(long)]
	pub config: Option<PathBuf>,

	/// Process the document and print a diff of what would change, without
	/// writing anything.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}
