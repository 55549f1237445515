use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use mdrun_cli::MdrunCli;
use mdrun_core::RunnerConfig;
use mdrun_core::render_file;
use mdrun_core::update_file;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = MdrunCli::parse();

	// Respect NO_COLOR, the --no-color flag, and terminal capability.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	if args.verbose {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::new(
				"mdrun_core=debug,mdrun_cli=debug",
			))
			.with_writer(std::io::stderr)
			.init();
	}

	if let Err(e) = run(&args) {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<mdrun_core::MdrunError>() {
			Ok(mdrun_err) => {
				let report: miette::Report = (*mdrun_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn run(args: &MdrunCli) -> Result<(), Box<dyn std::error::Error>> {
	let config = load_config(args)?;

	if args.dry_run {
		let (original, updated) = render_file(&args.input, &config)?;
		if original == updated {
			println!("{} is already up to date.", args.input.display());
		} else {
			println!("Dry run: {} would change:", args.input.display());
			print_diff(&original, &updated);
		}
		return Ok(());
	}

	update_file(&args.input, args.output.as_deref(), &config)?;
	let destination: &PathBuf = args.output.as_ref().unwrap_or(&args.input);
	println!("Updated {}", destination.display());

	Ok(())
}

/// Resolve the runner configuration: an explicit `--config` path wins,
/// otherwise config files are discovered next to the input document and
/// defaults apply when none exist.
fn load_config(args: &MdrunCli) -> Result<RunnerConfig, Box<dyn std::error::Error>> {
	if let Some(path) = &args.config {
		return Ok(RunnerConfig::load_file(path)?);
	}

	let dir = args
		.input
		.parent()
		.filter(|parent| !parent.as_os_str().is_empty())
		.unwrap_or_else(|| Path::new("."));
	Ok(RunnerConfig::load(dir)?.unwrap_or_default())
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!("   {change}");
			}
		}
	}
}
