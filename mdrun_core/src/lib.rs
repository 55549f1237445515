//! `mdrun_core` is the core library for the `mdrun` literate-document
//! preprocessor. It scans a plain-text document line by line, recognizes
//! embedded command blocks marked by sentinel comment tokens, executes
//! each block as a single shell command, and splices the captured output
//! back into the document in place of whatever a previous run recorded
//! there. Running the preprocessor over its own output reproduces the
//! same result.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Document file
//!   → Scanner (three-state machine: prose / capturing command / capturing output)
//!   → Executor (joins buffered lines, runs them through the shell)
//!   → Formatter (header extraction, artifact filtering, table-safe escaping)
//!   → spliced back into the scanner's result
//!   → Driver (writes the rebuilt document, in place by default)
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Sentinel tokens, formatting policy, and brand settings,
//!   loadable from `mdrun.toml`.
//! - [`scanner`] — The document state machine.
//! - [`executor`] — Command-line reconstruction and shell execution.
//! - [`formatter`] — Context-sensitive output post-processing.
//! - [`decor`] — The decorative brand-word renderer.
//! - [`document`] — File-level read/process/write driver.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use mdrun_core::RunnerConfig;
//! use mdrun_core::update_file;
//!
//! let config = RunnerConfig::default();
//! update_file(Path::new("docs/intro.adoc"), None, &config).unwrap();
//! ```

pub use config::*;
pub use decor::*;
pub use document::*;
pub use error::*;
pub use executor::*;
pub use formatter::*;
pub use scanner::*;

pub mod config;
pub mod decor;
pub mod document;
mod error;
pub mod executor;
pub mod formatter;
pub mod scanner;
