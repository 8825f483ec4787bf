//! # csaf-cli — CSAF Verification Command-Line Interface
//!
//! Drives the end-to-end validation pipeline: read input, sniff the trivial
//! format, parse JSON, run the structural checks, run the mandatory rule
//! suite, and fold everything into an exit code plus one diagnostic line.
//!
//! ## Subcommands
//!
//! - `validate` — verify one or more advisories (files or directories)
//! - `template` — print a well-formed JSON configuration template
//! - `report` — print the environment report for support requests
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from pipeline logic.
//! - All errors are recovered at the orchestrator boundary and converted
//!   into a `(code, message)` pair; nothing escapes to the caller.
//! - Exit codes: 0 success, 1 content rejected, 2 usage error.

pub mod batch;
pub mod config;
pub mod process;
pub mod report;
pub mod validate;

/// Exit code for a successful validation run.
pub const EXIT_OK: i32 = 0;
/// Exit code when content was rejected.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for invalid invocations.
pub const EXIT_USAGE: i32 = 2;
