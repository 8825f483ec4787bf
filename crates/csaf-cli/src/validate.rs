//! # Validate Subcommand
//!
//! Resolves the effective toggles from configuration file, `CSAF_*`
//! environment variables, and command-line flags (in that precedence
//! order), then dispatches either the single-file pipeline or the batch
//! walker and folds the outcome into an exit code.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::{self, Configuration, EnvOverrides};
use crate::{batch, process, EXIT_FAILURE, EXIT_OK, EXIT_USAGE};

/// Arguments for the validate subcommand.
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Advisory files or directories to verify.
    pub source: Vec<PathBuf>,

    /// Additional advisory files or directories (same as positional).
    #[arg(short, long)]
    pub input: Vec<PathBuf>,

    /// Path to a JSON configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stop the batch at the first failing advisory.
    #[arg(short, long)]
    pub bail_out: bool,

    /// Resolve sources and toggles, then exit without validating.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Report every processed advisory, not only failures.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the per-file and summary reporting.
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable strict interpretation of the mandatory rules.
    #[arg(short, long)]
    pub strict: bool,

    /// Walk directories without a depth bound.
    #[arg(short, long)]
    pub recursive: bool,
}

/// Toggles after merging configuration, environment, and flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effective {
    pub bail_out: bool,
    pub dry_run: bool,
    pub verbose: bool,
    pub quiet: bool,
    pub strict: bool,
    pub recursive: bool,
}

impl Effective {
    /// Merge the three toggle sources; any source may switch a toggle on,
    /// and quiet wins over verbose.
    pub fn merge(file: &Configuration, env: &EnvOverrides, args: &ValidateArgs) -> Self {
        let mut effective = Self {
            bail_out: file.local.bail_out || env.bail_out || args.bail_out,
            dry_run: env.dry_run || args.dry_run,
            verbose: file.local.verbose || env.verbose || args.verbose,
            quiet: file.local.quiet || env.quiet || args.quiet,
            strict: file.local.strict || env.strict || args.strict,
            recursive: args.recursive,
        };
        if effective.quiet {
            effective.verbose = false;
        }
        effective
    }
}

fn load_configuration(args: &ValidateArgs) -> anyhow::Result<Configuration> {
    if let Some(path) = &args.config {
        return config::read_configuration(path);
    }
    let default = Path::new(config::DEFAULT_CONFIG_NAME);
    if default.is_file() {
        return config::read_configuration(default);
    }
    Ok(Configuration::default())
}

/// Run the validate subcommand and return the process exit code.
pub fn run(args: &ValidateArgs) -> i32 {
    let configuration = match load_configuration(args) {
        Ok(configuration) => configuration,
        Err(err) => {
            eprintln!("error: {err:#}");
            return EXIT_USAGE;
        }
    };
    let env = EnvOverrides::from_env();
    let effective = Effective::merge(&configuration, &env, args);

    let mut sources: Vec<PathBuf> = args.source.clone();
    sources.extend(args.input.iter().cloned());

    if sources.is_empty() || sources.iter().any(|s| s.as_os_str().is_empty()) {
        eprintln!("USAGE");
        return EXIT_USAGE;
    }

    if effective.strict {
        tracing::debug!("strict mode requested; mandatory rules already run strict");
    }

    if effective.dry_run {
        tracing::info!(
            sources = sources.len(),
            bail_out = effective.bail_out,
            recursive = effective.recursive,
            "dry run, no validation performed"
        );
        return EXIT_OK;
    }

    if sources.len() == 1 && sources[0].is_file() {
        return match process::validate_file(&sources[0]) {
            Ok(()) => {
                if !effective.quiet {
                    println!("OK");
                }
                EXIT_OK
            }
            Err(err) => {
                eprintln!("{err}");
                err.exit_code()
            }
        };
    }

    let summary = batch::run(&sources, effective.recursive, effective.bail_out);
    if !effective.quiet {
        println!("{} {}", summary.tally_line(), summary.verdict());
    }
    if summary.all_passed() {
        EXIT_OK
    } else {
        EXIT_FAILURE
    }
}
