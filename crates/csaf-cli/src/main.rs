//! # csaf CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

use csaf_cli::{config, report, validate, EXIT_OK};

/// CSAF verification tool.
///
/// Verifies CSAF 2.0 advisories against the structural checks and the
/// mandatory rule suite, one file at a time or in batches.
#[derive(Parser, Debug)]
#[command(name = "csaf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Verify advisories (files or directories).
    Validate(validate::ValidateArgs),
    /// Print a well-formed JSON configuration template.
    Template,
    /// Print the environment report for support requests.
    Report,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Validate(args) => validate::run(&args),
        Commands::Template => {
            print!("{}", config::generate_template());
            EXIT_OK
        }
        Commands::Report => {
            print!("{}", report::generate());
            EXIT_OK
        }
    };

    std::process::exit(code);
}
