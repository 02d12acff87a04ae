//! Binary entry point: parse arguments, dispatch to the command modules,
//! and map errors to stable exit codes (1 = logical failure, 2 = input
//! failure).
use clap::Parser;

mod cli;
mod cmd;
mod error;
mod format;
mod io;
mod parse;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin};

use error::CliError;
use format::{FormatMode, FormatterConfig};

fn main() {
    let cli = Cli::parse();

    let mode = match cli.format {
        OutputFormat::Human => FormatMode::Human,
        OutputFormat::Json => FormatMode::Json,
    };
    let config = FormatterConfig::from_flags(cli.no_color, cli.quiet, cli.verbose);

    let result: Result<(), CliError> = match &cli.command {
        Command::Match {
            federation,
            registry,
            crosswalk,
            out,
        } => cmd::match_orgs::run(
            federation,
            registry,
            crosswalk,
            out,
            cli.max_file_size,
            mode,
            &config,
        ),
        Command::Inspect {
            federation,
            registry,
            crosswalk,
        } => cmd::inspect::run(federation, registry, crosswalk, cli.max_file_size, &cli.format),
        Command::Convert { file, compact } => cmd::convert::run(file, *compact, cli.max_file_size),
        Command::Fetch {
            out,
            federation_url,
            crosswalk_url,
            registry_url,
        } => cmd::fetch::run(
            out,
            federation_url,
            crosswalk_url,
            registry_url.as_deref(),
            mode,
            &config,
        ),
        Command::Version => {
            println!("{}", fedlink_core::version());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}
