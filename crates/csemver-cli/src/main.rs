//! CSemVer CLI - Constrained Semantic Versioning toolbox
//!
//! This is the main entry point for the csemver CLI application, providing
//! commands for inspecting versions, decoding ordinals, enumerating
//! successors, and translating version ranges between syntaxes.

mod cli;
mod error;
mod handlers;
mod output;

use cli::{Cli, Commands};
use colored::control;
use error::Result;
use output::OutputWriter;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    init_logging(cli.verbosity_level());

    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
fn run(cli: Cli) -> Result<()> {
    let mut output = OutputWriter::new(cli.output, cli.use_color(), cli.quiet);

    tracing::debug!(command = ?cli.command, "executing command");

    match cli.command {
        Commands::Inspect(args) => handlers::handle_inspect(args, &mut output),
        Commands::Decode(args) => handlers::handle_decode(args, &mut output),
        Commands::Next(args) => handlers::handle_next(args, &mut output),
        Commands::Satisfies(args) => handlers::handle_satisfies(args, &mut output),
        Commands::Translate(args) => handlers::handle_translate(args, &mut output),
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the -v count picks the level.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
