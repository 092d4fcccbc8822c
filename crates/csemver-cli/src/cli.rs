//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};

/// CSemVer CLI - Constrained Semantic Versioning toolbox
///
/// Inspect CSemVer versions and their ordinal numbers, enumerate direct
/// successors, and translate version ranges between the native, npm and
/// NuGet syntaxes.
#[derive(Parser, Debug)]
#[command(
    name = "csemver",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a version's ordinal, quality, and both textual forms
    Inspect(InspectArgs),

    /// Decode an ordinal number back into a version
    Decode(DecodeArgs),

    /// Enumerate the direct successors of a version
    Next(NextArgs),

    /// Test versions against a version bound
    Satisfies(SatisfiesArgs),

    /// Translate a range expression between syntaxes
    Translate(TranslateArgs),
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// The version to inspect, in long or short form
    #[arg(id = "version_arg", value_name = "VERSION")]
    pub version: String,

    /// Also show the packed file version (with and without the CI flag)
    #[arg(long)]
    pub file_version: bool,
}

/// Arguments for the decode command
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// The ordinal to decode (1 is 0.0.0-alpha)
    #[arg(value_name = "ORDINAL")]
    pub ordinal: u64,

    /// Render the short form instead of the long form
    #[arg(long)]
    pub short: bool,
}

/// Arguments for the next command
#[derive(Parser, Debug)]
pub struct NextArgs {
    /// The version to start from
    #[arg(id = "version_arg", value_name = "VERSION")]
    pub version: String,

    /// Only the closest successors instead of the full set
    #[arg(long)]
    pub closest: bool,
}

/// Arguments for the satisfies command
#[derive(Parser, Debug)]
pub struct SatisfiesArgs {
    /// The range expression
    #[arg(value_name = "RANGE")]
    pub range: String,

    /// Versions to test against the range
    #[arg(value_name = "VERSION", required = true)]
    pub versions: Vec<String>,

    /// Syntax the range expression is written in
    #[arg(short, long, value_enum, default_value = "native")]
    pub syntax: RangeSyntax,

    /// Let prerelease versions match (npm syntax only)
    #[arg(long)]
    pub include_prerelease: bool,
}

/// Arguments for the translate command
#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// The range expression to translate
    #[arg(value_name = "RANGE")]
    pub range: String,

    /// Syntax the range expression is written in
    #[arg(short, long, value_enum, default_value = "native")]
    pub from: RangeSyntax,

    /// Syntax to render the bound in
    #[arg(short, long, value_enum, default_value = "native")]
    pub to: RangeSyntax,

    /// Let prerelease versions match (npm syntax only)
    #[arg(long)]
    pub include_prerelease: bool,
}

/// Supported range syntaxes
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSyntax {
    /// The exact native syntax: v1.2.3[LockMinor,Stable]
    Native,
    /// npm range expressions: ^1.2.3, ~1.2, >=1.0.0 <2.0.0, ...
    Npm,
    /// NuGet version ranges: [1.2,1.3), 1.2.*, ...
    Nuget,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// Compact JSON output
    Json,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none()
    }

    /// Effective verbosity level (0 when quiet)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_parsing() {
        let cli = Cli::parse_from(["csemver", "inspect", "1.2.3-beta.2", "--file-version"]);
        match cli.command {
            Commands::Inspect(args) => {
                assert_eq!(args.version, "1.2.3-beta.2");
                assert!(args.file_version);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_satisfies_requires_a_version() {
        assert!(Cli::try_parse_from(["csemver", "satisfies", "v1.2.3[Lock]"]).is_err());
        let cli = Cli::parse_from([
            "csemver",
            "satisfies",
            "--syntax",
            "npm",
            "^1.2.3",
            "1.2.9",
            "1.3.0",
        ]);
        match cli.command {
            Commands::Satisfies(args) => {
                assert_eq!(args.syntax, RangeSyntax::Npm);
                assert_eq!(args.versions.len(), 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::parse_from(["csemver", "-vv", "decode", "1"]);
        assert_eq!(cli.verbosity_level(), 2);
        let cli = Cli::parse_from(["csemver", "--quiet", "decode", "1"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
