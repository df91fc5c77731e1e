//! CLI command definitions and implementations.

mod check;
mod redact;

use clap::{Parser, Subcommand};

use crate::output::CliError;

pub use check::CheckCommand;
pub use redact::RedactCommand;

/// Scrubgate CLI
///
/// Local PII redaction and submission field checks.
#[derive(Parser)]
#[command(name = "scrubgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Redact PII from text, a file or stdin
    Redact(RedactCommand),

    /// Check submission fields for anomalies
    Check(CheckCommand),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<(), CliError> {
        // Apply color settings
        if self.no_color {
            colored::control::set_override(false);
        }

        match self.command {
            Commands::Redact(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
        }
    }
}
