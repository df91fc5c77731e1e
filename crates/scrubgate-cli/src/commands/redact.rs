//! Redact command.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;

use scrubgate_core::ContentKind;
use scrubgate_redact::{RedactedOutput, RedactionPolicy, Redactor};

use crate::output::{success, CliError};

/// Redact command - redact PII from text, a file or stdin.
#[derive(Args)]
pub struct RedactCommand {
    /// Text to redact
    #[arg(long, conflicts_with_all = ["file", "stdin"])]
    pub text: Option<String>,

    /// File to redact (.csv files are redacted cell by cell)
    #[arg(long, short, conflicts_with = "stdin")]
    pub file: Option<PathBuf>,

    /// Read input from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Mask every detected category instead of the masking defaults
    #[arg(long)]
    pub mask_all: bool,

    /// Write redacted output to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print match counts to stderr
    #[arg(long)]
    pub stats: bool,
}

impl RedactCommand {
    /// Runs the redact command.
    pub fn run(self) -> Result<(), CliError> {
        let redactor = if self.mask_all {
            Redactor::with_policy(RedactionPolicy::mask_all())
        } else {
            Redactor::new()
        };

        let (content, kind) = self.read_input()?;

        let output = match kind {
            ContentKind::Tabular => redactor
                .redact_csv(&content)
                .map_err(|e| CliError::validation(format!("Failed to redact CSV input: {e}")))?,
            ContentKind::Text => redactor.redact_detailed(&content),
        };

        self.write_output(&output)?;

        if self.stats {
            print_stats(&output);
        }

        Ok(())
    }

    /// Reads the input and classifies it.
    fn read_input(&self) -> Result<(String, ContentKind), CliError> {
        if let Some(ref text) = self.text {
            Ok((text.clone(), ContentKind::Text))
        } else if let Some(ref path) = self.file {
            let content = std::fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))?;
            let filename = path.file_name().unwrap_or_default().to_string_lossy();
            Ok((content, ContentKind::from_filename(&filename)))
        } else if self.stdin {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| CliError::io(format!("Failed to read stdin: {e}")))?;
            Ok((content, ContentKind::Text))
        } else {
            Err(CliError::validation(
                "No input given. Use --text, --file or --stdin",
            ))
        }
    }

    /// Writes the redacted text to the selected destination.
    fn write_output(&self, output: &RedactedOutput) -> Result<(), CliError> {
        match self.output {
            Some(ref path) => {
                std::fs::write(path, output.text.as_bytes())
                    .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))?;
                success(&format!("Redacted output written to {}", path.display()));
            }
            None => {
                if output.text.ends_with('\n') {
                    print!("{}", output.text);
                } else {
                    println!("{}", output.text);
                }
            }
        }

        Ok(())
    }
}

/// Prints match counts to stderr.
fn print_stats(output: &RedactedOutput) {
    let stats = &output.stats;
    eprintln!(
        "{} match(es), {} masked",
        stats.total_matches, stats.total_masked
    );

    let mut counts: Vec<_> = stats.by_category.iter().collect();
    counts.sort_by_key(|(category, _)| category.precedence());
    for (category, count) in counts {
        eprintln!("  {:<12} {}", category.as_str(), count);
    }
}
