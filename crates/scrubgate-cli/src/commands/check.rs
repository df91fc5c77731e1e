//! Check command.

use clap::Args;
use colored::Colorize;

use scrubgate_redact::{detect_anomalies, AnomalyField};

use crate::output::CliError;

/// Check command - classify submission contact fields.
#[derive(Args)]
pub struct CheckCommand {
    /// Submitter name
    #[arg(long)]
    pub name: String,

    /// Submitter email
    #[arg(long)]
    pub email: String,

    /// Submitter phone
    #[arg(long)]
    pub phone: String,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Runs the check command.
    pub fn run(self) -> Result<(), CliError> {
        let report = detect_anomalies(&self.name, &self.email, &self.phone);

        if self.json {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{json}");
        } else {
            for field in [AnomalyField::Name, AnomalyField::Email, AnomalyField::Phone] {
                match report.details.iter().find(|d| d.field == field) {
                    Some(detail) => {
                        println!("{} {:<6} {}", "✗".red(), field.as_str(), detail.issue);
                    }
                    None => {
                        println!("{} {:<6} ok", "✓".green(), field.as_str());
                    }
                }
            }
        }

        if report.has_anomaly {
            return Err(CliError::anomaly(format!(
                "{} field(s) flagged",
                report.details.len()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::ErrorKind;

    fn command(name: &str, email: &str, phone: &str) -> CheckCommand {
        CheckCommand {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            json: false,
        }
    }

    #[test]
    fn test_clean_fields_pass() {
        let result = command("Jane Doe", "jane.doe@example.org", "4155552671").run();
        assert!(result.is_ok());
    }

    #[test]
    fn test_suspicious_fields_flagged() {
        let error = command("Test", "test@test.com", "1234567890")
            .run()
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Anomaly);
    }
}
