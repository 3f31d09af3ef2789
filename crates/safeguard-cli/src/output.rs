//! Output formatting for the CLI.

use crate::commands::BatchEntry;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use safeguard_domain::ModerationVerdict;
use safeguard_moderator::ModerationReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a single verdict.
    pub fn format_verdict(&self, verdict: &ModerationVerdict) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&verdict_json(verdict))?),
            OutputFormat::Table => Ok(self.verdict_line(verdict)),
            OutputFormat::Quiet => Ok(verdict_token(verdict).to_string()),
        }
    }

    /// Format a detailed report.
    pub fn format_report(&self, report: &ModerationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut json = verdict_json(&report.verdict);
                let severities: serde_json::Map<String, serde_json::Value> = report
                    .classification
                    .scores()
                    .map(|s| (s.category.to_string(), s.severity.value().into()))
                    .collect();
                json["severities"] = severities.into();
                json["violations"] = report
                    .violations
                    .iter()
                    .map(|s| serde_json::Value::from(s.category.to_string()))
                    .collect::<Vec<_>>()
                    .into();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Category", "Severity", "Flagged"]);

                for score in report.classification.scores() {
                    let flagged = if score.severity.is_violation() {
                        self.colorize("yes", "red")
                    } else {
                        "no".to_string()
                    };
                    builder.push_record([
                        score.category.to_string(),
                        score.severity.to_string(),
                        flagged,
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(format!("{}\n{}", table, self.verdict_line(&report.verdict)))
            }
            OutputFormat::Quiet => Ok(verdict_token(&report.verdict).to_string()),
        }
    }

    /// Format batch results, one row per submission.
    pub fn format_batch(&self, entries: &[BatchEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = entries
                    .iter()
                    .map(|entry| match &entry.result {
                        Ok(verdict) => {
                            let mut json = verdict_json(verdict);
                            json["line"] = entry.line.into();
                            json
                        }
                        Err(e) => serde_json::json!({
                            "line": entry.line,
                            "error": e.to_string(),
                        }),
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => {
                if entries.is_empty() {
                    return Ok(self.colorize("No submissions found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Line", "Submission", "Verdict", "Reason"]);

                for entry in entries {
                    let (verdict, reason) = match &entry.result {
                        Ok(ModerationVerdict::Allowed) => {
                            (self.colorize("allowed", "green"), String::new())
                        }
                        Ok(ModerationVerdict::Rejected { reason }) => {
                            (self.colorize("rejected", "red"), reason.clone())
                        }
                        Err(e) => (self.colorize("error", "yellow"), e.to_string()),
                    };
                    builder.push_record([
                        entry.line.to_string(),
                        truncate(&entry.text, 40),
                        verdict,
                        reason,
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(table.to_string())
            }
            OutputFormat::Quiet => {
                let lines: Vec<String> = entries
                    .iter()
                    .map(|entry| match &entry.result {
                        Ok(verdict) => format!("{}\t{}", entry.line, verdict_token(verdict)),
                        Err(_) => format!("{}\terror", entry.line),
                    })
                    .collect();
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn verdict_line(&self, verdict: &ModerationVerdict) -> String {
        match verdict {
            ModerationVerdict::Allowed => self.success("Allowed"),
            ModerationVerdict::Rejected { reason } => self.error(&format!("Rejected: {}", reason)),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn verdict_json(verdict: &ModerationVerdict) -> serde_json::Value {
    serde_json::json!({
        "allowed": verdict.is_allowed(),
        "reason": verdict.reason(),
    })
}

fn verdict_token(verdict: &ModerationVerdict) -> &'static str {
    if verdict.is_allowed() {
        "allowed"
    } else {
        "rejected"
    }
}

/// Shorten text to `max` characters for table cells.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}
