//! Check command implementation.

use crate::cli::CheckArgs;
use crate::commands::Outcome;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use safeguard_domain::traits::TextClassifier;
use safeguard_moderator::ModerationDecider;
use std::io::{self, Read};

/// Execute the check command.
pub async fn execute_check<C>(
    args: CheckArgs,
    decider: &ModerationDecider<C>,
    formatter: &Formatter,
) -> Result<Outcome>
where
    C: TextClassifier,
{
    let text = submission_text(&args)?;
    let (rendered, outcome) = check_text(&text, args.detailed, decider, formatter).await?;
    println!("{}", rendered);
    Ok(outcome)
}

/// Evaluate `text` and render the result.
async fn check_text<C>(
    text: &str,
    detailed: bool,
    decider: &ModerationDecider<C>,
    formatter: &Formatter,
) -> Result<(String, Outcome)>
where
    C: TextClassifier,
{
    if detailed {
        let report = decider.evaluate_detailed(text).await?;
        let rendered = formatter.format_report(&report)?;
        Ok((rendered, outcome_of(report.verdict.is_allowed())))
    } else {
        let verdict = decider.evaluate(text).await?;
        let rendered = formatter.format_verdict(&verdict)?;
        Ok((rendered, outcome_of(verdict.is_allowed())))
    }
}

fn outcome_of(allowed: bool) -> Outcome {
    if allowed {
        Outcome::Allowed
    } else {
        Outcome::Rejected
    }
}

/// Submission from the positional argument or stdin.
fn submission_text(args: &CheckArgs) -> Result<String> {
    match (&args.text, args.stdin) {
        (Some(text), false) => Ok(text.clone()),
        (None, true) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
        }
        (Some(_), true) => Err(CliError::InvalidInput(
            "Pass the submission as an argument or with --stdin, not both".to_string(),
        )),
        (None, false) => Err(CliError::InvalidInput(
            "No submission given. Pass TEXT or --stdin".to_string(),
        )),
    }
}
