//! Batch command implementation.

use crate::cli::BatchArgs;
use crate::commands::Outcome;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use safeguard_domain::traits::TextClassifier;
use safeguard_domain::ModerationVerdict;
use safeguard_moderator::{ModerationDecider, ModerationError};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Moderation result for one line of a batch file.
#[derive(Debug)]
pub struct BatchEntry {
    /// 1-based line number in the input file
    pub line: usize,
    /// Submission text
    pub text: String,
    /// Verdict, or why none could be reached
    pub result: std::result::Result<ModerationVerdict, ModerationError>,
}

/// Execute the batch command.
pub async fn execute_batch<C>(
    args: BatchArgs,
    decider: Arc<ModerationDecider<C>>,
    formatter: &Formatter,
) -> Result<Outcome>
where
    C: TextClassifier + Send + Sync + 'static,
{
    let contents = tokio::fs::read_to_string(&args.file).await?;
    let submissions = parse_submissions(&contents);

    info!(
        submissions = submissions.len(),
        concurrency = args.concurrency,
        "Starting batch"
    );

    let entries = moderate_all(submissions, decider, args.concurrency).await?;
    println!("{}", formatter.format_batch(&entries)?);

    Ok(batch_outcome(&entries))
}

/// Non-empty lines with their 1-based line numbers.
fn parse_submissions(contents: &str) -> Vec<(usize, String)> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, line.to_string()))
        .collect()
}

/// Evaluate every submission with at most `concurrency` in flight.
///
/// Entries come back in input order regardless of completion order.
async fn moderate_all<C>(
    submissions: Vec<(usize, String)>,
    decider: Arc<ModerationDecider<C>>,
    concurrency: usize,
) -> Result<Vec<BatchEntry>>
where
    C: TextClassifier + Send + Sync + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for (line, text) in submissions {
        let decider = Arc::clone(&decider);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| CliError::Task(e.to_string()))?;

            let result = decider.evaluate(&text).await;
            debug!(line, ok = result.is_ok(), "Batch line evaluated");

            Ok::<_, CliError>(BatchEntry { line, text, result })
        });
    }

    let mut entries = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let entry = joined.map_err(|e| CliError::Task(e.to_string()))??;
        entries.push(entry);
    }

    entries.sort_by_key(|entry| entry.line);
    Ok(entries)
}

/// Any failure outranks any rejection.
fn batch_outcome(entries: &[BatchEntry]) -> Outcome {
    if entries.iter().any(|entry| entry.result.is_err()) {
        Outcome::Incomplete
    } else if entries
        .iter()
        .any(|entry| matches!(entry.result, Ok(ModerationVerdict::Rejected { .. })))
    {
        Outcome::Rejected
    } else {
        Outcome::Allowed
    }
}
