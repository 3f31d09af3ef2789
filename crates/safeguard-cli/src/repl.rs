//! Interactive comment board.
//!
//! Every line typed is a submission. Allowed submissions are posted to the
//! board for the rest of the session; rejected ones are shown the reason and
//! discarded.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use safeguard_domain::traits::TextClassifier;
use safeguard_domain::ModerationVerdict;
use safeguard_moderator::ModerationDecider;
use std::path::PathBuf;

/// Run the interactive comment board.
pub async fn run_repl<C>(
    decider: &ModerationDecider<C>,
    config: &Config,
    formatter: &Formatter,
) -> Result<()>
where
    C: TextClassifier,
{
    println!(
        "{}",
        formatter.info("Safeguard comment board - type a comment to post it, ':help' for commands")
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut board = Board::default();

    loop {
        match editor.readline("comment> ") {
            Ok(line) => {
                let Some(input) = parse_repl_line(&line) else {
                    continue;
                };

                // Submissions are recorded only once allowed
                if !matches!(input, ReplInput::Submit(_)) {
                    editor.add_history_entry(line.trim()).ok();
                }

                match input {
                    ReplInput::Quit => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    ReplInput::Help => print_help(formatter),
                    ReplInput::List => println!("{}", board.render(formatter)),
                    ReplInput::Unknown(command) => {
                        eprintln!(
                            "{}",
                            formatter.error(&format!(
                                "Unknown command: {}. Type ':help' for available commands.",
                                command
                            ))
                        );
                    }
                    ReplInput::Submit(text) => match board
                        .submit_and_record(decider, &text, |posted| {
                            editor.add_history_entry(posted).ok();
                        })
                        .await
                    {
                        Ok(ModerationVerdict::Allowed) => {
                            println!("{}", formatter.success("Comment posted"));
                        }
                        Ok(ModerationVerdict::Rejected { reason }) => {
                            println!("{}", formatter.error(&reason));
                        }
                        Err(e) => {
                            eprintln!("{}", formatter.warning(&format!("Comment not posted. {}", e)));
                        }
                    },
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use ':quit' to exit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// One line of REPL input.
#[derive(Debug, PartialEq, Eq)]
enum ReplInput {
    Quit,
    Help,
    List,
    Unknown(String),
    Submit(String),
}

/// Parse a line; blank lines yield `None`.
fn parse_repl_line(line: &str) -> Option<ReplInput> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let input = match trimmed {
        ":quit" | ":q" | ":exit" => ReplInput::Quit,
        ":help" | ":?" => ReplInput::Help,
        ":list" | ":ls" => ReplInput::List,
        command if command.starts_with(':') => ReplInput::Unknown(command.to_string()),
        text => ReplInput::Submit(text.to_string()),
    };
    Some(input)
}

/// Comments posted during this session.
#[derive(Debug, Default)]
struct Board {
    posts: Vec<String>,
}

impl Board {
    /// Moderate `text` and post it if allowed.
    async fn submit<C>(
        &mut self,
        decider: &ModerationDecider<C>,
        text: &str,
    ) -> Result<ModerationVerdict>
    where
        C: TextClassifier,
    {
        let verdict = decider.evaluate(text).await?;
        if verdict.is_allowed() {
            self.posts.push(text.to_string());
        }
        Ok(verdict)
    }

    /// Like [`submit`](Self::submit), handing the text to `record` only when
    /// it was allowed. Rejected or unmoderated text never reaches `record`.
    async fn submit_and_record<C, F>(
        &mut self,
        decider: &ModerationDecider<C>,
        text: &str,
        mut record: F,
    ) -> Result<ModerationVerdict>
    where
        C: TextClassifier,
        F: FnMut(&str),
    {
        let verdict = self.submit(decider, text).await?;
        if verdict.is_allowed() {
            record(text);
        }
        Ok(verdict)
    }

    fn render(&self, formatter: &Formatter) -> String {
        if self.posts.is_empty() {
            return formatter.info("No comments yet");
        }

        self.posts
            .iter()
            .enumerate()
            .map(|(i, post)| format!("{:>3}. {}", i + 1, post))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!(
        "Failed to initialize editor: {}",
        e
    )))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::home_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <text>          - Submit a comment for moderation");
    println!("  :list           - Show posted comments");
    println!("  :help, :?       - Show this help");
    println!("  :quit, :q       - Exit");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use safeguard_safety::MockClassifier;

    #[test]
    fn test_parse_repl_line() {
        assert_eq!(parse_repl_line("   "), None);
        assert_eq!(parse_repl_line(":quit"), Some(ReplInput::Quit));
        assert_eq!(parse_repl_line(" :help "), Some(ReplInput::Help));
        assert_eq!(parse_repl_line(":list"), Some(ReplInput::List));
        assert_eq!(
            parse_repl_line(":frobnicate"),
            Some(ReplInput::Unknown(":frobnicate".to_string()))
        );
        assert_eq!(
            parse_repl_line("  nice post  "),
            Some(ReplInput::Submit("nice post".to_string()))
        );
    }

    #[tokio::test]
    async fn test_board_posts_only_allowed_comments() {
        let mut classifier = MockClassifier::clean();
        classifier.add_severities("you are awful", 3, 0, 0, 0);
        classifier.add_error("timeout");
        let decider = ModerationDecider::new(classifier);
        let mut board = Board::default();

        assert!(board.submit(&decider, "great photo").await.unwrap().is_allowed());

        let verdict = board.submit(&decider, "you are awful").await.unwrap();
        assert!(verdict.reason().unwrap().contains("Hate severity: 3."));

        assert!(board.submit(&decider, "timeout").await.is_err());

        assert_eq!(board.posts, vec!["great photo".to_string()]);
    }

    #[tokio::test]
    async fn test_only_allowed_comments_are_recorded() {
        let mut classifier = MockClassifier::clean();
        classifier.add_severities("you are awful", 3, 0, 0, 0);
        classifier.add_error("timeout");
        let decider = ModerationDecider::new(classifier);
        let mut board = Board::default();
        let mut history: Vec<String> = Vec::new();

        for text in ["you are awful", "timeout", "great photo"] {
            let _ = board
                .submit_and_record(&decider, text, |posted| history.push(posted.to_string()))
                .await;
        }

        assert_eq!(history, vec!["great photo".to_string()]);
        assert_eq!(board.posts, history);
    }

    #[test]
    fn test_board_render() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut board = Board::default();
        assert!(board.render(&formatter).contains("No comments yet"));

        board.posts.push("first".to_string());
        board.posts.push("second".to_string());
        assert_eq!(board.render(&formatter), "  1. first\n  2. second");
    }
}
