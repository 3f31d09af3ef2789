//! Safeguard Moderator
//!
//! Turns raw text submissions into moderation verdicts.
//!
//! The moderator provides:
//! - One classifier call per submission
//! - Extraction of the four required category scores
//! - A fixed-priority threshold check (hate, self-harm, sexual, violence)
//! - A detailed variant reporting every flagged category
//!
//! # Examples
//!
//! ```
//! use safeguard_moderator::ModerationDecider;
//! use safeguard_safety::MockClassifier;
//!
//! # async fn example() -> Result<(), safeguard_moderator::ModerationError> {
//! let decider = ModerationDecider::new(MockClassifier::with_severities(2, 0, 0, 0));
//!
//! let verdict = decider.evaluate("I hate everyone").await?;
//! assert_eq!(
//!     verdict.reason(),
//!     Some("Your submission contains hateful content, which violates our community guidelines. Hate severity: 2.")
//! );
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod decider;
mod error;

pub use decider::{decide, rejection_reason, ModerationDecider, ModerationReport};
pub use error::ModerationError;
