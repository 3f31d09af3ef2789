//! Moderation verdicts

use std::fmt;

/// Final accept/reject decision for one submission
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModerationVerdict {
    /// No violation detected, the submission may be published
    Allowed,

    /// A violation was detected. `reason` is shown to the submitter and the
    /// content must not be kept.
    Rejected {
        /// Human-readable message naming the category and its severity
        reason: String,
    },
}

impl ModerationVerdict {
    /// Create a rejection
    pub fn rejected(reason: impl Into<String>) -> Self {
        ModerationVerdict::Rejected {
            reason: reason.into(),
        }
    }

    /// Whether the submission passed moderation
    pub fn is_allowed(&self) -> bool {
        matches!(self, ModerationVerdict::Allowed)
    }

    /// Rejection reason, if rejected
    pub fn reason(&self) -> Option<&str> {
        match self {
            ModerationVerdict::Allowed => None,
            ModerationVerdict::Rejected { reason } => Some(reason),
        }
    }
}

impl fmt::Display for ModerationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModerationVerdict::Allowed => f.write_str("allowed"),
            ModerationVerdict::Rejected { reason } => write!(f, "rejected: {}", reason),
        }
    }
}
