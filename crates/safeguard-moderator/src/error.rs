//! Moderator error types

use safeguard_domain::traits::ClassifierFailure;
use safeguard_domain::{Category, MissingCategory};
use thiserror::Error;

/// Errors that can occur during a moderation evaluation
///
/// Neither variant means "allowed". A caller that gets an error must treat
/// the submission as not moderated and must not publish it.
#[derive(Error, Debug)]
pub enum ModerationError {
    /// The classifier call failed (network, auth, quota, malformed request)
    #[error("Classifier unavailable{}: {message}", format_code(.code))]
    ClassifierUnavailable {
        /// Machine-readable code supplied by the classifier, if any
        code: Option<String>,
        /// Human-readable message supplied by the classifier
        message: String,
        /// Underlying classifier error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The classifier response omitted a required category
    #[error("Classifier response is missing required category {0}")]
    MissingCategory(Category),
}

impl ModerationError {
    /// Wrap a classifier failure, capturing its diagnostic code and message
    pub fn classifier<E>(err: E) -> Self
    where
        E: ClassifierFailure + Send + Sync + 'static,
    {
        ModerationError::ClassifierUnavailable {
            code: err.code().map(str::to_string),
            message: err.message(),
            source: Box::new(err),
        }
    }

    /// Whether the classifier broke its response contract
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, ModerationError::MissingCategory(_))
    }
}

fn format_code(code: &Option<String>) -> String {
    code.as_deref()
        .map(|c| format!(" ({})", c))
        .unwrap_or_default()
}

impl From<MissingCategory> for ModerationError {
    fn from(err: MissingCategory) -> Self {
        ModerationError::MissingCategory(err.category)
    }
}
