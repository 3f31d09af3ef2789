//! Trait definitions for external interactions
//!
//! These traits define the boundary between the moderation decision and the
//! hosted classifier. Implementations live in `safeguard-safety`.

use crate::CategoryScore;
use std::future::Future;

/// Diagnostic details a classifier failure can carry
///
/// The decider copies these into its own error so callers can report the
/// service's code without knowing the concrete classifier type.
pub trait ClassifierFailure: std::error::Error {
    /// Machine-readable code supplied by the service, if any
    fn code(&self) -> Option<&str> {
        None
    }

    /// Human-readable message supplied by the service
    fn message(&self) -> String {
        self.to_string()
    }
}

/// Trait for text classification operations
///
/// Implemented by the infrastructure layer (safeguard-safety)
pub trait TextClassifier {
    /// Error type for classification calls
    type Error: ClassifierFailure + Send + Sync + 'static;

    /// Score `text` for every category the classifier supports
    ///
    /// Returns the raw, unordered category list from the service. Checking
    /// that every required category is present is the caller's job.
    fn analyze_text(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<CategoryScore>, Self::Error>> + Send;
}
