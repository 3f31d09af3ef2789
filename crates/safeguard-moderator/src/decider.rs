//! Moderation decision logic

use crate::ModerationError;
use safeguard_domain::traits::TextClassifier;
use safeguard_domain::{Category, CategoryScore, ClassificationResult, ModerationVerdict};
use tracing::debug;

/// Full outcome of a detailed evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationReport {
    /// Same verdict [`ModerationDecider::evaluate`] returns for this input
    pub verdict: ModerationVerdict,

    /// Every category score from the classifier
    pub classification: ClassificationResult,

    /// Every flagged category, highest priority first
    pub violations: Vec<CategoryScore>,
}

/// The ModerationDecider turns submissions into verdicts
///
/// Owns its classifier. Construct once and reuse; evaluations share no
/// mutable state, so one decider can serve concurrent callers behind an `Arc`.
pub struct ModerationDecider<C> {
    classifier: C,
}

impl<C> ModerationDecider<C>
where
    C: TextClassifier,
{
    /// Create a new decider around a classifier
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Classifier this decider calls
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Release the classifier
    pub fn into_inner(self) -> C {
        self.classifier
    }

    /// Evaluate a submission
    ///
    /// Makes exactly one classifier call. When several categories are flagged
    /// only the highest-priority one is reported (hate, self-harm, sexual,
    /// violence); use [`evaluate_detailed`](Self::evaluate_detailed) for all
    /// of them.
    ///
    /// # Errors
    ///
    /// - [`ModerationError::ClassifierUnavailable`] if the classifier call fails
    /// - [`ModerationError::MissingCategory`] if the response omits a required category
    pub async fn evaluate(&self, text: &str) -> Result<ModerationVerdict, ModerationError> {
        let classification = self.classify(text).await?;
        let verdict = decide(&classification);

        debug!(allowed = verdict.is_allowed(), "Moderation verdict");
        Ok(verdict)
    }

    /// Evaluate a submission and report every category score
    ///
    /// The verdict is identical to what [`evaluate`](Self::evaluate) returns.
    pub async fn evaluate_detailed(&self, text: &str) -> Result<ModerationReport, ModerationError> {
        let classification = self.classify(text).await?;
        let verdict = decide(&classification);
        let violations = classification.violations();

        debug!(
            allowed = verdict.is_allowed(),
            flagged = violations.len(),
            "Moderation verdict"
        );

        Ok(ModerationReport {
            verdict,
            classification,
            violations,
        })
    }

    async fn classify(&self, text: &str) -> Result<ClassificationResult, ModerationError> {
        debug!(text_len = text.len(), "Evaluating submission");

        let scores = self
            .classifier
            .analyze_text(text)
            .await
            .map_err(ModerationError::classifier)?;

        Ok(ClassificationResult::from_scores(scores)?)
    }
}

/// Apply the fixed-priority threshold check to a classification
///
/// Pure and deterministic: the first category in [`Category::PRIORITY`] with
/// a non-zero severity rejects the submission.
pub fn decide(classification: &ClassificationResult) -> ModerationVerdict {
    Category::PRIORITY
        .into_iter()
        .map(|category| CategoryScore::new(category, classification.severity(category)))
        .find(|score| score.severity.is_violation())
        .map(|score| ModerationVerdict::rejected(rejection_reason(score)))
        .unwrap_or(ModerationVerdict::Allowed)
}

/// Message shown to the submitter for a flagged category
pub fn rejection_reason(score: CategoryScore) -> String {
    format!(
        "Your submission contains {} content, which violates our community guidelines. {} severity: {}.",
        score.category.content_description(),
        score.category.severity_label(),
        score.severity
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Deciding the same classification twice gives the same verdict
        #[test]
        fn test_decide_is_idempotent(severities in proptest::array::uniform4(0u8..=7)) {
            let classification = ClassificationResult::new(
                severities[0], severities[1], severities[2], severities[3],
            );
            prop_assert_eq!(decide(&classification), decide(&classification));
        }

        /// Property: Allowed exactly when every severity is zero
        #[test]
        fn test_allowed_iff_clean(severities in proptest::array::uniform4(0u8..=7)) {
            let classification = ClassificationResult::new(
                severities[0], severities[1], severities[2], severities[3],
            );
            prop_assert_eq!(decide(&classification).is_allowed(), classification.is_clean());
        }

        /// Property: A rejection always names the first flagged category
        #[test]
        fn test_rejection_names_first_violation(severities in proptest::array::uniform4(0u8..=7)) {
            let classification = ClassificationResult::new(
                severities[0], severities[1], severities[2], severities[3],
            );
            let verdict = decide(&classification);

            if let Some(first) = classification.violations().first() {
                let expected = rejection_reason(*first);
                prop_assert_eq!(verdict.reason(), Some(expected.as_str()));
            }
        }
    }
}
