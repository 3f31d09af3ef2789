//! Classification results - the full set of category scores for one submission

use crate::{Category, CategoryScore, Severity};
use std::fmt;

/// Severity for every required category from one classifier call
///
/// Holds exactly one score per category in [`Category::PRIORITY`]. A response
/// that omits a category cannot be turned into a `ClassificationResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassificationResult {
    severities: [Severity; 4],
}

/// The classifier response did not include a required category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingCategory {
    /// First absent category, in priority order
    pub category: Category,
}

impl fmt::Display for MissingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "classifier response is missing required category {}",
            self.category
        )
    }
}

impl std::error::Error for MissingCategory {}

impl ClassificationResult {
    /// Build a result from explicit severities
    pub fn new(
        hate: impl Into<Severity>,
        self_harm: impl Into<Severity>,
        sexual: impl Into<Severity>,
        violence: impl Into<Severity>,
    ) -> Self {
        Self {
            severities: [hate.into(), self_harm.into(), sexual.into(), violence.into()],
        }
    }

    /// Extract the required categories from an unordered classifier response
    ///
    /// When a category appears more than once, the first occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns [`MissingCategory`] naming the highest-priority category that
    /// the response does not contain.
    pub fn from_scores<I>(scores: I) -> Result<Self, MissingCategory>
    where
        I: IntoIterator<Item = CategoryScore>,
    {
        let mut found: [Option<Severity>; 4] = [None; 4];

        for score in scores {
            let slot = &mut found[score.category as usize];
            if slot.is_none() {
                *slot = Some(score.severity);
            }
        }

        let mut severities = [Severity::NONE; 4];
        for category in Category::PRIORITY {
            severities[category as usize] =
                found[category as usize].ok_or(MissingCategory { category })?;
        }

        Ok(Self { severities })
    }

    /// Severity reported for a category
    pub fn severity(&self, category: Category) -> Severity {
        self.severities[category as usize]
    }

    /// All scores, highest rejection priority first
    pub fn scores(&self) -> impl Iterator<Item = CategoryScore> + '_ {
        Category::PRIORITY
            .into_iter()
            .map(|category| CategoryScore::new(category, self.severity(category)))
    }

    /// Scores with a non-zero severity, highest rejection priority first
    pub fn violations(&self) -> Vec<CategoryScore> {
        self.scores().filter(|s| s.severity.is_violation()).collect()
    }

    /// Whether every category scored zero
    pub fn is_clean(&self) -> bool {
        self.severities.iter().all(|s| !s.is_violation())
    }
}
