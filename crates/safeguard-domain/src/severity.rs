//! Severity scores produced by the external classifier

use crate::Category;
use std::fmt;

/// Severity of a detected content-policy violation
///
/// The scale is bounded by the classifier (0-7 for the hosted service,
/// or 0/2/4/6 in its four-level output mode). Zero means nothing detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Severity(u8);

impl Severity {
    /// No violation detected
    pub const NONE: Severity = Severity(0);

    /// Wrap a raw classifier score
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Raw score value
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Whether this score flags the content
    pub const fn is_violation(&self) -> bool {
        self.0 > 0
    }
}

impl From<u8> for Severity {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One category's severity from a single classification call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryScore {
    /// Category that was scored
    pub category: Category,

    /// Severity reported for that category
    pub severity: Severity,
}

impl CategoryScore {
    /// Create a new score
    pub fn new(category: Category, severity: impl Into<Severity>) -> Self {
        Self {
            category,
            severity: severity.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_not_a_violation() {
        assert!(!Severity::NONE.is_violation());
        assert!(!Severity::default().is_violation());
        assert!(Severity::new(1).is_violation());
        assert!(Severity::new(7).is_violation());
    }

    #[test]
    fn test_display_is_bare_integer() {
        assert_eq!(Severity::new(4).to_string(), "4");
    }
}
