//! Category module - the moderation dimensions a submission is scored on

use std::fmt;

/// Moderation category reported by the text classifier
///
/// The declaration order is the rejection priority: when several categories
/// are flagged at once, only the first one in this order is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Hateful content targeting identity groups
    Hate,

    /// Content describing or encouraging self-harm
    SelfHarm,

    /// Sexual content
    Sexual,

    /// Violent content
    Violence,
}

impl Category {
    /// All required categories, highest rejection priority first
    pub const PRIORITY: [Category; 4] = [
        Category::Hate,
        Category::SelfHarm,
        Category::Sexual,
        Category::Violence,
    ];

    /// Name used by the content-safety service on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hate => "Hate",
            Category::SelfHarm => "SelfHarm",
            Category::Sexual => "Sexual",
            Category::Violence => "Violence",
        }
    }

    /// Parse a category name (case-insensitive)
    ///
    /// Accepts the wire names plus the `self-harm` / `self_harm` spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hate" => Some(Category::Hate),
            "selfharm" | "self-harm" | "self_harm" => Some(Category::SelfHarm),
            "sexual" => Some(Category::Sexual),
            "violence" => Some(Category::Violence),
            _ => None,
        }
    }

    /// Adjective describing flagged content, as used in rejection messages
    pub fn content_description(&self) -> &'static str {
        match self {
            Category::Hate => "hateful",
            Category::SelfHarm => "self-harm",
            Category::Sexual => "sexual",
            Category::Violence => "violent",
        }
    }

    /// Label preceding the severity in rejection messages
    pub fn severity_label(&self) -> &'static str {
        match self {
            Category::Hate => "Hate",
            Category::SelfHarm => "Self harm",
            Category::Sexual => "Sexual",
            Category::Violence => "Violence",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_matches_declaration_order() {
        let mut sorted = Category::PRIORITY;
        sorted.sort();
        assert_eq!(sorted, Category::PRIORITY);
        assert_eq!(Category::PRIORITY[0], Category::Hate);
        assert_eq!(Category::PRIORITY[3], Category::Violence);
    }

    #[test]
    fn test_parse_wire_names() {
        for category in Category::PRIORITY {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_parse_alternate_spellings() {
        assert_eq!(Category::parse("self-harm"), Some(Category::SelfHarm));
        assert_eq!(Category::parse("SELF_HARM"), Some(Category::SelfHarm));
        assert_eq!(Category::parse("violence"), Some(Category::Violence));
        assert_eq!(Category::parse("Jailbreak"), None);
    }

    #[test]
    fn test_from_str_error() {
        let err = "profanity".parse::<Category>().unwrap_err();
        assert!(err.contains("profanity"));
    }
}
