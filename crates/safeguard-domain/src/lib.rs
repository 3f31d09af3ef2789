//! Safeguard Domain Layer
//!
//! This crate contains the moderation domain model for Safeguard. It has ZERO
//! external dependencies and defines the value objects and trait interfaces
//! that the classifier and decision layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Category**: One of the four moderation dimensions (hate, self-harm, sexual, violence)
//! - **Severity**: Integer score from the external classifier, 0 means nothing detected
//! - **ClassificationResult**: Exactly one severity per required category
//! - **ModerationVerdict**: Allowed, or rejected with a reason for the submitter
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure decision inputs and outputs only
//! - Classifier implementations live in `safeguard-safety`
//! - The decider lives in `safeguard-moderator`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod classification;
pub mod severity;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use category::Category;
pub use classification::{ClassificationResult, MissingCategory};
pub use severity::{CategoryScore, Severity};
pub use verdict::ModerationVerdict;
