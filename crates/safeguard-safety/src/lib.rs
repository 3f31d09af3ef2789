//! Safeguard Classifier Layer
//!
//! Text classifier implementations of the `TextClassifier` trait from
//! `safeguard-domain`.
//!
//! # Classifiers
//!
//! - `MockClassifier`: Deterministic in-process classifier for testing
//! - `ContentSafetyClient`: Hosted content-safety text analysis API
//!
//! # Examples
//!
//! ```
//! use safeguard_domain::traits::TextClassifier;
//! use safeguard_domain::{Category, ClassificationResult};
//! use safeguard_safety::MockClassifier;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = MockClassifier::with_severities(2, 0, 0, 0);
//! let scores = classifier.analyze_text("I hate everyone").await?;
//! let result = ClassificationResult::from_scores(scores)?;
//! assert_eq!(result.severity(Category::Hate).value(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod content_safety;

use safeguard_domain::traits::{ClassifierFailure, TextClassifier};
use safeguard_domain::{Category, CategoryScore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use config::{ContentSafetyConfig, OutputType};
pub use content_safety::ContentSafetyClient;

/// Errors that can occur while calling a classifier
#[derive(Error, Debug)]
pub enum SafetyError {
    /// Network or transport failure before a response was received
    #[error("Communication error: {0}")]
    Communication(String),

    /// The service answered with an error status
    #[error("Service error (HTTP {status}): {message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Machine-readable error code from the service, if any
        code: Option<String>,
        /// Error message from the service
        message: String,
    },

    /// The service answered successfully but the body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SafetyError {
    /// Whether the transport may retry the request
    ///
    /// Connection failures, throttling (429) and server errors (5xx) are
    /// transient. Everything else fails the same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            SafetyError::Communication(_) => true,
            SafetyError::Service { status, .. } => *status == 429 || *status >= 500,
            SafetyError::InvalidResponse(_) | SafetyError::Config(_) => false,
        }
    }
}

impl ClassifierFailure for SafetyError {
    fn code(&self) -> Option<&str> {
        match self {
            SafetyError::Service { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    fn message(&self) -> String {
        match self {
            SafetyError::Service { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
enum MockResponse {
    Scores(Vec<CategoryScore>),
    Communication,
    Service {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

/// Mock classifier for deterministic testing
///
/// Returns pre-configured category scores without making any network calls.
///
/// # Examples
///
/// ```
/// use safeguard_safety::MockClassifier;
/// use safeguard_domain::{Category, CategoryScore};
///
/// // Every submission scores zero
/// let classifier = MockClassifier::clean();
///
/// // Specific submissions get specific scores
/// let mut classifier = MockClassifier::default();
/// classifier.add_severities("go away", 0, 0, 0, 2);
/// classifier.add_response("partial", vec![CategoryScore::new(Category::Hate, 0)]);
/// classifier.add_error("unreachable");
/// ```
#[derive(Debug, Clone)]
pub struct MockClassifier {
    default_scores: Vec<CategoryScore>,
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockClassifier {
    /// Create a mock that returns `scores` for every submission
    pub fn new(scores: Vec<CategoryScore>) -> Self {
        Self {
            default_scores: scores,
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that scores every submission zero in all categories
    pub fn clean() -> Self {
        Self::with_severities(0, 0, 0, 0)
    }

    /// Create a mock that returns the given severities for every submission
    pub fn with_severities(hate: u8, self_harm: u8, sexual: u8, violence: u8) -> Self {
        Self::new(full_scores(hate, self_harm, sexual, violence))
    }

    /// Return `scores` verbatim when `text` is submitted
    pub fn add_response(&mut self, text: impl Into<String>, scores: Vec<CategoryScore>) {
        self.insert(text.into(), MockResponse::Scores(scores));
    }

    /// Return a full score set with the given severities when `text` is submitted
    pub fn add_severities(
        &mut self,
        text: impl Into<String>,
        hate: u8,
        self_harm: u8,
        sexual: u8,
        violence: u8,
    ) {
        self.add_response(text, full_scores(hate, self_harm, sexual, violence));
    }

    /// Fail with a communication error when `text` is submitted
    pub fn add_error(&mut self, text: impl Into<String>) {
        self.insert(text.into(), MockResponse::Communication);
    }

    /// Fail with a service error when `text` is submitted
    pub fn add_service_error(
        &mut self,
        text: impl Into<String>,
        status: u16,
        code: Option<&str>,
        message: impl Into<String>,
    ) {
        self.insert(
            text.into(),
            MockResponse::Service {
                status,
                code: code.map(str::to_string),
                message: message.into(),
            },
        );
    }

    /// Get the number of times the classifier was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    fn insert(&mut self, text: String, response: MockResponse) {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(text, response);
    }

    fn respond(&self, text: &str) -> Result<Vec<CategoryScore>, SafetyError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let responses = self
            .responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match responses.get(text) {
            None => Ok(self.default_scores.clone()),
            Some(MockResponse::Scores(scores)) => Ok(scores.clone()),
            Some(MockResponse::Communication) => {
                Err(SafetyError::Communication("Mock transport failure".to_string()))
            }
            Some(MockResponse::Service {
                status,
                code,
                message,
            }) => Err(SafetyError::Service {
                status: *status,
                code: code.clone(),
                message: message.clone(),
            }),
        }
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::clean()
    }
}

impl TextClassifier for MockClassifier {
    type Error = SafetyError;

    async fn analyze_text(&self, text: &str) -> Result<Vec<CategoryScore>, Self::Error> {
        self.respond(text)
    }
}

fn full_scores(hate: u8, self_harm: u8, sexual: u8, violence: u8) -> Vec<CategoryScore> {
    vec![
        CategoryScore::new(Category::Hate, hate),
        CategoryScore::new(Category::SelfHarm, self_harm),
        CategoryScore::new(Category::Sexual, sexual),
        CategoryScore::new(Category::Violence, violence),
    ]
}
