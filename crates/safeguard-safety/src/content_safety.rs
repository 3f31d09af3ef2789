//! Content-safety text analysis client
//!
//! Calls the hosted text-analyze operation and returns the per-category
//! severities it reports.
//!
//! # Features
//!
//! - Async HTTP communication with the service
//! - Explicit configuration, no process-wide client
//! - Optional retries with exponential backoff for transient failures
//! - Service error codes preserved for the caller
//!
//! # Examples
//!
//! ```no_run
//! use safeguard_safety::{ContentSafetyClient, ContentSafetyConfig};
//!
//! # fn example() -> Result<(), safeguard_safety::SafetyError> {
//! let config = ContentSafetyConfig::new("https://my-resource.cognitiveservices.azure.com", "key");
//! let client = ContentSafetyClient::new(config)?;
//! # Ok(())
//! # }
//! ```

use crate::config::{ContentSafetyConfig, OutputType};
use crate::SafetyError;
use safeguard_domain::traits::TextClassifier;
use safeguard_domain::{Category, CategoryScore};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Header carrying the subscription key
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Path of the text analysis operation
const ANALYZE_TEXT_PATH: &str = "/contentsafety/text:analyze";

/// Default delay before the first retry
const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Client for the hosted content-safety text analysis API
pub struct ContentSafetyClient {
    config: ContentSafetyConfig,
    client: reqwest::Client,
    backoff_base: Duration,
}

/// Request body for the text analysis operation
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeTextRequest<'a> {
    text: &'a str,
    categories: [&'static str; 4],
    output_type: OutputType,
}

/// Response body of the text analysis operation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeTextResponse {
    #[serde(default)]
    categories_analysis: Vec<CategoryAnalysis>,
}

#[derive(Deserialize)]
struct CategoryAnalysis {
    category: String,
    #[serde(default)]
    severity: Option<u8>,
}

/// Error envelope returned with non-success statuses
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ContentSafetyClient {
    /// Create a client from an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns [`SafetyError::Config`] if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: ContentSafetyConfig) -> Result<Self, SafetyError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SafetyError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            backoff_base: DEFAULT_BACKOFF_BASE,
        })
    }

    /// Create a client from `CONTENT_SAFETY_*` environment variables
    pub fn from_env() -> Result<Self, SafetyError> {
        Self::new(ContentSafetyConfig::from_env()?)
    }

    /// Set the delay before the first retry (doubles on each further retry)
    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &ContentSafetyConfig {
        &self.config
    }

    /// Analyze text for the four required categories
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The service is unreachable or times out
    /// - The service rejects the request (auth, quota, malformed input)
    /// - The response body cannot be decoded
    pub async fn analyze(&self, text: &str) -> Result<Vec<CategoryScore>, SafetyError> {
        let url = format!(
            "{}{}",
            self.config.endpoint.trim_end_matches('/'),
            ANALYZE_TEXT_PATH
        );

        let request_body = AnalyzeTextRequest {
            text,
            categories: Category::PRIORITY.map(|c| c.as_str()),
            output_type: self.config.output_type,
        };

        let mut attempt = 1;
        loop {
            debug!(attempt, text_len = text.len(), "Sending text analysis request");

            match self.send(&url, &request_body).await {
                Ok(scores) => return Ok(scores),
                Err(e) if e.is_retryable() && attempt < self.config.max_attempts => {
                    let delay = backoff_delay(self.backoff_base, attempt);
                    warn!(attempt, error = %e, "Text analysis failed, retrying in {:?}", delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send(
        &self,
        url: &str,
        request_body: &AnalyzeTextRequest<'_>,
    ) -> Result<Vec<CategoryScore>, SafetyError> {
        let response = self
            .client
            .post(url)
            .query(&[("api-version", self.config.api_version.as_str())])
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.api_key)
            .json(request_body)
            .send()
            .await
            .map_err(|e| SafetyError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(service_error(status.as_u16(), &body));
        }

        let parsed = response
            .json::<AnalyzeTextResponse>()
            .await
            .map_err(|e| SafetyError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(into_scores(parsed))
    }
}

impl TextClassifier for ContentSafetyClient {
    type Error = SafetyError;

    async fn analyze_text(&self, text: &str) -> Result<Vec<CategoryScore>, Self::Error> {
        self.analyze(text).await
    }
}

/// Build a service error from a non-success response body
/// Exponential backoff: base, 2x base, 4x base, etc. Saturates instead of
/// overflowing.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
}

fn service_error(status: u16, body: &str) -> SafetyError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => SafetyError::Service {
            status,
            code: envelope.error.code,
            message: envelope
                .error
                .message
                .unwrap_or_else(|| "Unknown error".to_string()),
        },
        Err(_) => SafetyError::Service {
            status,
            code: None,
            message: if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            },
        },
    }
}

/// Keep the entries that name a known category and carry a severity
///
/// Entries without a severity are dropped so the decider reports the
/// category as missing instead of treating it as zero.
fn into_scores(response: AnalyzeTextResponse) -> Vec<CategoryScore> {
    response
        .categories_analysis
        .into_iter()
        .filter_map(|entry| {
            let Some(category) = Category::parse(&entry.category) else {
                debug!(category = %entry.category, "Skipping unknown category");
                return None;
            };
            entry
                .severity
                .map(|severity| CategoryScore::new(category, severity))
        })
        .collect()
}
