/// Insight generator capability
///
/// This module defines the contract for the external AI content generator
/// that produces industry insight payloads. The generator is consumed, never
/// implemented, by this system: the core only needs "given an industry
/// label, return a structured payload, possibly slowly, possibly failing".
///
/// # Implementations
///
/// - [`HttpInsightGenerator`]: calls a remote generation service over HTTP
/// - [`MockInsightGenerator`]: deterministic in-process generator for tests
///
/// # Example
///
/// ```no_run
/// use careerpath_shared::insights::{HttpInsightGenerator, InsightGenerator};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let generator = HttpInsightGenerator::new("https://insights.internal", None);
/// let payload = generator.generate("Fintech").await?;
/// println!("growth rate: {:?}", payload.growth_rate);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;

use crate::models::industry_insight::InsightPayload;

pub mod http;
pub mod mock;

pub use http::HttpInsightGenerator;
pub use mock::MockInsightGenerator;

/// Insight generator error types
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Transport-level failure talking to the generation service
    #[error("Insight generator request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The generation service answered with a non-success status
    #[error("Insight generator returned status {status}")]
    UpstreamStatus {
        /// HTTP status code from the upstream service
        status: u16,
    },

    /// The generation service answered with data we refuse to store
    #[error("Insight generator returned malformed payload: {0}")]
    MalformedPayload(String),

    /// Generation failed for a reason the generator reported itself
    #[error("Insight generation failed: {0}")]
    Failed(String),
}

/// Contract for industry insight generation
///
/// Implementations must be safe to share across request handlers; the
/// profile service holds one behind an `Arc<dyn InsightGenerator>`.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    /// Human-readable name of the generator (for logging)
    fn name(&self) -> &str;

    /// Generates an insight payload for the given industry label
    ///
    /// # Errors
    ///
    /// Returns a [`GeneratorError`] on transport failure, upstream failure,
    /// or a payload that does not match the known contract.
    async fn generate(&self, industry: &str) -> Result<InsightPayload, GeneratorError>;
}
