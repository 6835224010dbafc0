/// Mock insight generator for testing and demos
///
/// Returns a configured payload (or failure) deterministically and counts
/// how often it was invoked. The call counter is what lets tests assert the
/// cache contract: when an insight row already exists, the generator must
/// never be called.
///
/// # Example
///
/// ```
/// use careerpath_shared::insights::{InsightGenerator, MockInsightGenerator};
/// use careerpath_shared::models::industry_insight::InsightPayload;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let generator = MockInsightGenerator::with_payload(InsightPayload {
///     growth_rate: Some(4.2),
///     ..Default::default()
/// });
///
/// let payload = generator.generate("Fintech").await?;
/// assert_eq!(payload.growth_rate, Some(4.2));
/// assert_eq!(generator.calls(), 1);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{GeneratorError, InsightGenerator};
use crate::models::industry_insight::InsightPayload;

/// In-process generator with programmable behavior
pub struct MockInsightGenerator {
    payload: InsightPayload,
    failure: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockInsightGenerator {
    /// Creates a mock that returns the given payload on every call
    pub fn with_payload(payload: InsightPayload) -> Self {
        Self {
            payload,
            failure: None,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a mock that fails every call with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            payload: InsightPayload::default(),
            failure: Some(message.into()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Adds an artificial delay before each response
    ///
    /// Useful for exercising the transaction timeout path.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `generate` has been called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockInsightGenerator {
    fn default() -> Self {
        Self::with_payload(InsightPayload::default())
    }
}

#[async_trait]
impl InsightGenerator for MockInsightGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, _industry: &str) -> Result<InsightPayload, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.failure {
            Some(message) => Err(GeneratorError::Failed(message.clone())),
            None => Ok(self.payload.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_configured_payload() {
        let generator = MockInsightGenerator::with_payload(InsightPayload {
            growth_rate: Some(1.5),
            top_skills: vec!["SQL".to_string()],
            ..Default::default()
        });

        let payload = generator.generate("Fintech").await.unwrap();
        assert_eq!(payload.growth_rate, Some(1.5));
        assert_eq!(payload.top_skills, vec!["SQL"]);
    }

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let generator = MockInsightGenerator::default();
        assert_eq!(generator.calls(), 0);

        generator.generate("a").await.unwrap();
        generator.generate("b").await.unwrap();
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let generator = MockInsightGenerator::failing("model unavailable");
        let err = generator.generate("Fintech").await.unwrap_err();
        assert!(matches!(err, GeneratorError::Failed(_)));
        assert_eq!(generator.calls(), 1);
    }
}
