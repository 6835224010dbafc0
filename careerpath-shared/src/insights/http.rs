/// HTTP client for the remote insight generation service
///
/// Sends `POST {base_url}/insights` with `{"industry": "<label>"}` and
/// expects an [`InsightPayload`] JSON body back. The payload type rejects
/// unknown fields, so contract drift on the generator side surfaces as a
/// malformed-payload error instead of being silently persisted.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{GeneratorError, InsightGenerator};
use crate::models::industry_insight::InsightPayload;

/// Request timeout for one generation call
///
/// Generation is slow (it is an LLM call upstream), but must stay well under
/// the profile transaction budget that awaits it.
const GENERATION_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    industry: &'a str,
}

/// Insight generator backed by a remote HTTP service
pub struct HttpInsightGenerator {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpInsightGenerator {
    /// Creates a new HTTP generator client
    ///
    /// The timeout is applied per request, so it holds even if the client
    /// builder fails and the default client is used instead.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the generation service (no trailing slash)
    /// * `api_key` - Optional bearer token for the service
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(GENERATION_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build insight generator client, using default client");
                reqwest::Client::new()
            });

        Self {
            client,
            base_url: base_url.into(),
            api_key,
            timeout: GENERATION_TIMEOUT,
        }
    }
}

#[async_trait]
impl InsightGenerator for HttpInsightGenerator {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(&self, industry: &str) -> Result<InsightPayload, GeneratorError> {
        let url = format!("{}/insights", self.base_url);
        debug!(industry, url = %url, "Requesting insight generation");

        let mut request = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&GenerateRequest { industry });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(industry, status = status.as_u16(), "Insight generator returned failure status");
            return Err(GeneratorError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let payload: InsightPayload = serde_json::from_str(&body).map_err(|e| {
            warn!(industry, error = %e, "Insight generator returned malformed payload");
            GeneratorError::MalformedPayload(e.to_string())
        })?;

        debug!(industry, "Insight generation succeeded");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_name() {
        let generator = HttpInsightGenerator::new("https://insights.internal", None);
        assert_eq!(generator.name(), "http");
    }

    #[test]
    fn test_base_url_is_kept_verbatim() {
        let generator =
            HttpInsightGenerator::new("https://insights.internal", Some("key".to_string()));
        assert_eq!(generator.base_url, "https://insights.internal");
        assert_eq!(generator.api_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_new_carries_the_generation_timeout() {
        let generator = HttpInsightGenerator::new("https://insights.internal", None);
        assert_eq!(generator.timeout, GENERATION_TIMEOUT);
    }

    #[tokio::test]
    async fn test_request_times_out_against_a_stalled_service() {
        // A listener that accepts connections but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    break;
                };
                // Hold the connection open without responding.
                tokio::spawn(async move {
                    let _socket = socket;
                    tokio::time::sleep(Duration::from_secs(60)).await;
                });
            }
        });

        let mut generator = HttpInsightGenerator::new(format!("http://{addr}"), None);
        generator.timeout = Duration::from_millis(200);

        let started = std::time::Instant::now();
        let err = generator.generate("Fintech").await.unwrap_err();

        assert!(matches!(err, GeneratorError::Request(_)));
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "request must fail within the configured budget, took {:?}",
            started.elapsed()
        );
    }
}
