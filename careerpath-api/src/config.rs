/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: *)
/// - `SESSION_JWT_SECRET`: Shared secret for identity-provider session tokens (required)
/// - `INSIGHT_GENERATOR_URL`: Base URL of the insight generation service (required)
/// - `INSIGHT_GENERATOR_API_KEY`: Optional bearer token for the generation service
/// - `PROFILE_TX_TIMEOUT_MS`: Profile transaction budget (default: 10000)
/// - `INSIGHT_RACE_POLICY`: `surface` or `retry` (default: surface)
/// - `RUST_LOG`: Log level (default: info)
///
/// # Example
///
/// ```no_run
/// use careerpath_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}:{}", config.api.host, config.api.port);
/// # Ok(())
/// # }
/// ```

use careerpath_shared::profile::RacePolicy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session token configuration
    pub session: SessionConfig,

    /// Insight generator configuration
    pub insights: InsightConfig,

    /// Profile service configuration
    pub profile: ProfileConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins ("*" = permissive, development only)
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Session token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Shared secret for validating identity-provider session tokens
    ///
    /// IMPORTANT: This must be kept secret and should be at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,
}

/// Insight generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Base URL of the insight generation service
    pub generator_url: String,

    /// Optional bearer token for the generation service
    pub generator_api_key: Option<String>,
}

/// Profile service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Wall-clock budget for the profile update transaction (milliseconds)
    pub tx_timeout_ms: u64,

    /// Behavior after a lost insight-creation race
    pub race_policy: RacePolicy,
}

impl ProfileConfig {
    /// Transaction budget as a Duration
    pub fn tx_timeout(&self) -> Duration {
        Duration::from_millis(self.tx_timeout_ms)
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing
    /// - Environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let session_secret = env::var("SESSION_JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("SESSION_JWT_SECRET environment variable is required"))?;

        if session_secret.len() < 32 {
            anyhow::bail!("SESSION_JWT_SECRET must be at least 32 characters long");
        }

        let generator_url = env::var("INSIGHT_GENERATOR_URL").map_err(|_| {
            anyhow::anyhow!("INSIGHT_GENERATOR_URL environment variable is required")
        })?;

        let generator_api_key = env::var("INSIGHT_GENERATOR_API_KEY").ok();

        let tx_timeout_ms = env::var("PROFILE_TX_TIMEOUT_MS")
            .unwrap_or_else(|_| "10000".to_string())
            .parse::<u64>()?;

        let race_policy = parse_race_policy(
            &env::var("INSIGHT_RACE_POLICY").unwrap_or_else(|_| "surface".to_string()),
        )?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            session: SessionConfig {
                secret: session_secret,
            },
            insights: InsightConfig {
                generator_url,
                generator_api_key,
            },
            profile: ProfileConfig {
                tx_timeout_ms,
                race_policy,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse_race_policy(value: &str) -> anyhow::Result<RacePolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "surface" => Ok(RacePolicy::Surface),
        "retry" | "retry_as_lookup" => Ok(RacePolicy::RetryAsLookup),
        other => anyhow::bail!("INSIGHT_RACE_POLICY must be 'surface' or 'retry', got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                max_connections: 10,
            },
            session: SessionConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
            insights: InsightConfig {
                generator_url: "https://insights.internal".to_string(),
                generator_api_key: None,
            },
            profile: ProfileConfig {
                tx_timeout_ms: 10_000,
                race_policy: RacePolicy::Surface,
            },
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(sample_config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_tx_timeout_conversion() {
        assert_eq!(
            sample_config().profile.tx_timeout(),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn test_parse_race_policy() {
        assert_eq!(parse_race_policy("surface").unwrap(), RacePolicy::Surface);
        assert_eq!(parse_race_policy("retry").unwrap(), RacePolicy::RetryAsLookup);
        assert_eq!(
            parse_race_policy("Retry_As_Lookup").unwrap(),
            RacePolicy::RetryAsLookup
        );
        assert!(parse_race_policy("always").is_err());
    }
}
