/// Session token validation
///
/// The external identity provider issues HS256-signed session tokens for
/// every authenticated browser session. This module validates those tokens
/// (signature, expiration, issuer) and exposes their claims. Tokens are
/// never minted here in production paths; [`create_session_token`] exists
/// for tests and local development.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256), shared secret with the provider
/// - **Validation**: Signature, expiration, not-before, and issuer checks
/// - **Secret Management**: Secrets should be at least 32 bytes (256 bits)
///
/// # Example
///
/// ```
/// use careerpath_shared::auth::session::{
///     create_session_token, validate_session_token, SessionClaims,
/// };
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = SessionClaims::new(
///     "idp_2abc123".to_string(),
///     vec!["user@example.com".to_string()],
/// );
/// let token = create_session_token(&claims, "a-secret-of-at-least-32-bytes!!!")?;
///
/// let validated = validate_session_token(&token, "a-secret-of-at-least-32-bytes!!!")?;
/// assert_eq!(validated.sub, "idp_2abc123");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer expected on every session token
pub const SESSION_ISSUER: &str = "careerpath-identity";

/// Default session lifetime
const SESSION_LIFETIME_HOURS: i64 = 24;

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to create token
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate session token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Session token has expired")]
    Expired,

    /// Token was issued by someone else
    #[error("Invalid session token issuer")]
    InvalidIssuer,
}

/// Claims carried by an identity-provider session token
///
/// # Standard Claims
///
/// - `sub`: Subject (the provider's stable user id)
/// - `iss`: Issuer (always [`SESSION_ISSUER`])
/// - `iat`, `exp`, `nbf`: Standard timestamp claims
///
/// # Custom Claims
///
/// - `emails`: Verified email addresses, primary first
/// - `name`, `image_url`: Optional profile data from the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - the identity provider's stable user id
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Verified email addresses, primary first
    #[serde(default)]
    pub emails: Vec<String>,

    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,

    /// Optional profile image URL
    #[serde(default)]
    pub image_url: Option<String>,
}

impl SessionClaims {
    /// Creates new claims with the default session lifetime
    pub fn new(external_id: String, emails: Vec<String>) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(SESSION_LIFETIME_HOURS);

        Self {
            sub: external_id,
            iss: SESSION_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            emails,
            name: None,
            image_url: None,
        }
    }

    /// Sets the optional profile fields carried by the token
    pub fn with_profile(mut self, name: Option<String>, image_url: Option<String>) -> Self {
        self.name = name;
        self.image_url = image_url;
        self
    }
}

/// Creates a signed session token (test/development helper)
///
/// # Errors
///
/// Returns [`SessionError::CreateError`] if encoding fails
pub fn create_session_token(claims: &SessionClaims, secret: &str) -> Result<String, SessionError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| SessionError::CreateError(e.to_string()))
}

/// Validates a session token and returns its claims
///
/// Checks the signature, expiration, not-before, and issuer.
///
/// # Errors
///
/// - [`SessionError::Expired`] if the token's `exp` has passed
/// - [`SessionError::InvalidIssuer`] if `iss` is not [`SESSION_ISSUER`]
/// - [`SessionError::ValidationError`] for any other validation failure
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[SESSION_ISSUER]);
    validation.validate_nbf = true;

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => SessionError::InvalidIssuer,
        _ => SessionError::ValidationError(e.to_string()),
    })?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_round_trip() {
        let claims = SessionClaims::new(
            "idp_2abc123".to_string(),
            vec!["user@example.com".to_string()],
        )
        .with_profile(Some("Jane".to_string()), None);

        let token = create_session_token(&claims, SECRET).unwrap();
        let validated = validate_session_token(&token, SECRET).unwrap();

        assert_eq!(validated.sub, "idp_2abc123");
        assert_eq!(validated.emails, vec!["user@example.com"]);
        assert_eq!(validated.name.as_deref(), Some("Jane"));
        assert!(validated.image_url.is_none());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = SessionClaims::new("idp_x".to_string(), vec![]);
        let token = create_session_token(&claims, SECRET).unwrap();

        let result = validate_session_token(&token, "another-secret-also-32-bytes-long!");
        assert!(matches!(result, Err(SessionError::ValidationError(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut claims = SessionClaims::new("idp_x".to_string(), vec![]);
        claims.iat -= 7200;
        claims.nbf -= 7200;
        claims.exp = claims.iat + 1;

        let token = create_session_token(&claims, SECRET).unwrap();
        let result = validate_session_token(&token, SECRET);
        assert!(matches!(result, Err(SessionError::Expired)));
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let mut claims = SessionClaims::new("idp_x".to_string(), vec![]);
        claims.iss = "someone-else".to_string();

        let token = create_session_token(&claims, SECRET).unwrap();
        let result = validate_session_token(&token, SECRET);
        assert!(matches!(result, Err(SessionError::InvalidIssuer)));
    }
}
