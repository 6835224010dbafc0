/// The authenticated principal for one request
///
/// A [`Principal`] is the request-scoped identity value produced by the
/// session middleware and passed explicitly into every core operation.
/// Keeping it an ordinary value (rather than ambient state) makes the
/// profile service testable without a live identity provider.

use serde::{Deserialize, Serialize};

use super::session::SessionClaims;

/// Authenticated identity associated with the current request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Stable id issued by the identity provider
    pub external_id: String,

    /// Verified email addresses, primary first (may be empty)
    pub emails: Vec<String>,

    /// Optional display name from the provider
    pub name: Option<String>,

    /// Optional profile image URL from the provider
    pub image_url: Option<String>,
}

impl Principal {
    /// Builds a principal from validated session claims
    pub fn from_claims(claims: SessionClaims) -> Self {
        Self {
            external_id: claims.sub,
            emails: claims.emails,
            name: claims.name,
            image_url: claims.image_url,
        }
    }

    /// Returns the principal's primary email, if any
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_email_is_first() {
        let principal = Principal {
            external_id: "idp_x".to_string(),
            emails: vec!["a@example.com".to_string(), "b@example.com".to_string()],
            name: None,
            image_url: None,
        };

        assert_eq!(principal.primary_email(), Some("a@example.com"));
    }

    #[test]
    fn test_primary_email_missing() {
        let principal = Principal {
            external_id: "idp_x".to_string(),
            emails: vec![],
            name: None,
            image_url: None,
        };

        assert!(principal.primary_email().is_none());
    }

    #[test]
    fn test_from_claims_copies_profile_data() {
        let claims = SessionClaims::new(
            "idp_2abc123".to_string(),
            vec!["user@example.com".to_string()],
        )
        .with_profile(Some("Jane".to_string()), Some("https://img".to_string()));

        let principal = Principal::from_claims(claims);
        assert_eq!(principal.external_id, "idp_2abc123");
        assert_eq!(principal.name.as_deref(), Some("Jane"));
        assert_eq!(principal.image_url.as_deref(), Some("https://img"));
    }
}
