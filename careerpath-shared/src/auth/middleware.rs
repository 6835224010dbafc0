/// Session authentication middleware for Axum
///
/// This middleware is the route protection boundary: it is layered onto the
/// protected subtree of the router, so requests without a valid session
/// token never reach a core operation. It extracts the Bearer token from
/// the Authorization header, validates it against the identity provider's
/// shared secret, and injects a [`Principal`] into request extensions.
///
/// The core service still re-checks principal *presence* (an operation
/// called without one fails with `Unauthenticated`), but never route-level
/// authorization.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use careerpath_shared::auth::middleware::create_session_middleware;
/// use careerpath_shared::auth::Principal;
///
/// async fn me(Extension(principal): Extension<Principal>) -> String {
///     format!("Hello, {}!", principal.external_id)
/// }
///
/// let app: Router = Router::new()
///     .route("/me", get(me))
///     .layer(middleware::from_fn(create_session_middleware("secret")));
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::principal::Principal;
use super::session::{validate_session_token, SessionError};

/// Error type for the authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Invalid authorization header format
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
        }
    }
}

/// Session authentication middleware
///
/// Validates session tokens from the `Authorization: Bearer <token>` header.
///
/// # Errors
///
/// Returns 401 Unauthorized if:
/// - Authorization header is missing
/// - Token validation fails
/// - Token has expired
///
/// Returns 400 Bad Request if the header is not a Bearer token.
pub async fn session_auth_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_session_token(token, &secret).map_err(|e| match e {
        SessionError::Expired => AuthError::InvalidToken("Session expired".to_string()),
        SessionError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid session token: {}", e)),
    })?;

    req.extensions_mut().insert(Principal::from_claims(claims));

    Ok(next.run(req).await)
}

/// Creates a session authentication middleware closure
///
/// Helper that captures the shared secret and returns a middleware function
/// suitable for `axum::middleware::from_fn`.
pub fn create_session_middleware(
    secret: impl Into<String>,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<
    Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>,
> + Clone {
    let secret = secret.into();
    move |req, next| {
        let secret = secret.clone();
        Box::pin(session_auth_middleware(secret, req, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_into_response() {
        let err = AuthError::MissingCredentials;
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let err = AuthError::InvalidFormat("test".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let err = AuthError::InvalidToken("test".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
