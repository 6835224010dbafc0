/// Identity and request authentication
///
/// CareerPath does not implement an identity provider. Principals arrive as
/// signed session tokens minted by the external provider; this module
/// validates them locally and turns them into request-scoped [`Principal`]
/// values that the core service consumes explicitly.
///
/// # Modules
///
/// - [`session`]: Session token (HS256 JWT) validation
/// - [`principal`]: The authenticated principal passed into core operations
/// - [`middleware`]: Axum middleware forming the route protection boundary
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
/// use careerpath_shared::auth::middleware::create_session_middleware;
///
/// let protected: Router = Router::new()
///     .route("/me", get(|| async { "OK" }))
///     .layer(middleware::from_fn(create_session_middleware(
///         "your-session-secret",
///     )));
/// ```

pub mod middleware;
pub mod principal;
pub mod session;

pub use principal::Principal;
