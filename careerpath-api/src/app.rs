/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use careerpath_api::{app::AppState, config::Config};
/// use careerpath_shared::insights::HttpInsightGenerator;
/// use careerpath_shared::profile::{ProfileOptions, ProfileService};
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let generator = Arc::new(HttpInsightGenerator::new(
///     config.insights.generator_url.clone(),
///     config.insights.generator_api_key.clone(),
/// ));
/// let profile = Arc::new(ProfileService::new(
///     pool.clone(),
///     generator,
///     ProfileOptions::default(),
/// ));
/// let state = AppState::new(pool, config, profile);
/// let app = careerpath_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, put},
    Router,
};
use careerpath_shared::auth::middleware::create_session_middleware;
use careerpath_shared::profile::ProfileService;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// The Onboarding/Profile service
    pub profile: Arc<ProfileService>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config, profile: Arc<ProfileService>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            profile,
        }
    }

    /// Gets the session token shared secret
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                    # Health check (public)
/// └── /v1/                       # API v1 (session-authenticated)
///     ├── GET /onboarding/status # Ensure user record, report onboarding
///     └── /users/
///         ├── GET /me            # Ensure + return the full user
///         └── PUT /me/profile    # Atomic profile update
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Session authentication on the /v1 subtree, so unauthenticated
///    requests never reach a handler
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check_handler));

    // Protected API: everything under /v1 requires a valid session token
    let v1_routes = Router::new()
        .route("/onboarding/status", get(routes::onboarding::onboarding_status))
        .route("/users/me", get(routes::users::current_user))
        .route("/users/me/profile", put(routes::users::update_profile))
        .layer(middleware::from_fn(create_session_middleware(
            state.session_secret().to_string(),
        )));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::PUT, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
