/// Database models for CareerPath
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User profiles, one per identity-provider principal
/// - `industry_insight`: Shared, cached insight records keyed by industry label
///
/// # Example
///
/// ```no_run
/// use careerpath_shared::models::user::{CreateUser, User};
/// use careerpath_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     external_id: "idp_2abc123".to_string(),
///     email: "user@example.com".to_string(),
///     name: Some("John Doe".to_string()),
///     image_url: None,
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod industry_insight;
pub mod user;
