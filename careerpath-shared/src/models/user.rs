/// User model and database operations
///
/// This module provides the User model and the operations the onboarding and
/// profile flows need. Each user corresponds to exactly one identity-provider
/// principal (via `external_id`); rows are created lazily the first time a
/// principal completes the ensure-user flow.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id           UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     external_id  TEXT NOT NULL UNIQUE,
///     email        TEXT NOT NULL UNIQUE,
///     name         TEXT,
///     image_url    TEXT,
///     industry     TEXT REFERENCES industry_insights(industry),
///     experience   INTEGER CHECK (experience >= 0),
///     bio          TEXT,
///     skills       TEXT[] NOT NULL DEFAULT '{}',
///     created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
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
/// let user = User::create(
///     &pool,
///     CreateUser {
///         external_id: "idp_2abc123".to_string(),
///         email: "user@example.com".to_string(),
///         name: Some("John Doe".to_string()),
///         image_url: None,
///     },
/// )
/// .await?;
///
/// let found = User::find_by_external_id(&pool, "idp_2abc123").await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, external_id, email, name, image_url, industry, \
                            experience, bio, skills, created_at, updated_at";

/// User model representing one principal's profile
///
/// A user is "onboarded" once `industry` is set. The `industry` column is a
/// foreign key into `industry_insights`, so a user can only point at an
/// insight row that exists.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (store-assigned, UUID v4)
    pub id: Uuid,

    /// Identity-provider id, immutable once set
    ///
    /// Must be unique across all users
    pub external_id: String,

    /// Email address
    ///
    /// Must be unique across all users
    pub email: String,

    /// Optional display name (copied from the principal on creation)
    pub name: Option<String>,

    /// Optional profile image URL (copied from the principal on creation)
    pub image_url: Option<String>,

    /// Selected industry (None until the user completes onboarding)
    pub industry: Option<String>,

    /// Years of professional experience
    pub experience: Option<i32>,

    /// Short biography
    pub bio: Option<String>,

    /// Skill labels (order-irrelevant)
    pub skills: Vec<String>,

    /// When the user record was created
    pub created_at: DateTime<Utc>,

    /// When the user record was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns whether this user has completed onboarding
    ///
    /// A user is onboarded once their industry is set.
    pub fn is_onboarded(&self) -> bool {
        self.industry.is_some()
    }
}

/// Input for creating a new user
///
/// All profile fields start unset; only identity and contact data come from
/// the principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Identity-provider id
    pub external_id: String,

    /// Primary email address
    pub email: String,

    /// Optional display name
    pub name: Option<String>,

    /// Optional profile image URL
    pub image_url: Option<String>,
}

/// Input for the profile update operation
///
/// This is a full replace of the four profile fields: unset values overwrite
/// existing values with NULL / empty rather than being left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// Industry label, used as the insight lookup/creation key
    pub industry: String,

    /// Years of professional experience (>= 0)
    pub experience: Option<i32>,

    /// Short biography
    pub bio: Option<String>,

    /// Skill labels
    pub skills: Vec<String>,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `external_id` or `email` already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        data: CreateUser,
    ) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (external_id, email, name, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(data.external_id)
        .bind(data.email)
        .bind(data.name)
        .bind(data.image_url)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Finds a user by identity-provider id
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_external_id<'e>(
        executor: impl PgExecutor<'e>,
        external_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE external_id = $1
            "#,
        ))
        .bind(external_id)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Replaces a user's profile fields
    ///
    /// Sets `industry`, `experience`, `bio`, and `skills` to exactly the
    /// given values (a full replace, not a patch) and bumps `updated_at`.
    ///
    /// # Returns
    ///
    /// The updated user if found, None if the user doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `industry` has no matching `industry_insights` row (foreign key)
    /// - Database connection fails
    pub async fn replace_profile<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
        data: &ProfileUpdate,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET industry = $2,
                experience = $3,
                bio = $4,
                skills = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&data.industry)
        .bind(data.experience)
        .bind(&data.bio)
        .bind(&data.skills)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(industry: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            external_id: "idp_test".to_string(),
            email: "test@example.com".to_string(),
            name: None,
            image_url: None,
            industry: industry.map(String::from),
            experience: None,
            bio: None,
            skills: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_onboarded_requires_industry() {
        assert!(!sample_user(None).is_onboarded());
        assert!(sample_user(Some("Fintech")).is_onboarded());
    }

    #[test]
    fn test_profile_update_is_full_replace_shape() {
        // Unset fields are represented explicitly, not omitted, so a replace
        // always carries all four values.
        let update = ProfileUpdate {
            industry: "Fintech".to_string(),
            experience: None,
            bio: None,
            skills: vec![],
        };

        assert_eq!(update.industry, "Fintech");
        assert!(update.experience.is_none());
        assert!(update.bio.is_none());
        assert!(update.skills.is_empty());
    }

    // Integration tests for database operations are in tests/profile_service_tests.rs
}
