/// The Onboarding/Profile service implementation
///
/// # Concurrency model
///
/// Each request handler calls into one shared `ProfileService`. User rows
/// are single-writer (only their owning principal's requests mutate them);
/// `industry_insights` rows are the one cross-principal shared resource,
/// and their uniqueness under concurrent first-time creation is delegated
/// to the store's primary key. How a lost creation race surfaces is
/// governed by [`RacePolicy`].
///
/// # Example
///
/// ```no_run
/// use careerpath_shared::insights::MockInsightGenerator;
/// use careerpath_shared::profile::{ProfileOptions, ProfileService};
/// use std::sync::Arc;
///
/// # async fn example(pool: sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let service = ProfileService::new(
///     pool,
///     Arc::new(MockInsightGenerator::default()),
///     ProfileOptions::default(),
/// );
///
/// let status = service.ensure_user_record(None).await;
/// assert!(status.is_err()); // no principal
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::auth::Principal;
use crate::db::tx;
use crate::insights::InsightGenerator;
use crate::models::industry_insight::IndustryInsight;
use crate::models::user::{CreateUser, ProfileUpdate, User};

use super::error::ProfileError;

/// Default wall-clock budget for the profile update transaction
pub const DEFAULT_TX_TIMEOUT: Duration = Duration::from_secs(10);

/// How a lost insight-creation race surfaces to the caller
///
/// Two concurrent profile updates can both see no insight row for a
/// brand-new industry and race to create it; the store lets exactly one
/// insert win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RacePolicy {
    /// Surface the unique-constraint failure to the caller
    Surface,

    /// Re-run the transaction once; the insight row now exists, so the
    /// second pass resolves the lookup instead of creating
    RetryAsLookup,
}

/// Tunables for the profile service
#[derive(Debug, Clone)]
pub struct ProfileOptions {
    /// Wall-clock budget for the profile update transaction
    pub transaction_timeout: Duration,

    /// Behavior after a lost insight-creation race
    pub race_policy: RacePolicy,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            transaction_timeout: DEFAULT_TX_TIMEOUT,
            race_policy: RacePolicy::Surface,
        }
    }
}

/// Result of the ensure-user flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OnboardingStatus {
    /// True iff the resolved user's industry is set
    pub is_onboarded: bool,
}

/// Result of a successful profile update
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdateOutcome {
    /// The updated user row
    pub user: User,

    /// The resolved insight record (freshly created or pre-existing)
    pub industry_insight: IndustryInsight,
}

/// Orchestrates onboarding and profile mutation
pub struct ProfileService {
    pool: PgPool,
    generator: Arc<dyn InsightGenerator>,
    options: ProfileOptions,
}

impl ProfileService {
    /// Creates a new profile service
    pub fn new(
        pool: PgPool,
        generator: Arc<dyn InsightGenerator>,
        options: ProfileOptions,
    ) -> Self {
        Self {
            pool,
            generator,
            options,
        }
    }

    /// Ensures a user record exists for the principal and reports whether
    /// onboarding is complete
    ///
    /// Looks up the user by identity-provider id and creates the row on
    /// first sight (profile fields unset, empty skills). Idempotent:
    /// repeated calls for the same principal resolve the same row. The
    /// onboarded flag is read-after-write on the freshly resolved record,
    /// so no transaction is needed.
    ///
    /// # Errors
    ///
    /// - [`ProfileError::Unauthenticated`] if no principal is present
    /// - [`ProfileError::MissingContactInfo`] if the principal has no email
    pub async fn ensure_user_record(
        &self,
        principal: Option<&Principal>,
    ) -> Result<OnboardingStatus, ProfileError> {
        let user = self.resolve_or_create(principal).await?;
        Ok(OnboardingStatus {
            is_onboarded: user.is_onboarded(),
        })
    }

    /// Ensures a user record exists and returns the full row
    ///
    /// Same flow and preconditions as [`ensure_user_record`], for callers
    /// that need the profile itself rather than the onboarded flag.
    ///
    /// [`ensure_user_record`]: Self::ensure_user_record
    pub async fn current_user(
        &self,
        principal: Option<&Principal>,
    ) -> Result<User, ProfileError> {
        self.resolve_or_create(principal).await
    }

    /// Updates the principal's profile inside one bounded transaction
    ///
    /// Transaction steps, strictly in order:
    /// 1. Look up the insight record for `update.industry`
    /// 2. If absent, call the generator and create the record
    ///    (`next_update` = now + 7 days); any generator failure aborts
    ///    the whole transaction
    /// 3. Full-replace the user's industry/experience/bio/skills
    /// 4. Commit
    ///
    /// The whole unit of work runs under the configured wall-clock budget;
    /// on expiry it rolls back cleanly and surfaces
    /// [`ProfileError::TransactionTimeout`]. A lost insight-creation race
    /// is handled per the configured [`RacePolicy`].
    ///
    /// # Errors
    ///
    /// - [`ProfileError::Unauthenticated`] if no principal is present
    /// - [`ProfileError::UserNotFound`] if the ensure-user flow never ran
    ///   for this principal
    /// - [`ProfileError::InsightGeneration`] if the generator fails or
    ///   returns malformed data (no partial rows survive)
    /// - [`ProfileError::TransactionTimeout`] on budget expiry
    /// - [`ProfileError::UniqueViolation`] on a lost creation race under
    ///   [`RacePolicy::Surface`]
    pub async fn update_user_profile(
        &self,
        principal: Option<&Principal>,
        update: ProfileUpdate,
    ) -> Result<ProfileUpdateOutcome, ProfileError> {
        let principal = principal.ok_or(ProfileError::Unauthenticated)?;

        let user = User::find_by_external_id(&self.pool, &principal.external_id)
            .await?
            .ok_or(ProfileError::UserNotFound)?;

        let mut result = self.run_update_transaction(&user, &update).await;

        if self.options.race_policy == RacePolicy::RetryAsLookup {
            if let Err(ref e) = result {
                if e.is_unique_violation() {
                    info!(
                        industry = %update.industry,
                        user_id = %user.id,
                        "Lost insight creation race, retrying as lookup"
                    );
                    result = self.run_update_transaction(&user, &update).await;
                }
            }
        }

        match result {
            Ok(outcome) => {
                info!(
                    user_id = %outcome.user.id,
                    industry = %outcome.user.industry.as_deref().unwrap_or(""),
                    "Profile updated"
                );
                Ok(outcome)
            }
            Err(e) => {
                error!(
                    user_id = %user.id,
                    industry = %update.industry,
                    error = %e,
                    "Failed to update user profile"
                );
                Err(e)
            }
        }
    }

    /// One attempt at the bounded update transaction
    async fn run_update_transaction(
        &self,
        user: &User,
        update: &ProfileUpdate,
    ) -> Result<ProfileUpdateOutcome, ProfileError> {
        let generator = Arc::clone(&self.generator);
        let user_id = user.id;
        let update = update.clone();

        let result = tx::run_with_timeout(&self.pool, self.options.transaction_timeout, |txn| {
            Box::pin(async move {
                let insight =
                    match IndustryInsight::find_by_industry(&mut **txn, &update.industry).await? {
                        Some(existing) => existing,
                        None => {
                            let payload = generator.generate(&update.industry).await?;
                            IndustryInsight::create(&mut **txn, &update.industry, payload).await?
                        }
                    };

                let updated = User::replace_profile(&mut **txn, user_id, &update)
                    .await?
                    .ok_or(ProfileError::UserNotFound)?;

                Ok::<_, ProfileError>(ProfileUpdateOutcome {
                    user: updated,
                    industry_insight: insight,
                })
            })
        })
        .await;

        result.map_err(ProfileError::from)
    }

    /// Resolves the principal's user row, creating it on first sight
    async fn resolve_or_create(
        &self,
        principal: Option<&Principal>,
    ) -> Result<User, ProfileError> {
        let principal = principal.ok_or(ProfileError::Unauthenticated)?;
        let email = principal
            .primary_email()
            .ok_or(ProfileError::MissingContactInfo)?;

        if let Some(user) = User::find_by_external_id(&self.pool, &principal.external_id).await? {
            return Ok(user);
        }

        match User::create(
            &self.pool,
            CreateUser {
                external_id: principal.external_id.clone(),
                email: email.to_string(),
                name: principal.name.clone(),
                image_url: principal.image_url.clone(),
            },
        )
        .await
        {
            Ok(user) => {
                info!(user_id = %user.id, external_id = %user.external_id, "Created user record");
                Ok(user)
            }
            Err(e) => {
                let mapped = ProfileError::from(e);
                // Two concurrent ensure calls for the same principal can
                // race on the insert; the loser resolves as a re-lookup.
                if mapped.is_unique_violation() {
                    warn!(
                        external_id = %principal.external_id,
                        "Lost user creation race, resolving existing record"
                    );
                    if let Some(user) =
                        User::find_by_external_id(&self.pool, &principal.external_id).await?
                    {
                        return Ok(user);
                    }
                }
                Err(mapped)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ProfileOptions::default();
        assert_eq!(options.transaction_timeout, Duration::from_secs(10));
        assert_eq!(options.race_policy, RacePolicy::Surface);
    }

    #[test]
    fn test_race_policy_wire_format() {
        assert_eq!(
            serde_json::to_string(&RacePolicy::RetryAsLookup).unwrap(),
            "\"retry_as_lookup\""
        );
        assert_eq!(
            serde_json::from_str::<RacePolicy>("\"surface\"").unwrap(),
            RacePolicy::Surface
        );
    }

    // Behavior against a live database is covered in
    // tests/profile_service_tests.rs.
}
