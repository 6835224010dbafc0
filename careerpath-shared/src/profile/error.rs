/// Error taxonomy for the Onboarding/Profile service
///
/// Every failure mode the two core operations can surface is a distinct,
/// programmatically inspectable kind. The HTTP layer may flatten these into
/// generic outward messages, but callers (and tests) can always match on
/// the kind.

use crate::db::tx::TxError;
use crate::insights::GeneratorError;

/// Failures surfaced by the Onboarding/Profile service
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// No authenticated principal was supplied for the request
    #[error("Request has no authenticated principal")]
    Unauthenticated,

    /// The principal carries no usable email address
    #[error("Principal has no usable email address")]
    MissingContactInfo,

    /// No user record exists for this principal (ensure-user flow never ran)
    #[error("No user record exists for this principal")]
    UserNotFound,

    /// The insight generator failed or returned data we refuse to store;
    /// the surrounding transaction was rolled back
    #[error("Insight generation failed: {0}")]
    InsightGeneration(#[from] GeneratorError),

    /// The profile transaction exceeded its wall-clock budget and was
    /// rolled back with no partial effects
    #[error("Profile transaction exceeded its time budget")]
    TransactionTimeout,

    /// A unique constraint was violated, usually two transactions racing to
    /// create the same first-time industry insight
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Any other persistence failure
    #[error("Persistence error: {0}")]
    Database(#[source] sqlx::Error),
}

impl ProfileError {
    /// Whether this failure is the insight-creation uniqueness race
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, ProfileError::UniqueViolation(_))
    }
}

impl From<sqlx::Error> for ProfileError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                ProfileError::UniqueViolation(constraint)
            }
            _ => ProfileError::Database(err),
        }
    }
}

impl From<TxError<ProfileError>> for ProfileError {
    fn from(err: TxError<ProfileError>) -> Self {
        match err {
            TxError::Timeout => ProfileError::TransactionTimeout,
            TxError::Begin(e) | TxError::Commit(e) => e.into(),
            TxError::Work(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_timeout_maps_to_transaction_timeout() {
        let err: ProfileError = TxError::<ProfileError>::Timeout.into();
        assert!(matches!(err, ProfileError::TransactionTimeout));
    }

    #[test]
    fn test_work_error_passes_through() {
        let err: ProfileError = TxError::Work(ProfileError::UserNotFound).into();
        assert!(matches!(err, ProfileError::UserNotFound));
    }

    #[test]
    fn test_generator_error_converts() {
        let err: ProfileError = GeneratorError::Failed("model unavailable".to_string()).into();
        assert!(matches!(err, ProfileError::InsightGeneration(_)));
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn test_plain_sqlx_error_is_database() {
        let err: ProfileError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ProfileError::Database(_)));
    }
}
