/// Bounded database transactions
///
/// This module implements the transaction-as-closure pattern: a unit of work
/// receives an open `sqlx::Transaction`, and the whole unit (begin, work,
/// commit) runs under a wall-clock budget. If the budget is exceeded the
/// transaction future is dropped, which rolls the transaction back, and the
/// caller gets a distinct timeout error.
///
/// # Atomicity
///
/// Either the commit succeeds and every write inside the closure becomes
/// visible, or nothing does. A closure error triggers an explicit rollback;
/// a timeout drops the transaction, which sqlx rolls back on the connection's
/// return to the pool.
///
/// # Example
///
/// ```no_run
/// use careerpath_shared::db::tx;
/// use sqlx::PgPool;
/// use std::time::Duration;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let count = tx::run_with_timeout(&pool, Duration::from_secs(10), |txn| {
///     Box::pin(async move {
///         let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
///             .fetch_one(&mut **txn)
///             .await?;
///         Ok::<_, sqlx::Error>(row.0)
///     })
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```

use futures::future::BoxFuture;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Duration;
use tracing::warn;

/// Error type for bounded transactions
///
/// Keeps the timeout, begin/commit failures, and unit-of-work failures
/// distinguishable so callers can map them to their own error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum TxError<E>
where
    E: std::error::Error + 'static,
{
    /// The transaction exceeded its wall-clock budget and was rolled back
    #[error("transaction exceeded its time budget and was rolled back")]
    Timeout,

    /// Failed to begin the transaction
    #[error("failed to begin transaction: {0}")]
    Begin(#[source] sqlx::Error),

    /// Failed to commit the transaction
    #[error("failed to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),

    /// The unit of work failed; the transaction was rolled back
    #[error(transparent)]
    Work(E),
}

/// Runs a unit of work inside a transaction with a wall-clock budget
///
/// The closure receives a mutable reference to the open transaction and
/// returns a boxed future (so it can borrow the transaction across awaits).
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `budget` - Wall-clock budget for begin + work + commit
/// * `work` - Unit of work; every query must go through the transaction
///
/// # Errors
///
/// - [`TxError::Timeout`] if the budget is exceeded (no partial effects)
/// - [`TxError::Begin`] / [`TxError::Commit`] for transaction bookkeeping failures
/// - [`TxError::Work`] wrapping the closure's own error after rollback
pub async fn run_with_timeout<T, E, F>(
    pool: &PgPool,
    budget: Duration,
    work: F,
) -> Result<T, TxError<E>>
where
    E: std::error::Error + 'static,
    F: for<'t> FnOnce(&'t mut Transaction<'static, Postgres>) -> BoxFuture<'t, Result<T, E>>,
{
    let transaction = async {
        let mut txn = pool.begin().await.map_err(TxError::Begin)?;

        match work(&mut txn).await {
            Ok(value) => {
                txn.commit().await.map_err(TxError::Commit)?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    warn!(error = %rollback_err, "Rollback after failed unit of work also failed");
                }
                Err(TxError::Work(e))
            }
        }
    };

    match tokio::time::timeout(budget, transaction).await {
        Ok(result) => result,
        Err(_) => {
            warn!(budget_ms = budget.as_millis() as u64, "Transaction timed out, rolling back");
            Err(TxError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_error_display() {
        let err: TxError<sqlx::Error> = TxError::Timeout;
        assert_eq!(
            err.to_string(),
            "transaction exceeded its time budget and was rolled back"
        );
    }

    #[test]
    fn test_work_error_is_transparent() {
        let inner = sqlx::Error::RowNotFound;
        let expected = inner.to_string();
        let err: TxError<sqlx::Error> = TxError::Work(inner);
        assert_eq!(err.to_string(), expected);
    }

    // Transaction behavior against a live database (commit visibility,
    // rollback on error, rollback on timeout) is covered in
    // tests/profile_service_tests.rs.
}
