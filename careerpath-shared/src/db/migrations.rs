/// Database migration runner
///
/// Migrations are stored in the `migrations/` directory at the crate root
/// and embedded at compile time via `sqlx::migrate!`.
///
/// # Example
///
/// ```no_run
/// use careerpath_shared::db::pool::{create_pool, DatabaseConfig};
/// use careerpath_shared::db::migrations::run_migrations;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// Migrations that have already been applied are skipped. If a migration
/// fails it is rolled back and an error is returned.
///
/// # Errors
///
/// Returns an error if:
/// - A migration file is malformed
/// - A migration fails to execute
/// - Database connection is lost during migration
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
