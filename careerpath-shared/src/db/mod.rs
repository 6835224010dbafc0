/// Database access layer
///
/// This module provides the PostgreSQL connection pool, migration runner,
/// and the bounded-transaction helper used by the profile service.
///
/// # Modules
///
/// - [`pool`]: Connection pool creation and health checks
/// - [`migrations`]: sqlx migration runner
/// - [`tx`]: Transaction-as-closure helper with a wall-clock budget

pub mod migrations;
pub mod pool;
pub mod tx;
