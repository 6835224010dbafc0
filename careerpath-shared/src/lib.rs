//! # CareerPath Shared Library
//!
//! This crate contains shared types, utilities, and business logic used across
//! the CareerPath API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `db`: Connection pool, migrations, and the transaction helper
//! - `auth`: Identity-provider session validation and request principals
//! - `insights`: Insight generator capability (HTTP client + mock)
//! - `profile`: Onboarding/Profile service (the core business logic)

pub mod auth;
pub mod db;
pub mod insights;
pub mod models;
pub mod profile;

/// Current version of the CareerPath shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
