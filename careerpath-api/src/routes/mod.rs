/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `onboarding`: Onboarding status endpoint
/// - `users`: Current user and profile update endpoints

pub mod health;
pub mod onboarding;
pub mod users;
