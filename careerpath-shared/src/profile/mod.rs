/// Onboarding/Profile service
///
/// The core of the system: orchestrates user-record creation, conditional
/// insight generation, and profile mutation. Presentation layers consume
/// exactly three operations:
///
/// - `ensure_user_record`: lazy user creation + onboarded flag
/// - `current_user`: same ensure flow, returns the full user row
/// - `update_user_profile`: the atomic onboarding transaction
///
/// # Modules
///
/// - [`error`]: The service error taxonomy
/// - [`service`]: The service implementation and its options

pub mod error;
pub mod service;

pub use error::ProfileError;
pub use service::{
    OnboardingStatus, ProfileOptions, ProfileService, ProfileUpdateOutcome, RacePolicy,
};
