/// Onboarding status endpoint
///
/// Reports whether the authenticated user has completed onboarding,
/// lazily creating their local user record on first call.
///
/// # Endpoints
///
/// - `GET /v1/onboarding/status` - Ensure the user record exists and
///   report onboarding state

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use careerpath_shared::auth::Principal;
use careerpath_shared::profile::OnboardingStatus;

/// Get onboarding status
///
/// Resolves the caller's user record (creating it if this is their first
/// request) and reports whether they have picked an industry yet.
///
/// # Endpoint
///
/// ```text
/// GET /v1/onboarding/status
/// Authorization: Bearer <token>
/// ```
///
/// Response:
/// ```json
/// {
///   "is_onboarded": false
/// }
/// ```
pub async fn onboarding_status(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
) -> ApiResult<Json<OnboardingStatus>> {
    let principal = principal.as_ref().map(|ext| &ext.0);
    let status = state.profile.ensure_user_record(principal).await?;
    Ok(Json(status))
}
