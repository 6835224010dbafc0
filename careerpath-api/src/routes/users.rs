/// Current-user endpoints
///
/// This module provides endpoints for the authenticated user's own record:
/// - Fetching the current user
/// - Updating the profile (industry, experience, bio, skills)
///
/// # Endpoints
///
/// - `GET /v1/users/me` - Get the current user record
/// - `PUT /v1/users/me/profile` - Replace the profile fields atomically

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use careerpath_shared::auth::Principal;
use careerpath_shared::models::user::{ProfileUpdate, User};
use careerpath_shared::profile::ProfileUpdateOutcome;
use serde::Deserialize;
use validator::Validate;

/// Profile update request
///
/// All fields are full replacements: omitting `bio` clears any stored bio,
/// and `skills` replaces the stored list wholesale.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Industry key, e.g. "tech-software-development"
    #[validate(length(min = 1, message = "Industry must not be empty"))]
    pub industry: String,

    /// Years of professional experience
    #[validate(range(min = 0, max = 50, message = "Experience must be between 0 and 50"))]
    pub experience: Option<i32>,

    /// Short professional bio
    #[validate(length(max = 2000, message = "Bio must be at most 2000 characters"))]
    pub bio: Option<String>,

    /// Skill list, replaces the stored list
    #[serde(default)]
    pub skills: Vec<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            industry: req.industry,
            experience: req.experience,
            bio: req.bio,
            skills: req.skills,
        }
    }
}

/// Get the current user
///
/// Resolves (creating on first request) and returns the caller's full
/// user record.
///
/// # Endpoint
///
/// ```text
/// GET /v1/users/me
/// Authorization: Bearer <token>
/// ```
pub async fn current_user(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
) -> ApiResult<Json<User>> {
    let principal = principal.as_ref().map(|ext| &ext.0);
    let user = state.profile.current_user(principal).await?;
    Ok(Json(user))
}

/// Update the current user's profile
///
/// Runs the atomic profile update: resolves the industry insight record
/// (generating one on first use of an industry) and replaces the user's
/// profile fields, all inside a single time-budgeted transaction.
///
/// # Endpoint
///
/// ```text
/// PUT /v1/users/me/profile
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "industry": "tech-software-development",
///   "experience": 5,
///   "bio": "Backend engineer",
///   "skills": ["SQL", "Python"]
/// }
/// ```
///
/// # Errors
///
/// - 422 if the request body fails validation
/// - 404 if the user record does not exist yet
/// - 502 if insight generation fails
/// - 504 if the transaction exceeds its time budget
pub async fn update_profile(
    State(state): State<AppState>,
    principal: Option<Extension<Principal>>,
    Json(request): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileUpdateOutcome>> {
    request.validate()?;

    let principal = principal.as_ref().map(|ext| &ext.0);
    let outcome = state
        .profile
        .update_user_profile(principal, request.into())
        .await?;

    Ok(Json(outcome))
}
