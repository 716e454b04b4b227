//! User profile endpoints

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{CompleteOnboarding, Profile, UpdateProfile, User, UserStats},
};

use super::AuthenticatedUser;

/// Get the caller's profile with booking counters
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile", body = Profile),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Profile>> {
    let profile = state.services.users.get_profile(claims.user_id).await?;
    Ok(Json(profile))
}

/// Update the caller's profile
#[utoipa::path(
    put,
    path = "/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = User),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn update_profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UpdateProfile>,
) -> AppResult<Json<User>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state
        .services
        .users
        .update_profile(claims.user_id, request)
        .await?;
    Ok(Json(user))
}

/// Complete onboarding (username + profile details)
#[utoipa::path(
    post,
    path = "/users/me/onboarding",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CompleteOnboarding,
    responses(
        (status = 200, description = "Onboarding completed", body = User),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn complete_onboarding(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CompleteOnboarding>,
) -> AppResult<Json<User>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state
        .services
        .users
        .complete_onboarding(claims.user_id, request)
        .await?;
    Ok(Json(user))
}

/// Booking-derived activity summary for the caller
#[utoipa::path(
    get,
    path = "/users/me/stats",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Activity summary", body = UserStats),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_user_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UserStats>> {
    let stats = state.services.users.user_stats(claims.user_id).await?;
    Ok(Json(stats))
}
