//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{AuthResponse, ForgotPassword, Login, Register, User},
};

use super::AuthenticatedUser;

/// Reset-password request (token from the emailed link)
#[derive(Deserialize, Validate, ToSchema)]
pub struct ResetPassword {
    pub token: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Simple acknowledgement response
#[derive(Serialize, ToSchema)]
pub struct Acknowledged {
    pub success: bool,
    pub message: String,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = Register,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid email or password"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<Register>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (token, user) = state.services.users.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user_id: user.id,
            message: Some("Registration successful. Complete onboarding in your profile.".to_string()),
        }),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = Login,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Unknown email or wrong password")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<Login>,
) -> AppResult<Json<AuthResponse>> {
    let (token, user) = state.services.users.login(request).await?;

    Ok(Json(AuthResponse {
        token,
        user_id: user.id,
        message: None,
    }))
}

/// Request a password-reset link by email
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = "auth",
    request_body = ForgotPassword,
    responses(
        (status = 200, description = "Reset link sent", body = Acknowledged),
        (status = 404, description = "No account with this email")
    )
)]
pub async fn forgot_password(
    State(state): State<crate::AppState>,
    Json(request): Json<ForgotPassword>,
) -> AppResult<Json<Acknowledged>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    state.services.users.forgot_password(&request.email).await?;

    Ok(Json(Acknowledged {
        success: true,
        message: "A password reset link has been sent to your email".to_string(),
    }))
}

/// Set a new password using a reset token
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = "auth",
    request_body = ResetPassword,
    responses(
        (status = 200, description = "Password updated", body = Acknowledged),
        (status = 401, description = "Invalid or expired token")
    )
)]
pub async fn reset_password(
    State(state): State<crate::AppState>,
    Json(request): Json<ResetPassword>,
) -> AppResult<Json<Acknowledged>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    state
        .services
        .users
        .reset_password(&request.token, &request.password)
        .await?;

    Ok(Json(Acknowledged {
        success: true,
        message: "Password has been updated".to_string(),
    }))
}

/// Current authenticated user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<User>> {
    let user = state.services.users.get_by_id(claims.user_id).await?;
    Ok(Json(user))
}

/// Log out (stateless tokens; acknowledgement only)
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logged out", body = Acknowledged)
    )
)]
pub async fn logout(AuthenticatedUser(_claims): AuthenticatedUser) -> Json<Acknowledged> {
    Json(Acknowledged {
        success: true,
        message: "Successfully logged out".to_string(),
    })
}
