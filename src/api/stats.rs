//! Game statistics endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::game_stats::{
        AdminGameStatsEntry, AdminStatsQuery, GameStats, RecentGame, SaveGameStats, UserGameStats,
    },
};

use super::AuthenticatedUser;

/// Record a finished game session (called by the game server)
#[utoipa::path(
    post,
    path = "/stats",
    tag = "stats",
    request_body = SaveGameStats,
    responses(
        (status = 201, description = "Session recorded", body = GameStats),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "User or location not found")
    )
)]
pub async fn save_game_stats(
    State(state): State<crate::AppState>,
    Json(request): Json<SaveGameStats>,
) -> AppResult<(StatusCode, Json<GameStats>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let stats = state.services.stats.save(request).await?;
    Ok((StatusCode::CREATED, Json(stats)))
}

/// The caller's aggregated game statistics
#[utoipa::path(
    get,
    path = "/stats/me",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Aggregated statistics", body = UserGameStats),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_user_game_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UserGameStats>> {
    let stats = state.services.stats.user_stats(claims.user_id).await?;
    Ok(Json(stats))
}

/// The caller's recent game history
#[utoipa::path(
    get,
    path = "/stats/me/games",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Last sessions, newest first", body = Vec<RecentGame>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_user_game_history(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<RecentGame>>> {
    let games = state.services.stats.user_history(claims.user_id).await?;
    Ok(Json(games))
}

/// Full statistics report with filters (admin)
#[utoipa::path(
    get,
    path = "/stats/admin",
    tag = "stats",
    security(("bearer_auth" = [])),
    params(AdminStatsQuery),
    responses(
        (status = 200, description = "Sessions with user and location context", body = Vec<AdminGameStatsEntry>),
        (status = 400, description = "Malformed date filter"),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn get_admin_game_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AdminStatsQuery>,
) -> AppResult<Json<Vec<AdminGameStatsEntry>>> {
    claims.require_admin()?;

    let stats = state.services.stats.admin_search(query).await?;
    Ok(Json(stats))
}
