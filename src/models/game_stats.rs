//! Game session statistics models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::enums::GameLanguage;

/// A recorded quiz session result
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GameStats {
    pub id: i32,
    pub user_id: i32,
    pub location_id: i32,
    pub game_code: String,
    pub correct_answers: i32,
    pub total_questions: i32,
    /// Average answer time in seconds
    pub avg_response_time: Option<Decimal>,
    /// Session length in minutes
    pub completion_time: Option<i32>,
    pub language: GameLanguage,
    pub played_at: DateTime<Utc>,
    pub points: i32,
    pub created_at: DateTime<Utc>,
}

impl GameStats {
    /// Share of correct answers, as a percentage
    pub fn accuracy(&self) -> f64 {
        (self.correct_answers as f64 / self.total_questions as f64) * 100.0
    }
}

/// Record a finished session (sent by the game server)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveGameStats {
    pub user_id: i32,
    pub location_id: i32,
    #[validate(length(min = 1, message = "Game code is required"))]
    pub game_code: String,
    #[validate(range(min = 0, message = "correct_answers must be non-negative"))]
    pub correct_answers: i32,
    #[validate(range(min = 1, message = "total_questions must be at least 1"))]
    pub total_questions: i32,
    pub avg_response_time: Option<Decimal>,
    #[validate(range(min = 1, message = "completion_time must be at least 1 minute"))]
    pub completion_time: Option<i32>,
    /// Defaults to Russian when omitted
    pub language: Option<GameLanguage>,
    /// Defaults to now when omitted
    pub played_at: Option<DateTime<Utc>>,
    pub points: Option<i32>,
}

/// Aggregate figures across all of a user's sessions
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct GameStatsSummary {
    pub total_games: i64,
    pub total_correct: i64,
    pub total_questions: i64,
    /// Average per-session accuracy, percent, rounded to 2 decimals
    pub avg_accuracy: Option<f64>,
    /// Average session length in minutes, rounded to 2 decimals
    pub avg_completion_time: Option<f64>,
}

/// One recent session with its venue context
#[derive(Debug, Serialize, ToSchema)]
pub struct RecentGame {
    pub played_at: DateTime<Utc>,
    pub location_name: String,
    pub game_name: Option<String>,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub accuracy: f64,
    pub completion_time: Option<i32>,
}

/// The location a user books most often
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteLocation {
    pub location_id: i32,
    pub location_name: String,
    pub games_count: i64,
}

/// Full per-user statistics report
#[derive(Debug, Serialize, ToSchema)]
pub struct UserGameStats {
    #[serde(flatten)]
    pub summary: GameStatsSummary,
    pub last_games: Vec<RecentGame>,
    pub favorite_location: Option<FavoriteLocation>,
}

/// Admin statistics listing filters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AdminStatsQuery {
    pub location_id: Option<i32>,
    pub game_code: Option<String>,
    /// Sessions on or after this date (YYYY-MM-DD)
    pub date_from: Option<String>,
    /// Sessions on or before this date (YYYY-MM-DD)
    pub date_to: Option<String>,
}

/// One session row in the admin report
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminGameStatsEntry {
    pub id: i32,
    pub user_name: String,
    pub user_email: String,
    pub location_name: String,
    pub game_code: String,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub accuracy: f64,
    pub completion_time: Option<i32>,
    pub played_at: DateTime<Utc>,
}
