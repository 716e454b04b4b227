//! Game statistics repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::AppResult,
    models::{
        enums::GameLanguage,
        game_stats::{
            AdminGameStatsEntry, GameStats, GameStatsSummary, RecentGame, SaveGameStats,
        },
    },
};

#[derive(Clone)]
pub struct GameStatsRepository {
    pool: Pool<Postgres>,
}

impl GameStatsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Record a finished session
    pub async fn insert(&self, stats: &SaveGameStats) -> AppResult<GameStats> {
        let now = Utc::now();

        let created = sqlx::query_as::<_, GameStats>(
            r#"
            INSERT INTO game_stats (user_id, location_id, game_code, correct_answers,
                                    total_questions, avg_response_time, completion_time,
                                    language, played_at, points, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(stats.user_id)
        .bind(stats.location_id)
        .bind(&stats.game_code)
        .bind(stats.correct_answers)
        .bind(stats.total_questions)
        .bind(stats.avg_response_time)
        .bind(stats.completion_time)
        .bind(stats.language.unwrap_or(GameLanguage::Ru))
        .bind(stats.played_at.unwrap_or(now))
        .bind(stats.points.unwrap_or(0))
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Aggregate figures across all of a user's sessions
    pub async fn summary_for_user(&self, user_id: i32) -> AppResult<GameStatsSummary> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total_games,
                   COALESCE(SUM(correct_answers), 0) AS total_correct,
                   COALESCE(SUM(total_questions), 0) AS total_questions,
                   ROUND(AVG(correct_answers::numeric / total_questions * 100), 2)::float8 AS avg_accuracy,
                   ROUND(AVG(completion_time), 2)::float8 AS avg_completion_time
            FROM game_stats WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(GameStatsSummary {
            total_games: row.get("total_games"),
            total_correct: row.get("total_correct"),
            total_questions: row.get("total_questions"),
            avg_accuracy: row.get("avg_accuracy"),
            avg_completion_time: row.get("avg_completion_time"),
        })
    }

    /// A user's most recent sessions with venue context, newest first
    pub async fn recent_for_user(&self, user_id: i32, limit: i64) -> AppResult<Vec<RecentGame>> {
        let rows = sqlx::query(
            r#"
            SELECT gs.played_at, gs.correct_answers, gs.total_questions, gs.completion_time,
                   l.name AS location_name, g.name AS game_name,
                   ROUND(gs.correct_answers::numeric / gs.total_questions * 100, 2)::float8 AS accuracy
            FROM game_stats gs
            JOIN locations l ON gs.location_id = l.id
            LEFT JOIN games g ON g.location_id = gs.location_id AND g.code = gs.game_code
            WHERE gs.user_id = $1
            ORDER BY gs.played_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| RecentGame {
                played_at: row.get("played_at"),
                location_name: row.get("location_name"),
                game_name: row.get("game_name"),
                correct_answers: row.get("correct_answers"),
                total_questions: row.get("total_questions"),
                accuracy: row.get("accuracy"),
                completion_time: row.get("completion_time"),
            })
            .collect())
    }

    /// Admin report with optional location/game/date-range filters
    pub async fn admin_search(
        &self,
        location_id: Option<i32>,
        game_code: Option<&str>,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<AdminGameStatsEntry>> {
        let mut conditions = Vec::new();
        let mut param_idx = 0;

        if location_id.is_some() {
            param_idx += 1;
            conditions.push(format!("gs.location_id = ${}", param_idx));
        }
        if game_code.is_some() {
            param_idx += 1;
            conditions.push(format!("gs.game_code = ${}", param_idx));
        }
        if date_from.is_some() {
            param_idx += 1;
            conditions.push(format!("gs.played_at >= ${}", param_idx));
        }
        if date_to.is_some() {
            param_idx += 1;
            conditions.push(format!("gs.played_at <= ${}", param_idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            r#"
            SELECT gs.id, gs.game_code, gs.correct_answers, gs.total_questions,
                   gs.completion_time, gs.played_at,
                   u.name AS user_name, u.email AS user_email,
                   l.name AS location_name,
                   ROUND(gs.correct_answers::numeric / gs.total_questions * 100, 2)::float8 AS accuracy
            FROM game_stats gs
            JOIN users u ON gs.user_id = u.id
            JOIN locations l ON gs.location_id = l.id
            {}
            ORDER BY gs.played_at DESC
            "#,
            where_clause
        );

        let mut builder = sqlx::query(&query);
        if let Some(id) = location_id {
            builder = builder.bind(id);
        }
        if let Some(code) = game_code {
            builder = builder.bind(code.to_string());
        }
        if let Some(from) = date_from {
            builder = builder.bind(from);
        }
        if let Some(to) = date_to {
            builder = builder.bind(to);
        }

        let rows = builder.fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|row| AdminGameStatsEntry {
                id: row.get("id"),
                user_name: row.get("user_name"),
                user_email: row.get("user_email"),
                location_name: row.get("location_name"),
                game_code: row.get("game_code"),
                correct_answers: row.get("correct_answers"),
                total_questions: row.get("total_questions"),
                accuracy: row.get("accuracy"),
                completion_time: row.get("completion_time"),
                played_at: row.get("played_at"),
            })
            .collect())
    }
}
