//! Game statistics service (session recording and aggregated reports)

use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    models::game_stats::{
        AdminGameStatsEntry, AdminStatsQuery, GameStats, RecentGame, SaveGameStats, UserGameStats,
    },
    repository::Repository,
    services::slots,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record a finished session (called by the game server)
    pub async fn save(&self, stats: SaveGameStats) -> AppResult<GameStats> {
        // Reject dangling references early for a clear error
        self.repository.users.get_by_id(stats.user_id).await?;
        self.repository.locations.get_by_id(stats.location_id).await?;

        self.repository.game_stats.insert(&stats).await
    }

    /// Full per-user report: aggregate figures, the last five sessions and
    /// the most-booked location
    pub async fn user_stats(&self, user_id: i32) -> AppResult<UserGameStats> {
        let summary = self.repository.game_stats.summary_for_user(user_id).await?;
        let last_games = self.repository.game_stats.recent_for_user(user_id, 5).await?;
        let favorite_location = self.repository.bookings.favorite_location(user_id).await?;

        Ok(UserGameStats {
            summary,
            last_games,
            favorite_location,
        })
    }

    /// A user's last ten sessions
    pub async fn user_history(&self, user_id: i32) -> AppResult<Vec<RecentGame>> {
        self.repository.game_stats.recent_for_user(user_id, 10).await
    }

    /// Admin report with optional filters
    pub async fn admin_search(&self, query: AdminStatsQuery) -> AppResult<Vec<AdminGameStatsEntry>> {
        let (date_from, date_to) = parse_date_range(&query.date_from, &query.date_to)?;

        self.repository
            .game_stats
            .admin_search(query.location_id, query.game_code.as_deref(), date_from, date_to)
            .await
    }
}

/// Turn optional `YYYY-MM-DD` bounds into an inclusive UTC timestamp range
pub fn parse_date_range(
    from: &Option<String>,
    to: &Option<String>,
) -> AppResult<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
    let from = match from {
        Some(s) => Some(slots::day_span(slots::parse_slot_date(s)?).0),
        None => None,
    };
    let to = match to {
        Some(s) => Some(slots::day_span(slots::parse_slot_date(s)?).1),
        None => None,
    };
    Ok((from, to))
}
