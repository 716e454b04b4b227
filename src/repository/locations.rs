//! Locations repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::location::{
        CreateGame, CreateLocation, Game, GameRow, Location, LocationRow, UpdateLocation,
        WorkingHours,
    },
};

#[derive(Clone)]
pub struct LocationsRepository {
    pool: Pool<Postgres>,
}

impl LocationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get location by ID with its working hours and games
    pub async fn get_by_id(&self, id: i32) -> AppResult<Location> {
        let row = sqlx::query_as::<_, LocationRow>("SELECT * FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location with id {} not found", id)))?;

        let working_hours = self.get_working_hours_rows(id).await?;
        let games = self.get_games(id).await?;

        Ok(Location::from_parts(row, working_hours, games))
    }

    /// List active locations with their working hours and games
    pub async fn list_active(&self) -> AppResult<Vec<Location>> {
        let rows = sqlx::query_as::<_, LocationRow>(
            "SELECT * FROM locations WHERE is_active = true ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut locations = Vec::with_capacity(rows.len());
        for row in rows {
            let working_hours = self.get_working_hours_rows(row.id).await?;
            let games = self.get_games(row.id).await?;
            locations.push(Location::from_parts(row, working_hours, games));
        }

        Ok(locations)
    }

    /// Working hours for a location, in insertion (precedence) order.
    /// Returns `None` when the location itself does not exist.
    pub async fn get_working_hours(&self, id: i32) -> AppResult<Option<Vec<WorkingHours>>> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM locations WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        if !exists {
            return Ok(None);
        }

        Ok(Some(self.get_working_hours_rows(id).await?))
    }

    async fn get_working_hours_rows(&self, location_id: i32) -> AppResult<Vec<WorkingHours>> {
        let hours = sqlx::query_as::<_, WorkingHours>(
            "SELECT day, from_hour, to_hour FROM working_hours WHERE location_id = $1 ORDER BY id",
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(hours)
    }

    async fn get_games(&self, location_id: i32) -> AppResult<Vec<Game>> {
        let games = sqlx::query_as::<_, GameRow>(
            r#"
            SELECT location_id, code, name, duration_minutes, min_players, max_players, languages
            FROM games WHERE location_id = $1 ORDER BY id
            "#,
        )
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(games.into_iter().map(Into::into).collect())
    }

    /// Create a new location with its working hours and games
    pub async fn create(&self, location: &CreateLocation) -> AppResult<Location> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO locations (name, country, city, address, description, price, capacity,
                                   franchise_email, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, true, $9, $9)
            RETURNING id
            "#,
        )
        .bind(&location.name)
        .bind(&location.country)
        .bind(&location.city)
        .bind(&location.address)
        .bind(&location.description)
        .bind(location.price)
        .bind(location.capacity)
        .bind(&location.franchise_email)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for wh in &location.working_hours {
            sqlx::query(
                "INSERT INTO working_hours (location_id, day, from_hour, to_hour) VALUES ($1, $2, $3, $4)",
            )
            .bind(id)
            .bind(wh.day)
            .bind(wh.from)
            .bind(wh.to)
            .execute(&mut *tx)
            .await?;
        }

        for game in &location.games {
            Self::insert_game(&mut tx, id, game).await?;
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Update an existing location; working hours and games are replaced
    /// wholesale when present in the request
    pub async fn update(&self, id: i32, update: &UpdateLocation) -> AppResult<Location> {
        // Ensure the location exists before touching child tables
        self.get_by_id(id).await?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE locations SET
                name = COALESCE($1, name),
                country = COALESCE($2, country),
                city = COALESCE($3, city),
                address = COALESCE($4, address),
                description = COALESCE($5, description),
                price = COALESCE($6, price),
                capacity = COALESCE($7, capacity),
                franchise_email = COALESCE($8, franchise_email),
                is_active = COALESCE($9, is_active),
                updated_at = $10
            WHERE id = $11
            "#,
        )
        .bind(&update.name)
        .bind(&update.country)
        .bind(&update.city)
        .bind(&update.address)
        .bind(&update.description)
        .bind(update.price)
        .bind(update.capacity)
        .bind(&update.franchise_email)
        .bind(update.is_active)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if let Some(ref hours) = update.working_hours {
            sqlx::query("DELETE FROM working_hours WHERE location_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for wh in hours {
                sqlx::query(
                    "INSERT INTO working_hours (location_id, day, from_hour, to_hour) VALUES ($1, $2, $3, $4)",
                )
                .bind(id)
                .bind(wh.day)
                .bind(wh.from)
                .bind(wh.to)
                .execute(&mut *tx)
                .await?;
            }
        }

        if let Some(ref games) = update.games {
            sqlx::query("DELETE FROM games WHERE location_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for game in games {
                Self::insert_game(&mut tx, id, game).await?;
            }
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    async fn insert_game(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        location_id: i32,
        game: &CreateGame,
    ) -> AppResult<()> {
        let languages: Vec<String> = game
            .languages
            .clone()
            .unwrap_or_else(|| vec![crate::models::enums::GameLanguage::Ru])
            .iter()
            .map(|l| l.as_str().to_string())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO games (location_id, code, name, duration_minutes, min_players, max_players, languages)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(location_id)
        .bind(&game.code)
        .bind(&game.name)
        .bind(game.duration)
        .bind(game.min_players)
        .bind(game.max_players)
        .bind(&languages)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
