//! Bookings repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{
            Booking, BookingDetails, BookingLocation, BookingStats, BookingUser,
        },
        enums::{BookingStatus, GameLanguage},
        game_stats::FavoriteLocation,
    },
};

/// Fields of a validated booking ready for insertion
pub struct NewBooking {
    pub user_id: i32,
    pub location_id: i32,
    pub game_code: String,
    pub slot: DateTime<Utc>,
    pub players: i32,
    pub language: GameLanguage,
    pub email: String,
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a confirmed booking
    pub async fn create(&self, booking: &NewBooking) -> AppResult<Booking> {
        let now = Utc::now();

        let created = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (user_id, location_id, game_code, slot, players, language,
                                  email, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'confirmed', $8, $8)
            RETURNING *
            "#,
        )
        .bind(booking.user_id)
        .bind(booking.location_id)
        .bind(&booking.game_code)
        .bind(booking.slot)
        .bind(booking.players)
        .bind(booking.language)
        .bind(&booking.email)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// A user's bookings with their location context, newest slot first
    pub async fn get_user_bookings(&self, user_id: i32) -> AppResult<Vec<BookingDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT b.*, l.name AS location_name, l.address AS location_address, l.price AS location_price
            FROM bookings b
            JOIN locations l ON b.location_id = l.id
            WHERE b.user_id = $1
            ORDER BY b.slot DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            result.push(BookingDetails {
                booking: Self::booking_from_row(&row),
                location: BookingLocation {
                    id: row.get("location_id"),
                    name: row.get("location_name"),
                    address: row.get("location_address"),
                    price: row.get("location_price"),
                },
                user: None,
            });
        }

        Ok(result)
    }

    /// Cancel a user's own confirmed booking.
    /// Returns `None` when no matching confirmed booking exists.
    pub async fn cancel(&self, id: i32, user_id: i32) -> AppResult<Option<Booking>> {
        let cancelled = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET status = 'cancelled', updated_at = $1
            WHERE id = $2 AND user_id = $3 AND status = 'confirmed'
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cancelled)
    }

    /// Whether a confirmed booking already occupies the exact slot instant
    pub async fn confirmed_exists(&self, location_id: i32, slot: DateTime<Utc>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE location_id = $1 AND slot = $2 AND status = 'confirmed'
            )
            "#,
        )
        .bind(location_id)
        .bind(slot)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Slot instants of confirmed bookings for a location within a time span
    /// (both bounds inclusive)
    pub async fn confirmed_slots(
        &self,
        location_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<DateTime<Utc>>> {
        let slots = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            SELECT slot FROM bookings
            WHERE location_id = $1 AND slot >= $2 AND slot <= $3 AND status = 'confirmed'
            ORDER BY slot
            "#,
        )
        .bind(location_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    /// Admin listing with optional location and slot-range filters
    pub async fn admin_list(
        &self,
        location_id: Option<i32>,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<BookingDetails>> {
        let mut conditions = Vec::new();
        let mut param_idx = 0;

        if location_id.is_some() {
            param_idx += 1;
            conditions.push(format!("b.location_id = ${}", param_idx));
        }
        if date_from.is_some() {
            param_idx += 1;
            conditions.push(format!("b.slot >= ${}", param_idx));
        }
        if date_to.is_some() {
            param_idx += 1;
            conditions.push(format!("b.slot <= ${}", param_idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            r#"
            SELECT b.*, l.name AS location_name, l.address AS location_address, l.price AS location_price,
                   u.name AS user_name, u.email AS user_email
            FROM bookings b
            JOIN locations l ON b.location_id = l.id
            JOIN users u ON b.user_id = u.id
            {}
            ORDER BY b.slot DESC
            "#,
            where_clause
        );

        let mut builder = sqlx::query(&query);
        if let Some(id) = location_id {
            builder = builder.bind(id);
        }
        if let Some(from) = date_from {
            builder = builder.bind(from);
        }
        if let Some(to) = date_to {
            builder = builder.bind(to);
        }

        let rows = builder.fetch_all(&self.pool).await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            result.push(BookingDetails {
                booking: Self::booking_from_row(&row),
                location: BookingLocation {
                    id: row.get("location_id"),
                    name: row.get("location_name"),
                    address: row.get("location_address"),
                    price: row.get("location_price"),
                },
                user: Some(BookingUser {
                    id: row.get("user_id"),
                    name: row.get("user_name"),
                    email: row.get("user_email"),
                }),
            });
        }

        Ok(result)
    }

    /// Set a booking's status (admin)
    pub async fn update_status(&self, id: i32, status: BookingStatus) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *",
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Per-user booking summary
    pub async fn stats_for_user(&self, user_id: i32) -> AppResult<BookingStats> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total_bookings,
                   COUNT(*) FILTER (WHERE status = 'confirmed' AND slot > NOW()) AS upcoming_bookings,
                   MAX(slot) AS last_booking_date
            FROM bookings WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(BookingStats {
            total_bookings: row.get("total_bookings"),
            upcoming_bookings: row.get("upcoming_bookings"),
            last_booking_date: row.get("last_booking_date"),
        })
    }

    /// Number of bookings a user has made
    pub async fn count_for_user(&self, user_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// When the user last created a booking
    pub async fn last_created(&self, user_id: i32) -> AppResult<Option<DateTime<Utc>>> {
        let last = sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT created_at FROM bookings WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(last)
    }

    /// The location the user has booked most often
    pub async fn favorite_location(&self, user_id: i32) -> AppResult<Option<FavoriteLocation>> {
        let row = sqlx::query(
            r#"
            SELECT b.location_id, l.name AS location_name, COUNT(*) AS games_count
            FROM bookings b
            JOIN locations l ON b.location_id = l.id
            WHERE b.user_id = $1
            GROUP BY b.location_id, l.name
            ORDER BY games_count DESC, b.location_id
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| FavoriteLocation {
            location_id: row.get("location_id"),
            location_name: row.get("location_name"),
            games_count: row.get("games_count"),
        }))
    }

    fn booking_from_row(row: &sqlx::postgres::PgRow) -> Booking {
        Booking {
            id: row.get("id"),
            user_id: row.get("user_id"),
            location_id: row.get("location_id"),
            game_code: row.get("game_code"),
            slot: row.get("slot"),
            players: row.get("players"),
            language: row.get("language"),
            email: row.get("email"),
            status: row.get("status"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}
