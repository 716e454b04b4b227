//! Repository layer for database operations

pub mod bookings;
pub mod game_stats;
pub mod locations;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub locations: locations::LocationsRepository,
    pub bookings: bookings::BookingsRepository,
    pub game_stats: game_stats::GameStatsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            locations: locations::LocationsRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            game_stats: game_stats::GameStatsRepository::new(pool.clone()),
            pool,
        }
    }
}
