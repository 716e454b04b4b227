//! Location model and related types (venues, working hours, games)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::enums::GameLanguage;

// ---------------------------------------------------------------------------
// WorkingHours
// ---------------------------------------------------------------------------

/// One weekday's opening range for a location.
///
/// `day` uses 0=Sunday..6=Saturday; `from`/`to` are whole hours and the
/// bookable range is the half-open interval `[from, to)`. A weekday with no
/// entry means the location is closed that day. When duplicate entries exist
/// for a day, the first one (insertion order) wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WorkingHours {
    /// Day of week (0=Sunday, 6=Saturday)
    pub day: i16,
    /// Opening hour (0-23)
    #[sqlx(rename = "from_hour")]
    pub from: i16,
    /// Closing hour (0-23), excluded from the bookable range
    #[sqlx(rename = "to_hour")]
    pub to: i16,
}

impl WorkingHours {
    /// Validate shape at the location-write boundary
    pub fn validate(&self) -> AppResult<()> {
        if !(0..=6).contains(&self.day) {
            return Err(AppError::Validation(format!(
                "Working hours day must be 0-6, got {}",
                self.day
            )));
        }
        if !(0..=23).contains(&self.from) || !(0..=23).contains(&self.to) {
            return Err(AppError::Validation(
                "Working hours must use hours in 0-23".to_string(),
            ));
        }
        if self.from >= self.to {
            return Err(AppError::Validation(format!(
                "Working hours must open before they close ({} >= {})",
                self.from, self.to
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// A quiz game offered at a location
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Game {
    /// Game identifier, unique within its location
    pub code: String,
    pub name: String,
    /// Session duration in minutes
    pub duration: i32,
    pub min_players: i32,
    pub max_players: i32,
    /// Languages the game can be played in
    pub languages: Vec<GameLanguage>,
}

/// Internal row structure for game queries
#[derive(Debug, Clone, FromRow)]
pub struct GameRow {
    pub location_id: i32,
    pub code: String,
    pub name: String,
    pub duration_minutes: i32,
    pub min_players: i32,
    pub max_players: i32,
    pub languages: Vec<String>,
}

impl From<GameRow> for Game {
    fn from(row: GameRow) -> Self {
        Game {
            code: row.code,
            name: row.name,
            duration: row.duration_minutes,
            min_players: row.min_players,
            max_players: row.max_players,
            languages: row
                .languages
                .iter()
                .filter_map(|l| l.parse().ok())
                .collect(),
        }
    }
}

/// Create/replace game request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGame {
    #[validate(length(min = 1, message = "Game code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Game name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "Duration must be positive"))]
    pub duration: i32,
    #[validate(range(min = 1, message = "min_players must be positive"))]
    pub min_players: i32,
    #[validate(range(min = 1, message = "max_players must be positive"))]
    pub max_players: i32,
    /// Defaults to Russian when omitted
    pub languages: Option<Vec<GameLanguage>>,
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Internal row structure for location queries
#[derive(Debug, Clone, FromRow)]
pub struct LocationRow {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub capacity: i32,
    pub franchise_email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full location model (row plus attached working hours and games)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub capacity: i32,
    pub franchise_email: String,
    pub working_hours: Vec<WorkingHours>,
    pub games: Vec<Game>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    pub fn from_parts(row: LocationRow, working_hours: Vec<WorkingHours>, games: Vec<Game>) -> Self {
        Location {
            id: row.id,
            name: row.name,
            country: row.country,
            city: row.city,
            address: row.address,
            description: row.description,
            price: row.price,
            capacity: row.capacity,
            franchise_email: row.franchise_email,
            working_hours,
            games,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    /// Find a game by its code
    pub fn game(&self, code: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.code == code)
    }
}

/// Create location request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLocation {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub description: Option<String>,
    pub price: Decimal,
    #[validate(range(min = 1, message = "Capacity must be positive"))]
    pub capacity: i32,
    #[validate(email(message = "Invalid franchise email"))]
    pub franchise_email: String,
    #[serde(default)]
    pub working_hours: Vec<WorkingHours>,
    #[serde(default)]
    #[validate(nested)]
    pub games: Vec<CreateGame>,
}

/// Update location request; omitted fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub capacity: Option<i32>,
    #[validate(email(message = "Invalid franchise email"))]
    pub franchise_email: Option<String>,
    pub is_active: Option<bool>,
    /// When present, replaces the full working-hours set
    pub working_hours: Option<Vec<WorkingHours>>,
    /// When present, replaces the full game catalog
    #[validate(nested)]
    pub games: Option<Vec<CreateGame>>,
}
