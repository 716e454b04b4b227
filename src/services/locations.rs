//! Locations service (venues, working hours, games)

use crate::{
    error::{AppError, AppResult},
    models::location::{CreateGame, CreateLocation, Location, UpdateLocation, WorkingHours},
    repository::Repository,
};

#[derive(Clone)]
pub struct LocationsService {
    repository: Repository,
}

impl LocationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Active locations for the public catalog
    pub async fn list_active(&self) -> AppResult<Vec<Location>> {
        self.repository.locations.list_active().await
    }

    /// Get location by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Location> {
        self.repository.locations.get_by_id(id).await
    }

    /// Create a new location (admin)
    pub async fn create(&self, location: CreateLocation) -> AppResult<Location> {
        Self::validate_working_hours(&location.working_hours)?;
        Self::validate_games(&location.games)?;

        self.repository.locations.create(&location).await
    }

    /// Update an existing location (admin)
    pub async fn update(&self, id: i32, update: UpdateLocation) -> AppResult<Location> {
        if let Some(ref hours) = update.working_hours {
            Self::validate_working_hours(hours)?;
        }
        if let Some(ref games) = update.games {
            Self::validate_games(games)?;
        }

        self.repository.locations.update(id, &update).await
    }

    fn validate_working_hours(hours: &[WorkingHours]) -> AppResult<()> {
        for wh in hours {
            wh.validate()?;
        }
        Ok(())
    }

    fn validate_games(games: &[CreateGame]) -> AppResult<()> {
        for game in games {
            if game.min_players > game.max_players {
                return Err(AppError::Validation(format!(
                    "Game {}: min_players exceeds max_players",
                    game.code
                )));
            }
        }
        Ok(())
    }
}
