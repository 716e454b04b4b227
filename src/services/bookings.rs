//! Bookings service: reservation lifecycle and notifications

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingDetails, BookingStats, CreateBooking},
        enums::BookingStatus,
    },
    repository::{bookings::NewBooking, Repository},
    services::email::EmailService,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    email: EmailService,
}

impl BookingsService {
    pub fn new(repository: Repository, email: EmailService) -> Self {
        Self { repository, email }
    }

    /// Create a confirmed booking for a user.
    ///
    /// Validates the slot instant, the game and its constraints, and
    /// rejects a slot that already carries a confirmed booking. The
    /// conflict check is best-effort read-then-write; no reservation lock
    /// is taken.
    pub async fn create(&self, user_id: i32, request: CreateBooking) -> AppResult<Booking> {
        let slot = DateTime::parse_from_rfc3339(&request.slot)
            .map_err(|_| AppError::Validation("Invalid booking date".to_string()))?
            .with_timezone(&Utc);

        if slot < Utc::now() {
            return Err(AppError::Validation("Cannot book past dates".to_string()));
        }

        let location = self.repository.locations.get_by_id(request.location_id).await?;

        let game = location
            .game(&request.game_code)
            .ok_or_else(|| AppError::NotFound(format!("Game {} not found", request.game_code)))?;

        if request.players < game.min_players || request.players > game.max_players {
            return Err(AppError::Validation(format!(
                "Players must be between {} and {}",
                game.min_players, game.max_players
            )));
        }

        if !game.languages.contains(&request.language) {
            let available: Vec<&str> = game.languages.iter().map(|l| l.as_str()).collect();
            return Err(AppError::Validation(format!(
                "This game is not available in the selected language. Available: {}",
                available.join(", ")
            )));
        }

        if self
            .repository
            .bookings
            .confirmed_exists(location.id, slot)
            .await?
        {
            return Err(AppError::Conflict("This time is already booked".to_string()));
        }

        let booking = self
            .repository
            .bookings
            .create(&NewBooking {
                user_id,
                location_id: location.id,
                game_code: request.game_code.clone(),
                slot,
                players: request.players,
                language: request.language,
                email: request.email.clone(),
            })
            .await?;

        // The reservation is committed; notification failures must not
        // roll it back
        let user = self.repository.users.get_by_id(user_id).await.ok();
        if let Err(e) = self
            .email
            .send_booking_confirmation(&booking.email, &location, game, &booking)
            .await
        {
            tracing::warn!("Failed to send booking confirmation: {}", e);
        }
        if let Err(e) = self
            .email
            .send_franchise_notification(&location, game, &booking, user.as_ref())
            .await
        {
            tracing::warn!("Failed to notify franchise: {}", e);
        }

        Ok(booking)
    }

    /// The caller's bookings with location context, newest slot first
    pub async fn user_bookings(&self, user_id: i32) -> AppResult<Vec<BookingDetails>> {
        self.repository.bookings.get_user_bookings(user_id).await
    }

    /// Cancel the caller's own confirmed booking and notify both sides
    pub async fn cancel(&self, booking_id: i32, user_id: i32) -> AppResult<Booking> {
        let booking = self
            .repository
            .bookings
            .cancel(booking_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Booking not found or already cancelled".to_string())
            })?;

        let user = self.repository.users.get_by_id(user_id).await?;
        let location = self.repository.locations.get_by_id(booking.location_id).await?;

        if let Err(e) = self.email.send_cancellation(&user.email, &location.name).await {
            tracing::warn!("Failed to send cancellation email: {}", e);
        }
        if let Err(e) = self
            .email
            .send_franchise_cancellation(&location.franchise_email, &location.name, booking.slot, &user)
            .await
        {
            tracing::warn!("Failed to notify franchise of cancellation: {}", e);
        }

        Ok(booking)
    }

    /// Per-user booking summary
    pub async fn stats_for_user(&self, user_id: i32) -> AppResult<BookingStats> {
        self.repository.bookings.stats_for_user(user_id).await
    }

    /// Admin listing with optional location and slot-range filters
    pub async fn admin_list(
        &self,
        location_id: Option<i32>,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<BookingDetails>> {
        self.repository
            .bookings
            .admin_list(location_id, date_from, date_to)
            .await
    }

    /// Set a booking's status (admin)
    pub async fn update_status(&self, id: i32, status: BookingStatus) -> AppResult<Booking> {
        self.repository.bookings.update_status(id, status).await
    }
}
