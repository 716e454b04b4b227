//! Booking model, slots and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::enums::{BookingStatus, GameLanguage};

/// A reservation of one hourly slot at a location
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub location_id: i32,
    /// Game identifier within the location
    pub game_code: String,
    /// Reserved instant (top of an hour, UTC)
    pub slot: DateTime<Utc>,
    pub players: i32,
    pub language: GameLanguage,
    /// Contact email the confirmation was sent to
    pub email: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Location summary attached to booking listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookingLocation {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub price: Decimal,
}

/// User summary attached to admin booking listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookingUser {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Booking with its location (and, for admins, user) context
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub location: BookingLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<BookingUser>,
}

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub location_id: i32,
    #[validate(length(min = 1, message = "Game code is required"))]
    pub game_code: String,
    /// Slot instant, RFC 3339 (e.g. "2025-06-01T14:00:00Z")
    pub slot: String,
    #[validate(range(min = 1, message = "At least one player is required"))]
    pub players: i32,
    pub language: GameLanguage,
    #[validate(email(message = "Invalid contact email"))]
    pub email: String,
}

/// Booking creation response
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingCreated {
    pub booking_id: i32,
    pub message: String,
}

/// Update booking status request (admin)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingStatus {
    pub status: BookingStatus,
}

/// Admin booking listing filters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AdminBookingQuery {
    /// Restrict to one location
    pub location_id: Option<i32>,
    /// Slots on or after this date (YYYY-MM-DD)
    pub date_from: Option<String>,
    /// Slots on or before this date (YYYY-MM-DD)
    pub date_to: Option<String>,
}

/// Per-user booking summary
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingStats {
    pub total_bookings: i64,
    /// Confirmed bookings whose slot is still in the future
    pub upcoming_bookings: i64,
    pub last_booking_date: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// One bookable hour at a location on a given date.
///
/// Slots are derived values: computed on demand from working hours, current
/// bookings and the clock, and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Slot {
    /// Slot start (top of an hour, UTC)
    pub time: DateTime<Utc>,
    pub available: bool,
}

/// Query parameters for slot availability
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SlotQuery {
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
}
