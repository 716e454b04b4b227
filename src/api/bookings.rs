//! Booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::booking::{
        Booking, BookingCreated, BookingDetails, BookingStats, CreateBooking, Slot, SlotQuery,
    },
};

use super::AuthenticatedUser;

/// Create a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = BookingCreated),
        (status = 400, description = "Invalid booking data"),
        (status = 404, description = "Location or game not found"),
        (status = 409, description = "Slot already booked")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingCreated>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let booking = state
        .services
        .bookings
        .create(claims.user_id, request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingCreated {
            booking_id: booking.id,
            message: "Booking confirmed".to_string(),
        }),
    ))
}

/// The caller's bookings, newest slot first
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bookings with location context", body = Vec<BookingDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_user_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.services.bookings.user_bookings(claims.user_id).await?;
    Ok(Json(bookings))
}

/// Cancel the caller's own confirmed booking
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = Booking),
        (status = 404, description = "Booking not found or already cancelled")
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.cancel(id, claims.user_id).await?;
    Ok(Json(booking))
}

/// Bookable slots for a location on a date (booking-flow route)
#[utoipa::path(
    get,
    path = "/bookings/locations/{location_id}/slots",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("location_id" = i32, Path, description = "Location ID"),
        SlotQuery
    ),
    responses(
        (status = 200, description = "Slots in ascending time order (empty when closed)", body = Vec<Slot>),
        (status = 400, description = "Malformed date"),
        (status = 404, description = "Location not found")
    )
)]
pub async fn get_available_slots(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(location_id): Path<i32>,
    Query(query): Query<SlotQuery>,
) -> AppResult<Json<Vec<Slot>>> {
    let slots = state
        .services
        .slots
        .get_available_slots(location_id, &query.date)
        .await?;
    Ok(Json(slots))
}

/// The caller's booking summary
#[utoipa::path(
    get,
    path = "/bookings/stats",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Booking summary", body = BookingStats),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_booking_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<BookingStats>> {
    let stats = state.services.bookings.stats_for_user(claims.user_id).await?;
    Ok(Json(stats))
}
