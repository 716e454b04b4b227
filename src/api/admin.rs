//! Administration endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        booking::{AdminBookingQuery, Booking, BookingDetails, UpdateBookingStatus},
        user::User,
    },
    services::stats::parse_date_range,
};

use super::AuthenticatedUser;

/// List all users (admin)
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<User>>> {
    claims.require_admin()?;

    let users = state.services.users.list().await?;
    Ok(Json(users))
}

/// List bookings with optional filters (admin)
#[utoipa::path(
    get,
    path = "/admin/bookings",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(AdminBookingQuery),
    responses(
        (status = 200, description = "Bookings with user and location context", body = Vec<BookingDetails>),
        (status = 400, description = "Malformed date filter"),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AdminBookingQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    claims.require_admin()?;

    let (date_from, date_to) = parse_date_range(&query.date_from, &query.date_to)?;
    let bookings = state
        .services
        .bookings
        .admin_list(query.location_id, date_from, date_to)
        .await?;
    Ok(Json(bookings))
}

/// Set a booking's status (admin)
#[utoipa::path(
    patch,
    path = "/admin/bookings/{id}/status",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingStatus,
    responses(
        (status = 200, description = "Booking updated", body = Booking),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn update_booking_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateBookingStatus>,
) -> AppResult<Json<Booking>> {
    claims.require_admin()?;

    let booking = state
        .services
        .bookings
        .update_status(id, request.status)
        .await?;
    Ok(Json(booking))
}
