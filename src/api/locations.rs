//! Location endpoints (catalog, management, slot availability)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Slot, SlotQuery},
        location::{CreateLocation, Location, UpdateLocation},
    },
};

use super::AuthenticatedUser;

/// List active locations
#[utoipa::path(
    get,
    path = "/locations",
    tag = "locations",
    responses(
        (status = 200, description = "Active locations", body = Vec<Location>)
    )
)]
pub async fn list_locations(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Location>>> {
    let locations = state.services.locations.list_active().await?;
    Ok(Json(locations))
}

/// Get location by ID
#[utoipa::path(
    get,
    path = "/locations/{id}",
    tag = "locations",
    params(
        ("id" = i32, Path, description = "Location ID")
    ),
    responses(
        (status = 200, description = "Location details", body = Location),
        (status = 404, description = "Location not found")
    )
)]
pub async fn get_location(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Location>> {
    let location = state.services.locations.get_by_id(id).await?;
    Ok(Json(location))
}

/// Create a new location (admin)
#[utoipa::path(
    post,
    path = "/locations",
    tag = "locations",
    security(("bearer_auth" = [])),
    request_body = CreateLocation,
    responses(
        (status = 201, description = "Location created", body = Location),
        (status = 400, description = "Invalid location data"),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn create_location(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateLocation>,
) -> AppResult<(StatusCode, Json<Location>)> {
    claims.require_admin()?;

    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let location = state.services.locations.create(request).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

/// Update an existing location (admin)
#[utoipa::path(
    put,
    path = "/locations/{id}",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Location ID")
    ),
    request_body = UpdateLocation,
    responses(
        (status = 200, description = "Location updated", body = Location),
        (status = 400, description = "Invalid update data"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Location not found")
    )
)]
pub async fn update_location(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateLocation>,
) -> AppResult<Json<Location>> {
    claims.require_admin()?;

    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let location = state.services.locations.update(id, request).await?;
    Ok(Json(location))
}

/// Bookable slots for a location on a date
#[utoipa::path(
    get,
    path = "/locations/{id}/slots",
    tag = "locations",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Location ID"),
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
    Path(id): Path<i32>,
    Query(query): Query<SlotQuery>,
) -> AppResult<Json<Vec<Slot>>> {
    let slots = state
        .services
        .slots
        .get_available_slots(id, &query.date)
        .await?;
    Ok(Json(slots))
}
