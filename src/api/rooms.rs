//! Room endpoints: the fixed grid is listed and edited, never created or
//! deleted. Status changes outside the booking lifecycle go through the
//! manual override.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::db::{Room, UpdateRoomRequest, UpdateRoomStatusRequest, User};
use crate::engine::bookings::override_room_status;
use crate::AppState;

use super::auth::require_admin;
use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::validate_price;

/// List all rooms ordered by room number
pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Room>>, ApiError> {
    let rooms = sqlx::query_as("SELECT * FROM rooms ORDER BY room_number")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(rooms))
}

/// Get a single room
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Room>, ApiError> {
    let room: Option<Room> = sqlx::query_as("SELECT * FROM rooms WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?;
    room.map(Json).ok_or_else(|| ApiError::not_found("Room not found"))
}

/// Update a room's type, nightly price, or description.
///
/// Price changes apply to future bookings only; existing bookings keep
/// their frozen totals.
pub async fn update_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateRoomRequest>,
) -> Result<Json<Room>, ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Some(price) = req.price_per_night {
        if let Err(e) = validate_price(price) {
            errors.add("price_per_night", e);
        }
    }
    errors.finish()?;

    let existing: Option<Room> = sqlx::query_as("SELECT * FROM rooms WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_none() {
        return Err(ApiError::not_found("Room not found"));
    }

    sqlx::query(
        r#"
        UPDATE rooms SET
            room_type = COALESCE(?, room_type),
            price_per_night = COALESCE(?, price_per_night),
            description = COALESCE(?, description)
        WHERE id = ?
        "#,
    )
    .bind(&req.room_type)
    .bind(req.price_per_night)
    .bind(&req.description)
    .bind(&id)
    .execute(&state.db)
    .await?;

    let room = sqlx::query_as("SELECT * FROM rooms WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;
    Ok(Json(room))
}

/// Manual status override (admin only). Does not inspect or cancel
/// bookings against the room.
pub async fn update_room_status(
    State(state): State<Arc<AppState>>,
    user: User,
    Path(id): Path<String>,
    Json(req): Json<UpdateRoomStatusRequest>,
) -> Result<Json<Room>, ApiError> {
    require_admin(&user)?;

    let room = override_room_status(&state.db, &id, req.status).await?;
    Ok(Json(room))
}
