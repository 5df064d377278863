//! Booking endpoints: listings over the joined display view plus the
//! lifecycle operations, which all go through the engine.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::{Booking, BookingWithDetails, CreateBookingRequest};
use crate::engine::bookings as lifecycle;
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_date, validate_uuid};

const BOOKING_DETAILS_SELECT: &str = r#"
    SELECT b.*, r.room_number, r.room_type,
           g.full_name AS guest_name, g.phone AS guest_phone
    FROM bookings b
    JOIN rooms r ON b.room_id = r.id
    JOIN guests g ON b.guest_id = g.id
"#;

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    /// Case-insensitive substring match over guest name and room number
    pub q: Option<String>,
    /// Filter by booking status (e.g. `active`)
    pub status: Option<String>,
}

/// List bookings with joined room/guest display fields.
///
/// Active-only listings are ordered by check-in; everything else by
/// creation time, newest first.
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<BookingWithDetails>>, ApiError> {
    let bookings = if let Some(q) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let pattern = format!("%{}%", q);
        let sql = format!(
            "{} WHERE g.full_name LIKE ? OR r.room_number LIKE ? ORDER BY b.created_at DESC",
            BOOKING_DETAILS_SELECT
        );
        sqlx::query_as(&sql)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&state.db)
            .await?
    } else if let Some(status) = query.status.as_deref() {
        let order = if status == "active" {
            "ORDER BY b.check_in"
        } else {
            "ORDER BY b.created_at DESC"
        };
        let sql = format!("{} WHERE b.status = ? {}", BOOKING_DETAILS_SELECT, order);
        sqlx::query_as(&sql)
            .bind(status)
            .fetch_all(&state.db)
            .await?
    } else {
        let sql = format!("{} ORDER BY b.created_at DESC", BOOKING_DETAILS_SELECT);
        sqlx::query_as(&sql).fetch_all(&state.db).await?
    };

    Ok(Json(bookings))
}

/// Get a single booking with display fields
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookingWithDetails>, ApiError> {
    let booking = fetch_booking_details(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;
    Ok(Json(booking))
}

pub(super) async fn fetch_booking_details(
    pool: &sqlx::SqlitePool,
    id: &str,
) -> Result<Option<BookingWithDetails>, sqlx::Error> {
    let sql = format!("{} WHERE b.id = ?", BOOKING_DETAILS_SELECT);
    sqlx::query_as(&sql).bind(id).fetch_optional(pool).await
}

/// Create a booking
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_uuid(&req.room_id, "room_id") {
        errors.add("room_id", e);
    }
    if let Err(e) = validate_uuid(&req.guest_id, "guest_id") {
        errors.add("guest_id", e);
    }
    if let Err(e) = validate_date(&req.check_in, "check_in") {
        errors.add("check_in", e);
    }
    if let Err(e) = validate_date(&req.check_out, "check_out") {
        errors.add("check_out", e);
    }
    errors.finish()?;

    let booking = lifecycle::create_booking(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Cancel a booking and free its room
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    let booking = lifecycle::cancel_booking(&state.db, &id).await?;
    Ok(Json(booking))
}

/// Check a booking out and free its room
pub async fn checkout_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    let booking = lifecycle::checkout_booking(&state.db, &id).await?;
    Ok(Json(booking))
}
