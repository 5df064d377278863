//! Guest endpoints.
//!
//! No uniqueness constraint on names or phone numbers; walk-ins may
//! share contact info. Deletion is refused while bookings reference the
//! guest.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::{CreateGuestRequest, Guest, UpdateGuestRequest};
use crate::AppState;

use super::error::ApiError;
use super::validation::validate_guest_name;

#[derive(Debug, Deserialize)]
pub struct GuestListQuery {
    /// Case-insensitive substring match over name, phone, and national id
    pub q: Option<String>,
}

/// List guests, optionally filtered by a search query
pub async fn list_guests(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GuestListQuery>,
) -> Result<Json<Vec<Guest>>, ApiError> {
    let guests = match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => {
            let pattern = format!("%{}%", q);
            sqlx::query_as(
                r#"
                SELECT * FROM guests
                WHERE full_name LIKE ? OR phone LIKE ? OR national_id LIKE ?
                ORDER BY full_name
                "#,
            )
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&state.db)
            .await?
        }
        None => {
            sqlx::query_as("SELECT * FROM guests ORDER BY full_name")
                .fetch_all(&state.db)
                .await?
        }
    };
    Ok(Json(guests))
}

/// Get a single guest
pub async fn get_guest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Guest>, ApiError> {
    let guest: Option<Guest> = sqlx::query_as("SELECT * FROM guests WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?;
    guest.map(Json).ok_or_else(|| ApiError::not_found("Guest not found"))
}

/// Register a guest
pub async fn create_guest(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateGuestRequest>,
) -> Result<(StatusCode, Json<Guest>), ApiError> {
    if let Err(e) = validate_guest_name(&req.full_name) {
        return Err(ApiError::validation_field("full_name", e));
    }

    let id = uuid::Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO guests (id, full_name, phone, email, national_id, address, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(req.full_name.trim())
    .bind(&req.phone)
    .bind(&req.email)
    .bind(&req.national_id)
    .bind(&req.address)
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(&state.db)
    .await?;

    let guest = sqlx::query_as("SELECT * FROM guests WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;
    Ok((StatusCode::CREATED, Json(guest)))
}

/// Update a guest's contact details
pub async fn update_guest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateGuestRequest>,
) -> Result<Json<Guest>, ApiError> {
    if let Some(ref name) = req.full_name {
        if let Err(e) = validate_guest_name(name) {
            return Err(ApiError::validation_field("full_name", e));
        }
    }

    let existing: Option<Guest> = sqlx::query_as("SELECT * FROM guests WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_none() {
        return Err(ApiError::not_found("Guest not found"));
    }

    sqlx::query(
        r#"
        UPDATE guests SET
            full_name = COALESCE(?, full_name),
            phone = COALESCE(?, phone),
            email = COALESCE(?, email),
            national_id = COALESCE(?, national_id),
            address = COALESCE(?, address)
        WHERE id = ?
        "#,
    )
    .bind(&req.full_name)
    .bind(&req.phone)
    .bind(&req.email)
    .bind(&req.national_id)
    .bind(&req.address)
    .bind(&id)
    .execute(&state.db)
    .await?;

    let guest = sqlx::query_as("SELECT * FROM guests WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;
    Ok(Json(guest))
}

/// Delete a guest. Refused while any booking references them.
pub async fn delete_guest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let (references,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE guest_id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;
    if references > 0 {
        return Err(ApiError::conflict(
            "Guest has bookings on record and cannot be deleted",
        ));
    }

    let result = sqlx::query("DELETE FROM guests WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Guest not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
