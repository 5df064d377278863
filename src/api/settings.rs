//! Hotel settings endpoints.
//!
//! A flat string-keyed map, readable by any staff member and writable by
//! admins. Writes take effect on the next operation that loads a
//! snapshot; nothing caches across operations.

use axum::{
    extract::State,
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::{HotelSettings, User};
use crate::AppState;

use super::auth::require_admin;
use super::error::ApiError;

/// Current settings snapshot
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HotelSettings>, ApiError> {
    let settings = HotelSettings::load(&state.db).await?;
    Ok(Json(settings))
}

/// Upsert settings keys (admin only)
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    user: User,
    Json(updates): Json<HashMap<String, String>>,
) -> Result<Json<HotelSettings>, ApiError> {
    require_admin(&user)?;

    for (key, value) in &updates {
        sqlx::query("INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&state.db)
            .await?;
    }

    let settings = HotelSettings::load(&state.db).await?;
    Ok(Json(settings))
}
