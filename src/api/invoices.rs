//! Billing endpoints: invoice lookup, generation, and text export for a
//! booking.
//!
//! The caller convention mirrors the front desk flow: look up the latest
//! invoice first, generate one if none exists, export whenever needed.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::db::{Booking, HotelSettings, Invoice, InvoiceView};
use crate::engine::billing;
use crate::engine::export::render_invoice;
use crate::AppState;

use super::bookings::fetch_booking_details;
use super::error::ApiError;

/// The latest invoice for a booking (if any) plus derived totals.
pub async fn get_booking_invoice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceView>, ApiError> {
    let booking: Booking = sqlx::query_as("SELECT * FROM bookings WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    let settings = HotelSettings::load(&state.db).await?;
    let totals = billing::compute_totals(&booking, &settings);
    let invoice = billing::latest_invoice_for_booking(&state.db, &id).await?;

    Ok(Json(InvoiceView { invoice, totals }))
}

/// Generate an invoice row for a booking.
///
/// Repeated calls create further rows with fresh invoice numbers; reads
/// always pick the latest.
pub async fn create_booking_invoice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Invoice>), ApiError> {
    let invoice = billing::create_invoice(&state.db, &id).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// Render a booking's invoice as plain text. The client writes it to a
/// file path of the user's choosing.
pub async fn export_booking_invoice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    let details = fetch_booking_details(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    let booking: Booking = sqlx::query_as("SELECT * FROM bookings WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    let settings = HotelSettings::load(&state.db).await?;
    let totals = billing::compute_totals(&booking, &settings);

    // Without a generated invoice yet, fall back to a number derived from
    // the booking id so the preview still renders.
    let invoice_number = match billing::latest_invoice_for_booking(&state.db, &id).await? {
        Some(invoice) => invoice.invoice_number,
        None => format!("INV-{}", &id[..8.min(id.len())].to_uppercase()),
    };

    let issued_at = chrono::Local::now().format("%d %b %Y  %H:%M").to_string();
    Ok(render_invoice(&details, &totals, &invoice_number, &settings, &issued_at))
}
