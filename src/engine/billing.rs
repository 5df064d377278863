//! Invoice derivation and creation.
//!
//! Invoice figures are derived on demand from the booking's frozen total
//! and the current tax rate; only the raw invoice row is stored. Callers
//! look up the latest invoice before creating one; the engine does not
//! enforce one invoice per booking, the latest row wins on read.

use rand::Rng;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::db::{Booking, HotelSettings, Invoice, InvoiceTotals};

use super::EngineError;

const INVOICE_PREFIX: &str = "INV-";
const INVOICE_SUFFIX_DIGITS: u32 = 6;

/// Derive the display figures for a booking under the given settings
/// snapshot.
pub fn compute_totals(booking: &Booking, settings: &HotelSettings) -> InvoiceTotals {
    let subtotal = booking.total_amount;
    let tax_rate_percent = settings.tax_rate_percent();
    let tax_amount = subtotal * tax_rate_percent / 100.0;
    let total = subtotal + tax_amount;
    InvoiceTotals {
        subtotal,
        tax_rate_percent,
        tax_amount,
        total,
        advance_paid: booking.advance_paid,
        due: total - booking.advance_paid,
    }
}

/// Generate an invoice number: fixed prefix plus a random digit suffix.
/// Collisions are not pre-checked; the unique constraint on
/// invoice_number rejects the astronomically rare duplicate.
pub fn generate_invoice_number() -> String {
    let suffix: u32 = rand::rng().random_range(0..10u32.pow(INVOICE_SUFFIX_DIGITS));
    format!("{}{:0width$}", INVOICE_PREFIX, suffix, width = INVOICE_SUFFIX_DIGITS as usize)
}

/// Create an invoice row for a booking.
///
/// Amount is the booking's frozen total; tax comes from the settings
/// snapshot; paid is the advance collected at booking time. Status is
/// `paid` once the paid amount covers the invoice amount, `partial`
/// otherwise.
pub async fn create_invoice(pool: &SqlitePool, booking_id: &str) -> Result<Invoice, EngineError> {
    let booking: Booking = sqlx::query_as("SELECT * FROM bookings WHERE id = ?")
        .bind(booking_id)
        .fetch_optional(pool)
        .await?
        .ok_or(EngineError::NotFound("booking"))?;

    let settings = HotelSettings::load(pool).await?;
    let totals = compute_totals(&booking, &settings);

    let id = Uuid::new_v4().to_string();
    let invoice_number = generate_invoice_number();
    let status = if booking.advance_paid >= totals.subtotal {
        "paid"
    } else {
        "partial"
    };
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO invoices (id, booking_id, invoice_number, amount, discount, tax,
                              paid_amount, status, issued_at)
        VALUES (?, ?, ?, ?, 0, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(booking_id)
    .bind(&invoice_number)
    .bind(totals.subtotal)
    .bind(totals.tax_amount)
    .bind(booking.advance_paid)
    .bind(status)
    .bind(&now)
    .execute(pool)
    .await?;

    info!(booking_id, invoice_number = %invoice_number, "Invoice created");

    let invoice = sqlx::query_as("SELECT * FROM invoices WHERE id = ?")
        .bind(&id)
        .fetch_one(pool)
        .await?;
    Ok(invoice)
}

/// The latest invoice for a booking, if any. Duplicate rows are
/// representable; the most recently inserted one governs display.
pub async fn latest_invoice_for_booking(
    pool: &SqlitePool,
    booking_id: &str,
) -> Result<Option<Invoice>, EngineError> {
    let invoice = sqlx::query_as(
        "SELECT * FROM invoices WHERE booking_id = ? ORDER BY rowid DESC LIMIT 1",
    )
    .bind(booking_id)
    .fetch_optional(pool)
    .await?;
    Ok(invoice)
}
