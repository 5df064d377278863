//! Invoice models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: String,
    pub booking_id: String,
    pub invoice_number: String,
    pub amount: f64,
    pub discount: f64,
    pub tax: f64,
    pub paid_amount: f64,
    /// "paid" when paid_amount covers amount, "partial" otherwise.
    pub status: String,
    pub issued_at: String,
}

/// Derived invoice figures, computed on demand from a booking and the
/// settings snapshot; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax_rate_percent: f64,
    pub tax_amount: f64,
    pub total: f64,
    pub advance_paid: f64,
    pub due: f64,
}

/// Invoice row (if one exists) plus the derived totals used for display.
#[derive(Debug, Serialize)]
pub struct InvoiceView {
    pub invoice: Option<Invoice>,
    pub totals: InvoiceTotals,
}
