//! Booking models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Active,
    Cancelled,
    CheckedOut,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Active => "active",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::CheckedOut => "checked_out",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(BookingStatus::Active),
            "cancelled" => Some(BookingStatus::Cancelled),
            "checked_out" => Some(BookingStatus::CheckedOut),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: String,
    pub room_id: String,
    pub guest_id: String,
    /// ISO date (YYYY-MM-DD)
    pub check_in: String,
    /// ISO date (YYYY-MM-DD)
    pub check_out: String,
    pub nights: i64,
    /// Frozen at creation: nights x the room's price at booking time.
    pub total_amount: f64,
    pub advance_paid: f64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
}

/// Booking row joined with the display fields the front desk lists:
/// room number/type and guest name/phone.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingWithDetails {
    pub id: String,
    pub room_id: String,
    pub guest_id: String,
    pub check_in: String,
    pub check_out: String,
    pub nights: i64,
    pub total_amount: f64,
    pub advance_paid: f64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub room_number: String,
    pub room_type: String,
    pub guest_name: String,
    pub guest_phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub room_id: String,
    pub guest_id: String,
    /// ISO date (YYYY-MM-DD)
    pub check_in: String,
    /// ISO date (YYYY-MM-DD)
    pub check_out: String,
    #[serde(default)]
    pub advance_paid: f64,
    pub notes: Option<String>,
}
