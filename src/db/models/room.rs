//! Room models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Availability state of a room.
///
/// `Booked` mirrors "has at least one active booking" and is only written
/// by the booking lifecycle; `Maintenance` is an independent manual
/// override that bypasses booking logic entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Booked,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Booked => "booked",
            RoomStatus::Maintenance => "maintenance",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "available" => Some(RoomStatus::Available),
            "booked" => Some(RoomStatus::Booked),
            "maintenance" => Some(RoomStatus::Maintenance),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    pub id: String,
    pub room_number: String,
    pub room_type: String,
    pub floor: i64,
    pub price_per_night: f64,
    pub status: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoomRequest {
    pub room_type: Option<String>,
    pub price_per_night: Option<f64>,
    pub description: Option<String>,
}

/// Manual status override (admin action).
#[derive(Debug, Deserialize)]
pub struct UpdateRoomStatusRequest {
    pub status: RoomStatus,
}
