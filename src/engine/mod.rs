//! The front-desk domain core: booking lifecycle, billing derivation,
//! reporting projections, and plain-text export rendering.

pub mod billing;
pub mod bookings;
pub mod export;
pub mod reports;

use thiserror::Error;

/// Errors surfaced by the lifecycle engine.
///
/// Every variant except `Db` is an expected, recoverable rejection and is
/// reported to callers as data.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("check-out must be after check-in")]
    InvalidDateRange,

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("advance paid cannot be negative")]
    NegativeAdvance,

    #[error("room {room_number} is not available")]
    RoomNotAvailable { room_number: String },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}
