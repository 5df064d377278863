//! Booking lifecycle: create, cancel, check out.
//!
//! The one invariant that matters here: a room's status must mirror
//! whether an active booking references it. Creating a booking writes the
//! booking row and flips the room to `booked` in a single transaction;
//! cancel and checkout flip it back the same way. `maintenance` is a
//! manual override outside this synchronization entirely.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::db::{Booking, BookingStatus, CreateBookingRequest, Room, RoomStatus};

use super::EngineError;

const DATE_FMT: &str = "%Y-%m-%d";

fn parse_date(s: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(s, DATE_FMT).map_err(|_| EngineError::InvalidDate(s.to_string()))
}

/// Create a booking against an available room.
///
/// Rejects when check-out is not strictly after check-in, when the advance
/// is negative, or when the room is not currently `available`. The total
/// is frozen at creation from the room's current nightly price; later price
/// changes never touch existing bookings.
pub async fn create_booking(
    pool: &SqlitePool,
    req: &CreateBookingRequest,
) -> Result<Booking, EngineError> {
    let check_in = parse_date(&req.check_in)?;
    let check_out = parse_date(&req.check_out)?;

    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        return Err(EngineError::InvalidDateRange);
    }
    if req.advance_paid < 0.0 {
        return Err(EngineError::NegativeAdvance);
    }

    let mut tx = pool.begin().await?;

    let room: Room = sqlx::query_as("SELECT * FROM rooms WHERE id = ?")
        .bind(&req.room_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(EngineError::NotFound("room"))?;

    if room.status != RoomStatus::Available.as_str() {
        return Err(EngineError::RoomNotAvailable {
            room_number: room.room_number,
        });
    }

    let guest_exists: Option<(String,)> = sqlx::query_as("SELECT id FROM guests WHERE id = ?")
        .bind(&req.guest_id)
        .fetch_optional(&mut *tx)
        .await?;
    if guest_exists.is_none() {
        return Err(EngineError::NotFound("guest"));
    }

    let total_amount = nights as f64 * room.price_per_night;
    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO bookings (id, room_id, guest_id, check_in, check_out, nights,
                              total_amount, advance_paid, status, notes, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'active', ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&req.room_id)
    .bind(&req.guest_id)
    .bind(&req.check_in)
    .bind(&req.check_out)
    .bind(nights)
    .bind(total_amount)
    .bind(req.advance_paid)
    .bind(&req.notes)
    .bind(&now)
    .execute(&mut *tx)
    .await?;

    // Both writes land together or not at all.
    sqlx::query("UPDATE rooms SET status = 'booked' WHERE id = ?")
        .bind(&req.room_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(booking_id = %id, room = %room.room_number, nights, "Booking created");

    let booking = sqlx::query_as("SELECT * FROM bookings WHERE id = ?")
        .bind(&id)
        .fetch_one(pool)
        .await?;
    Ok(booking)
}

/// Cancel a booking and free its room.
pub async fn cancel_booking(pool: &SqlitePool, booking_id: &str) -> Result<Booking, EngineError> {
    close_booking(pool, booking_id, BookingStatus::Cancelled).await
}

/// Check a booking out and free its room.
pub async fn checkout_booking(pool: &SqlitePool, booking_id: &str) -> Result<Booking, EngineError> {
    close_booking(pool, booking_id, BookingStatus::CheckedOut).await
}

/// Shared shape of cancel/checkout: flip the booking status and free the
/// room inside one transaction. A missing id is an explicit not-found;
/// repeating the call on an existing booking is a harmless re-write.
async fn close_booking(
    pool: &SqlitePool,
    booking_id: &str,
    status: BookingStatus,
) -> Result<Booking, EngineError> {
    let mut tx = pool.begin().await?;

    let booking: Booking = sqlx::query_as("SELECT * FROM bookings WHERE id = ?")
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(EngineError::NotFound("booking"))?;

    sqlx::query("UPDATE bookings SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(booking_id)
        .execute(&mut *tx)
        .await?;

    // Frees the room unconditionally; in practice only one active booking
    // can reference a room since booked rooms cannot be re-booked.
    sqlx::query("UPDATE rooms SET status = 'available' WHERE id = ?")
        .bind(&booking.room_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(booking_id, status = %status, "Booking closed");

    let booking = sqlx::query_as("SELECT * FROM bookings WHERE id = ?")
        .bind(booking_id)
        .fetch_one(pool)
        .await?;
    Ok(booking)
}

/// Manual room status override (admin action).
///
/// Unconditional: moving a room to or from `maintenance` does not inspect
/// or cancel bookings against it.
pub async fn override_room_status(
    pool: &SqlitePool,
    room_id: &str,
    status: RoomStatus,
) -> Result<Room, EngineError> {
    let result = sqlx::query("UPDATE rooms SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(room_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(EngineError::NotFound("room"));
    }

    info!(room_id, status = %status, "Room status overridden");

    let room = sqlx::query_as("SELECT * FROM rooms WHERE id = ?")
        .bind(room_id)
        .fetch_one(pool)
        .await?;
    Ok(room)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db;

    pub async fn insert_room(pool: &SqlitePool, number: &str, price: f64) -> String {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO rooms (id, room_number, room_type, floor, price_per_night, status)
             VALUES (?, ?, 'Standard', 1, ?, 'available')",
        )
        .bind(&id)
        .bind(number)
        .bind(price)
        .execute(pool)
        .await
        .unwrap();
        id
    }

    pub async fn insert_guest(pool: &SqlitePool, name: &str) -> String {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO guests (id, full_name, created_at) VALUES (?, ?, datetime('now'))",
        )
        .bind(&id)
        .bind(name)
        .execute(pool)
        .await
        .unwrap();
        id
    }

    pub async fn room_status(pool: &SqlitePool, room_id: &str) -> String {
        let (status,): (String,) = sqlx::query_as("SELECT status FROM rooms WHERE id = ?")
            .bind(room_id)
            .fetch_one(pool)
            .await
            .unwrap();
        status
    }

    fn request(room_id: &str, guest_id: &str, check_in: &str, check_out: &str) -> CreateBookingRequest {
        CreateBookingRequest {
            room_id: room_id.to_string(),
            guest_id: guest_id.to_string(),
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
            advance_paid: 0.0,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_booking_freezes_total_and_books_room() {
        let pool = db::init_in_memory().await.unwrap();
        let room_id = insert_room(&pool, "101", 1500.0).await;
        let guest_id = insert_guest(&pool, "Alice Rahman").await;

        let booking = create_booking(&pool, &request(&room_id, &guest_id, "2025-06-01", "2025-06-04"))
            .await
            .unwrap();

        assert_eq!(booking.nights, 3);
        assert_eq!(booking.total_amount, 4500.0);
        assert_eq!(booking.status, "active");
        assert_eq!(room_status(&pool, &room_id).await, "booked");

        // Later price changes must not touch the frozen total.
        sqlx::query("UPDATE rooms SET price_per_night = 9999 WHERE id = ?")
            .bind(&room_id)
            .execute(&pool)
            .await
            .unwrap();
        let reread: Booking = sqlx::query_as("SELECT * FROM bookings WHERE id = ?")
            .bind(&booking.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(reread.total_amount, 4500.0);
    }

    #[tokio::test]
    async fn test_create_booking_rejects_bad_date_range() {
        let pool = db::init_in_memory().await.unwrap();
        let room_id = insert_room(&pool, "101", 1500.0).await;
        let guest_id = insert_guest(&pool, "Alice Rahman").await;

        for (ci, co) in [("2025-06-02", "2025-06-01"), ("2025-06-01", "2025-06-01")] {
            let err = create_booking(&pool, &request(&room_id, &guest_id, ci, co))
                .await
                .unwrap_err();
            assert!(matches!(err, EngineError::InvalidDateRange));
        }

        // No state mutation on rejection.
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
        assert_eq!(room_status(&pool, &room_id).await, "available");
    }

    #[tokio::test]
    async fn test_create_booking_rejects_unavailable_room() {
        let pool = db::init_in_memory().await.unwrap();
        let room_id = insert_room(&pool, "101", 1500.0).await;
        let guest_id = insert_guest(&pool, "Alice Rahman").await;

        create_booking(&pool, &request(&room_id, &guest_id, "2025-06-01", "2025-06-02"))
            .await
            .unwrap();

        let err = create_booking(&pool, &request(&room_id, &guest_id, "2025-06-03", "2025-06-05"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::RoomNotAvailable { .. }));

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_cancel_frees_room_and_is_repeatable() {
        let pool = db::init_in_memory().await.unwrap();
        let room_id = insert_room(&pool, "101", 1500.0).await;
        let guest_id = insert_guest(&pool, "Alice Rahman").await;

        let booking = create_booking(&pool, &request(&room_id, &guest_id, "2025-06-01", "2025-06-02"))
            .await
            .unwrap();

        let cancelled = cancel_booking(&pool, &booking.id).await.unwrap();
        assert_eq!(cancelled.status, "cancelled");
        assert_eq!(room_status(&pool, &room_id).await, "available");

        // Second cancel of an existing booking does not error.
        let again = cancel_booking(&pool, &booking.id).await.unwrap();
        assert_eq!(again.status, "cancelled");
        assert_eq!(room_status(&pool, &room_id).await, "available");
    }

    #[tokio::test]
    async fn test_cancel_missing_booking_is_not_found() {
        let pool = db::init_in_memory().await.unwrap();
        let err = cancel_booking(&pool, "no-such-id").await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound("booking")));
    }

    #[tokio::test]
    async fn test_checkout_frees_room() {
        let pool = db::init_in_memory().await.unwrap();
        let room_id = insert_room(&pool, "101", 1500.0).await;
        let guest_id = insert_guest(&pool, "Alice Rahman").await;

        let booking = create_booking(&pool, &request(&room_id, &guest_id, "2025-06-01", "2025-06-03"))
            .await
            .unwrap();
        let done = checkout_booking(&pool, &booking.id).await.unwrap();

        assert_eq!(done.status, "checked_out");
        assert_eq!(room_status(&pool, &room_id).await, "available");
    }

    #[tokio::test]
    async fn test_maintenance_override_leaves_active_booking_untouched() {
        // Documented gap: a manual override to maintenance does not cancel
        // the active booking against the room.
        let pool = db::init_in_memory().await.unwrap();
        let room_id = insert_room(&pool, "101", 1500.0).await;
        let guest_id = insert_guest(&pool, "Alice Rahman").await;

        let booking = create_booking(&pool, &request(&room_id, &guest_id, "2025-06-01", "2025-06-02"))
            .await
            .unwrap();

        let room = override_room_status(&pool, &room_id, RoomStatus::Maintenance)
            .await
            .unwrap();
        assert_eq!(room.status, "maintenance");

        let reread: Booking = sqlx::query_as("SELECT * FROM bookings WHERE id = ?")
            .bind(&booking.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(reread.status, "active");
    }

    #[tokio::test]
    async fn test_override_missing_room_is_not_found() {
        let pool = db::init_in_memory().await.unwrap();
        let err = override_room_status(&pool, "no-such-id", RoomStatus::Maintenance)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound("room")));
    }
}
