//! Reporting projections: per-day revenue rows and dashboard counters.
//!
//! Pure reads over the bookings, rooms, and guests tables.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::EngineError;

/// One row of the revenue report: all non-cancelled bookings created on
/// `date`, with their frozen totals and collected advances summed.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RevenueRow {
    pub date: String,
    pub bookings: i64,
    pub revenue: f64,
    pub collected: f64,
}

/// Per-day revenue and collection over an inclusive date range, ordered by
/// date ascending. Cancelled bookings are excluded from both count and sums.
pub async fn revenue_report(
    pool: &SqlitePool,
    from_date: &str,
    to_date: &str,
) -> Result<Vec<RevenueRow>, EngineError> {
    let rows = sqlx::query_as(
        r#"
        SELECT DATE(created_at) as date, COUNT(*) as bookings,
               COALESCE(SUM(total_amount), 0) as revenue,
               COALESCE(SUM(advance_paid), 0) as collected
        FROM bookings
        WHERE DATE(created_at) BETWEEN ? AND ? AND status != 'cancelled'
        GROUP BY DATE(created_at)
        ORDER BY date
        "#,
    )
    .bind(from_date)
    .bind(to_date)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_rooms: i64,
    pub booked: i64,
    pub available: i64,
    pub maintenance: i64,
    pub today_revenue: f64,
    pub total_guests: i64,
}

async fn count_rooms_with_status(pool: &SqlitePool, status: &str) -> Result<i64, sqlx::Error> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rooms WHERE status = ?")
        .bind(status)
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Occupancy counters and today's active-booking revenue for the landing
/// screen.
pub async fn dashboard_stats(pool: &SqlitePool) -> Result<DashboardStats, EngineError> {
    let (total_rooms,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rooms")
        .fetch_one(pool)
        .await?;

    let booked = count_rooms_with_status(pool, "booked").await?;
    let available = count_rooms_with_status(pool, "available").await?;
    let maintenance = count_rooms_with_status(pool, "maintenance").await?;

    let (today_revenue,): (f64,) = sqlx::query_as(
        r#"
        SELECT COALESCE(SUM(total_amount), 0.0) FROM bookings
        WHERE DATE(created_at) = DATE('now') AND status = 'active'
        "#,
    )
    .fetch_one(pool)
    .await?;

    let (total_guests,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM guests")
        .fetch_one(pool)
        .await?;

    Ok(DashboardStats {
        total_rooms,
        booked,
        available,
        maintenance,
        today_revenue,
        total_guests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::engine::bookings::tests::{insert_guest, insert_room};
    use uuid::Uuid;

    async fn insert_booking_on(
        pool: &SqlitePool,
        room_id: &str,
        guest_id: &str,
        created: &str,
        total: f64,
        advance: f64,
        status: &str,
    ) {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, room_id, guest_id, check_in, check_out, nights,
                                  total_amount, advance_paid, status, created_at)
            VALUES (?, ?, ?, '2025-06-01', '2025-06-02', 1, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(room_id)
        .bind(guest_id)
        .bind(total)
        .bind(advance)
        .bind(status)
        .bind(created)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_revenue_report_groups_and_excludes_cancelled() {
        let pool = db::init_in_memory().await.unwrap();
        let room_id = insert_room(&pool, "101", 1000.0).await;
        let guest_id = insert_guest(&pool, "Alice Rahman").await;

        insert_booking_on(&pool, &room_id, &guest_id, "2025-06-01 09:00:00", 1000.0, 200.0, "active").await;
        insert_booking_on(&pool, &room_id, &guest_id, "2025-06-02 10:00:00", 2000.0, 0.0, "checked_out").await;
        insert_booking_on(&pool, &room_id, &guest_id, "2025-06-02 11:00:00", 500.0, 100.0, "cancelled").await;

        let rows = revenue_report(&pool, "2025-06-01", "2025-06-02").await.unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].date, "2025-06-01");
        assert_eq!(rows[0].bookings, 1);
        assert_eq!(rows[0].revenue, 1000.0);
        assert_eq!(rows[0].collected, 200.0);

        assert_eq!(rows[1].date, "2025-06-02");
        assert_eq!(rows[1].bookings, 1);
        assert_eq!(rows[1].revenue, 2000.0);
        assert_eq!(rows[1].collected, 0.0);
    }

    #[tokio::test]
    async fn test_revenue_report_range_is_inclusive() {
        let pool = db::init_in_memory().await.unwrap();
        let room_id = insert_room(&pool, "101", 1000.0).await;
        let guest_id = insert_guest(&pool, "Alice Rahman").await;

        insert_booking_on(&pool, &room_id, &guest_id, "2025-05-31 09:00:00", 700.0, 0.0, "active").await;
        insert_booking_on(&pool, &room_id, &guest_id, "2025-06-01 09:00:00", 1000.0, 0.0, "active").await;
        insert_booking_on(&pool, &room_id, &guest_id, "2025-06-03 09:00:00", 900.0, 0.0, "active").await;

        let rows = revenue_report(&pool, "2025-06-01", "2025-06-03").await.unwrap();
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-06-01", "2025-06-03"]);
    }

    #[tokio::test]
    async fn test_dashboard_stats_counts_rooms_by_status() {
        let pool = db::init_in_memory().await.unwrap();
        let r1 = insert_room(&pool, "101", 1000.0).await;
        insert_room(&pool, "102", 1000.0).await;
        let r3 = insert_room(&pool, "103", 1000.0).await;
        insert_guest(&pool, "Alice Rahman").await;

        sqlx::query("UPDATE rooms SET status = 'booked' WHERE id = ?")
            .bind(&r1)
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("UPDATE rooms SET status = 'maintenance' WHERE id = ?")
            .bind(&r3)
            .execute(&pool)
            .await
            .unwrap();

        let stats = dashboard_stats(&pool).await.unwrap();
        assert_eq!(stats.total_rooms, 3);
        assert_eq!(stats.booked, 1);
        assert_eq!(stats.available, 1);
        assert_eq!(stats.maintenance, 1);
        assert_eq!(stats.total_guests, 1);
    }
}
