//! Database seeders for first-run data
//!
//! Seeds the default hotel settings and the fixed room grid. Everything
//! here is insert-if-absent so startup can run it unconditionally.

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

/// Default settings written on first run. tax_rate is stored as a string
/// and parsed at point of use.
const DEFAULT_SETTINGS: [(&str, &str); 6] = [
    ("hotel_name", "Grand Hotel"),
    ("hotel_address", "123 Main Street, Dhaka"),
    ("hotel_phone", "01700000000"),
    ("hotel_email", "info@grandhotel.com"),
    ("currency", "BDT"),
    ("tax_rate", "0"),
];

/// Room grid: 3 floors, 10 rooms per floor, type and nightly price fixed
/// per floor. Room numbers are floor + two-digit index (101..110, 201..).
const FLOORS: [(i64, &str, f64); 3] = [
    (1, "Standard", 1500.0),
    (2, "Deluxe", 2500.0),
    (3, "Suite", 4000.0),
];

const ROOMS_PER_FLOOR: i64 = 10;

/// Seed default settings and the room grid (runs on every startup).
pub async fn seed_defaults(pool: &SqlitePool) -> Result<()> {
    info!("Seeding default settings and rooms...");

    for (key, value) in DEFAULT_SETTINGS {
        sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(pool)
            .await?;
    }

    for (floor, room_type, price) in FLOORS {
        for num in 1..=ROOMS_PER_FLOOR {
            let room_number = format!("{}{:02}", floor, num);
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO rooms (id, room_number, room_type, floor, price_per_night, status)
                VALUES (?, ?, ?, ?, ?, 'available')
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&room_number)
            .bind(room_type)
            .bind(floor)
            .bind(price)
            .execute(pool)
            .await?;
        }
    }

    Ok(())
}
