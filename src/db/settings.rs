//! Hotel settings snapshot.
//!
//! Settings live in a flat key/value table and are mutable at any time.
//! Operations that need them load one snapshot up front and pass it down,
//! rather than reading ambient global state mid-operation.

use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;

/// A point-in-time snapshot of the settings table.
#[derive(Debug, Clone, Serialize)]
pub struct HotelSettings {
    pub hotel_name: String,
    pub hotel_address: String,
    pub hotel_phone: String,
    pub hotel_email: String,
    pub currency: String,
    /// Raw tax_rate value; use [`HotelSettings::tax_rate_percent`] to read it.
    pub tax_rate: String,
}

impl HotelSettings {
    /// Load a snapshot from the settings table. Missing keys fall back to
    /// empty strings.
    pub async fn load(pool: &SqlitePool) -> Result<Self, sqlx::Error> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM settings")
            .fetch_all(pool)
            .await?;
        let mut map: HashMap<String, String> = rows.into_iter().collect();
        let mut take = |key: &str| map.remove(key).unwrap_or_default();

        Ok(Self {
            hotel_name: take("hotel_name"),
            hotel_address: take("hotel_address"),
            hotel_phone: take("hotel_phone"),
            hotel_email: take("hotel_email"),
            currency: take("currency"),
            tax_rate: take("tax_rate"),
        })
    }

    /// The tax rate as a percentage. The stored value is a free-form string;
    /// anything unparseable reads as 0.
    pub fn tax_rate_percent(&self) -> f64 {
        self.tax_rate.trim().parse().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(tax_rate: &str) -> HotelSettings {
        HotelSettings {
            hotel_name: "Grand Hotel".to_string(),
            hotel_address: String::new(),
            hotel_phone: String::new(),
            hotel_email: String::new(),
            currency: "BDT".to_string(),
            tax_rate: tax_rate.to_string(),
        }
    }

    #[test]
    fn test_tax_rate_parses() {
        assert_eq!(snapshot("10").tax_rate_percent(), 10.0);
        assert_eq!(snapshot(" 7.5 ").tax_rate_percent(), 7.5);
    }

    #[test]
    fn test_tax_rate_lenient_on_garbage() {
        assert_eq!(snapshot("").tax_rate_percent(), 0.0);
        assert_eq!(snapshot("ten percent").tax_rate_percent(), 0.0);
    }
}
