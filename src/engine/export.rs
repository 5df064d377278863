//! Plain-text rendering for invoices and revenue reports.
//!
//! Pure formatting over already-fetched data; callers decide where the
//! text ends up (screen, file, printer).

use crate::db::{BookingWithDetails, HotelSettings, InvoiceTotals};

use super::reports::RevenueRow;

const RULE_HEAVY: &str = "==================================================";
const RULE_LIGHT: &str = "--------------------------------------------------";

/// Render a booking's invoice as fixed-width text.
pub fn render_invoice(
    booking: &BookingWithDetails,
    totals: &InvoiceTotals,
    invoice_number: &str,
    settings: &HotelSettings,
    issued_at: &str,
) -> String {
    let currency = &settings.currency;
    let mut lines = vec![
        RULE_HEAVY.to_string(),
        format!("          {}", settings.hotel_name),
        format!("          {}", settings.hotel_address),
        format!("          Tel: {}", settings.hotel_phone),
        RULE_HEAVY.to_string(),
        format!("  INVOICE No: {}", invoice_number),
        format!("  Date: {}", issued_at),
        RULE_LIGHT.to_string(),
        format!("  Guest  : {}", booking.guest_name),
        format!("  Phone  : {}", booking.guest_phone.as_deref().unwrap_or("-")),
        format!("  Room   : {} ({})", booking.room_number, booking.room_type),
        format!("  Check-In : {}", booking.check_in),
        format!("  Check-Out: {}", booking.check_out),
        format!("  Nights : {}", booking.nights),
        RULE_LIGHT.to_string(),
        format!("  Sub-total : {:>12.2} {}", totals.subtotal, currency),
        format!(
            "  Tax ({:.0}%)  : {:>12.2} {}",
            totals.tax_rate_percent, totals.tax_amount, currency
        ),
        format!("  TOTAL     : {:>12.2} {}", totals.total, currency),
        format!("  Advance   : {:>12.2} {}", totals.advance_paid, currency),
        format!("  DUE       : {:>12.2} {}", totals.due, currency),
        RULE_HEAVY.to_string(),
        "  Thank you for staying with us!".to_string(),
        RULE_HEAVY.to_string(),
    ];
    lines.push(String::new());
    lines.join("\n")
}

/// Render a revenue report as a fixed-width table with a total line.
pub fn render_revenue_report(from_date: &str, to_date: &str, rows: &[RevenueRow]) -> String {
    let mut lines = vec![
        format!("Revenue Report: {} to {}", from_date, to_date),
        "-".repeat(61),
        format!(
            "{:<15}{:>10}{:>18}{:>18}",
            "Date", "Bookings", "Revenue", "Collected"
        ),
        "-".repeat(61),
    ];

    let mut total_revenue = 0.0;
    for row in rows {
        total_revenue += row.revenue;
        lines.push(format!(
            "{:<15}{:>10}{:>18.2}{:>18.2}",
            row.date, row.bookings, row.revenue, row.collected
        ));
    }

    lines.push("-".repeat(61));
    lines.push(format!("{:<15}{:>10}{:>18.2}", "TOTAL", "", total_revenue));
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_booking() -> BookingWithDetails {
        BookingWithDetails {
            id: "b1".to_string(),
            room_id: "r1".to_string(),
            guest_id: "g1".to_string(),
            check_in: "2025-06-01".to_string(),
            check_out: "2025-06-04".to_string(),
            nights: 3,
            total_amount: 3000.0,
            advance_paid: 500.0,
            status: "active".to_string(),
            notes: None,
            created_at: "2025-06-01T08:00:00Z".to_string(),
            room_number: "101".to_string(),
            room_type: "Standard".to_string(),
            guest_name: "Alice Rahman".to_string(),
            guest_phone: None,
        }
    }

    fn sample_settings() -> HotelSettings {
        HotelSettings {
            hotel_name: "Grand Hotel".to_string(),
            hotel_address: "123 Main Street, Dhaka".to_string(),
            hotel_phone: "01700000000".to_string(),
            hotel_email: "info@grandhotel.com".to_string(),
            currency: "BDT".to_string(),
            tax_rate: "10".to_string(),
        }
    }

    #[test]
    fn test_invoice_text_carries_totals_and_header() {
        let totals = InvoiceTotals {
            subtotal: 3000.0,
            tax_rate_percent: 10.0,
            tax_amount: 300.0,
            total: 3300.0,
            advance_paid: 500.0,
            due: 2800.0,
        };
        let text = render_invoice(
            &sample_booking(),
            &totals,
            "INV-042107",
            &sample_settings(),
            "2025-06-04 11:30",
        );

        assert!(text.contains("Grand Hotel"));
        assert!(text.contains("INVOICE No: INV-042107"));
        assert!(text.contains("Guest  : Alice Rahman"));
        assert!(text.contains("Phone  : -"));
        assert!(text.contains("Room   : 101 (Standard)"));
        assert!(text.contains("Nights : 3"));
        assert!(text.contains("2800.00 BDT"));
        assert!(text.contains("Tax (10%)"));
    }

    #[test]
    fn test_revenue_report_text_totals() {
        let rows = vec![
            RevenueRow {
                date: "2025-06-01".to_string(),
                bookings: 1,
                revenue: 1000.0,
                collected: 200.0,
            },
            RevenueRow {
                date: "2025-06-02".to_string(),
                bookings: 2,
                revenue: 2000.0,
                collected: 0.0,
            },
        ];
        let text = render_revenue_report("2025-06-01", "2025-06-02", &rows);

        assert!(text.contains("Revenue Report: 2025-06-01 to 2025-06-02"));
        assert!(text.contains("2025-06-01"));
        assert!(text.contains("3000.00"));
        assert!(text.starts_with("Revenue Report"));
    }
}
