//! Input validation for API requests.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating usernames (alphanumeric plus . _ -)
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9._-]*$").unwrap();
}

/// Valid staff roles
const VALID_ROLES: [&str; 2] = ["admin", "receptionist"];

/// Validate a username (minimum length applies after trimming)
pub fn validate_username(username: &str) -> Result<(), String> {
    let trimmed = username.trim();
    if trimmed.len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }
    if trimmed.len() > 64 {
        return Err("Username is too long (max 64 characters)".to_string());
    }
    if !USERNAME_REGEX.is_match(trimmed) {
        return Err("Username may only contain letters, digits, '.', '_' and '-'".to_string());
    }
    Ok(())
}

/// Validate a password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }
    Ok(())
}

/// Validate a staff role
pub fn validate_role(role: &str) -> Result<(), String> {
    if !VALID_ROLES.contains(&role) {
        return Err(format!(
            "Invalid role. Must be one of: {}",
            VALID_ROLES.join(", ")
        ));
    }
    Ok(())
}

/// Validate a guest's full name
pub fn validate_guest_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Guest name is required".to_string());
    }
    if name.len() > 200 {
        return Err("Guest name is too long (max 200 characters)".to_string());
    }
    Ok(())
}

/// Validate an ISO date string (YYYY-MM-DD)
pub fn validate_date(date: &str, field_name: &str) -> Result<(), String> {
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(format!("Invalid {}, expected YYYY-MM-DD", field_name));
    }
    Ok(())
}

/// Validate a nightly price
pub fn validate_price(price: f64) -> Result<(), String> {
    if !price.is_finite() || price <= 0.0 {
        return Err("Price per night must be positive".to_string());
    }
    Ok(())
}

/// Validate a UUID string
pub fn validate_uuid(id: &str, field_name: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err(format!("{} is required", field_name));
    }

    if uuid::Uuid::parse_str(id).is_err() {
        return Err(format!("Invalid {} format", field_name));
    }

    Ok(())
}
