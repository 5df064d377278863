pub mod auth;
mod bookings;
mod error;
mod guests;
mod invoices;
mod reports;
mod rooms;
mod settings;
mod validation;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register));

    // Protected API routes
    let api_routes = Router::new()
        // Account
        .route("/auth/password", put(auth::change_password))
        .route("/users", get(auth::list_users))
        .route("/users/:id", delete(auth::delete_user))
        // Rooms
        .route("/rooms", get(rooms::list_rooms))
        .route("/rooms/:id", get(rooms::get_room))
        .route("/rooms/:id", put(rooms::update_room))
        .route("/rooms/:id/status", put(rooms::update_room_status))
        // Guests
        .route("/guests", get(guests::list_guests))
        .route("/guests", post(guests::create_guest))
        .route("/guests/:id", get(guests::get_guest))
        .route("/guests/:id", put(guests::update_guest))
        .route("/guests/:id", delete(guests::delete_guest))
        // Bookings
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings/:id", get(bookings::get_booking))
        .route("/bookings/:id/cancel", post(bookings::cancel_booking))
        .route("/bookings/:id/checkout", post(bookings::checkout_booking))
        // Billing
        .route("/bookings/:id/invoice", get(invoices::get_booking_invoice))
        .route("/bookings/:id/invoice", post(invoices::create_booking_invoice))
        .route("/bookings/:id/invoice/export", get(invoices::export_booking_invoice))
        // Reports
        .route("/reports/revenue", get(reports::revenue_report))
        .route("/reports/revenue/export", get(reports::export_revenue_report))
        .route("/reports/dashboard", get(reports::dashboard))
        // Settings
        .route("/settings", get(settings::get_settings))
        .route("/settings", put(settings::update_settings))
        // Protected by auth
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
