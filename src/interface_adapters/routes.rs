use crate::interface_adapters::handlers::{
    admin_bookings, current_session, guest_bookings, login, logout,
};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    // Wire the HTTP routes to their handlers.
    Router::new()
        .route("/session/login", post(login))
        .route("/session/logout", post(logout))
        .route("/session", get(current_session))
        .route("/bookings", get(guest_bookings))
        .route("/admin/bookings", get(admin_bookings))
        .with_state(state)
}
