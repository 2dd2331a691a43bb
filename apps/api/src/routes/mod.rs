pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::booking::handlers as booking;
use crate::search::handlers as search;
use crate::state::AppState;
use crate::talent::handlers as talent;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Search
        .route("/api/talent/search", get(search::handle_search))
        // Profiles and likes
        .route("/api/talent/register", post(talent::handle_register))
        .route("/api/talent/likes", get(talent::handle_liked_talents))
        .route("/api/talent/:id", get(talent::handle_get_talent))
        .route(
            "/api/talent/:id/like",
            post(talent::handle_like).delete(talent::handle_unlike),
        )
        // Bookings
        .route("/api/booking/request", post(booking::handle_create_booking))
        .route("/api/booking/talent", get(booking::handle_talent_bookings))
        .route("/api/booking/recruiter", get(booking::handle_recruiter_bookings))
        .route("/api/booking/dashboard", get(booking::handle_dashboard))
        .route("/api/booking/:id/status", put(booking::handle_update_status))
        .with_state(state)
}
