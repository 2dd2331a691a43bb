use std::sync::Arc;

use crate::config::Config;
use crate::store::{BookingStore, ProfileStore, SessionStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Talent profiles and likes. PostgreSQL in production, in-memory in tests.
    pub profiles: Arc<dyn ProfileStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub config: Config,
}
