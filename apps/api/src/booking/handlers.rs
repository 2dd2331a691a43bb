//! Axum route handlers for booking requests between recruiters and talent.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::booking::request::{CreateBookingRequest, UpdateStatusRequest};
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::booking::{Booking, BookingStats, RECENT_BOOKINGS};
use crate::models::user::Role;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: BookingStats,
    pub recent_bookings: Vec<Booking>,
}

/// POST /api/booking/request
pub async fn handle_create_booking(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(request): AppJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    user.require_role(Role::Recruiter, "create booking requests")?;
    let recruiter = user.0;

    let details = request.validate()?;
    let profile = state
        .profiles
        .find_by_id_or_owner(details.talent_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Talent profile {} not found", details.talent_id))
        })?;

    let booking = state
        .bookings
        .insert(details.into_new_booking(recruiter.user_id, &profile))
        .await?;

    info!(
        "Booking {} requested by {} for talent {}",
        booking.id, recruiter.user_id, booking.talent_id
    );
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /api/booking/talent
pub async fn handle_talent_bookings(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Booking>>, AppError> {
    user.require_role(Role::Talent, "view their booking requests")?;
    Ok(Json(state.bookings.for_talent(user.0.user_id).await?))
}

/// GET /api/booking/recruiter
pub async fn handle_recruiter_bookings(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Booking>>, AppError> {
    user.require_role(Role::Recruiter, "view their booking requests")?;
    Ok(Json(state.bookings.for_recruiter(user.0.user_id).await?))
}

/// PUT /api/booking/:id/status
///
/// Only the talent the booking is addressed to may change its status.
pub async fn handle_update_status(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateStatusRequest>,
) -> Result<Json<Booking>, AppError> {
    user.require_role(Role::Talent, "update booking status")?;
    let caller = user.0;
    let status = request.validate()?;

    let not_found = || AppError::NotFound(format!("Booking request {id} not found"));
    let booking = state.bookings.find_by_id(id).await?.ok_or_else(not_found)?;

    if booking.talent_id != caller.user_id {
        warn!(
            "User {} tried to update booking {id} addressed to {}",
            caller.user_id, booking.talent_id
        );
        return Err(AppError::Forbidden(
            "Not authorized to update this booking request".to_string(),
        ));
    }

    let updated = state
        .bookings
        .set_status(id, status)
        .await?
        .ok_or_else(not_found)?;

    info!("Booking {id} moved from {} to {}", booking.status, updated.status);
    Ok(Json(updated))
}

/// GET /api/booking/dashboard
///
/// Counters and the most recent bookings for the caller, on whichever side of
/// the booking their role puts them.
pub async fn handle_dashboard(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<DashboardResponse>, AppError> {
    let bookings = match caller.role {
        Role::Talent => state.bookings.for_talent(caller.user_id).await?,
        Role::Recruiter => state.bookings.for_recruiter(caller.user_id).await?,
    };

    let stats = BookingStats::from_bookings(&bookings);
    let recent_bookings = bookings.into_iter().take(RECENT_BOOKINGS).collect();
    Ok(Json(DashboardResponse {
        stats,
        recent_bookings,
    }))
}
