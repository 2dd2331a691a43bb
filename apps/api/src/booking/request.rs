use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::input::NumberField;
use crate::models::booking::{BookingStatus, NewBooking};
use crate::models::talent::TalentProfile;

/// Body of `POST /api/booking/request`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBookingRequest {
    /// Talent account id, or the id of the talent's profile.
    pub talent_id: Option<Uuid>,
    /// RFC 3339 timestamp or a plain `YYYY-MM-DD` date.
    pub project_date: Option<String>,
    pub duration_hours: Option<NumberField>,
    pub budget: Option<NumberField>,
    pub message: Option<String>,
}

/// A booking request that passed validation, before the talent's profile is
/// resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetails {
    pub talent_id: Uuid,
    pub project_date: DateTime<Utc>,
    pub duration_hours: f64,
    pub budget: f64,
    pub message: String,
}

impl BookingDetails {
    pub fn into_new_booking(self, recruiter_id: Uuid, profile: &TalentProfile) -> NewBooking {
        NewBooking {
            recruiter_id,
            talent_id: profile.user_id,
            talent_profile_id: profile.id,
            project_date: self.project_date,
            duration_hours: self.duration_hours,
            budget: self.budget,
            message: self.message,
        }
    }
}

fn parse_project_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .ok_or_else(|| {
            AppError::Validation(format!(
                "project_date must be an RFC 3339 timestamp or a YYYY-MM-DD date, got '{raw}'"
            ))
        })
}

fn number(field: &Option<NumberField>, name: &str) -> Result<Option<f64>, AppError> {
    match field {
        Some(value) => value.value(name),
        None => Ok(None),
    }
}

impl CreateBookingRequest {
    pub fn validate(self) -> Result<BookingDetails, AppError> {
        let project_date = self
            .project_date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let message = self
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        let duration_hours = number(&self.duration_hours, "duration_hours")?;
        let budget = number(&self.budget, "budget")?;

        let missing: Vec<&str> = [
            ("talent_id", self.talent_id.is_none()),
            ("project_date", project_date.is_none()),
            ("duration_hours", duration_hours.is_none()),
            ("budget", budget.is_none()),
            ("message", message.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        let (
            Some(talent_id),
            Some(project_date),
            Some(duration_hours),
            Some(budget),
            Some(message),
        ) = (self.talent_id, project_date, duration_hours, budget, message)
        else {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        };

        if !duration_hours.is_finite() || duration_hours <= 0.0 {
            return Err(AppError::Validation(
                "duration_hours must be a positive number".to_string(),
            ));
        }
        if !budget.is_finite() || budget < 0.0 {
            return Err(AppError::Validation(
                "budget must be a non-negative number".to_string(),
            ));
        }

        Ok(BookingDetails {
            talent_id,
            project_date: parse_project_date(&project_date)?,
            duration_hours,
            budget,
            message,
        })
    }
}

/// Body of `PUT /api/booking/:id/status`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

impl UpdateStatusRequest {
    pub fn validate(self) -> Result<BookingStatus, AppError> {
        let status = self
            .status
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation("Missing required fields: status".to_string()))?;
        Ok(status.parse::<BookingStatus>()?)
    }
}
