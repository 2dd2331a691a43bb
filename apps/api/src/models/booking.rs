use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::talent::UnknownVariant;

/// Number of bookings shown in a dashboard's recent list.
pub const RECENT_BOOKINGS: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [
        BookingStatus::Pending,
        BookingStatus::Accepted,
        BookingStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                field: "status",
                value: s.to_string(),
                expected: "pending, accepted, rejected".to_string(),
            })
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recruiter's request to book a talent for a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    /// The talent's account id.
    pub talent_id: Uuid,
    pub talent_profile_id: Uuid,
    pub project_date: DateTime<Utc>,
    pub duration_hours: f64,
    pub budget: f64,
    pub message: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub recruiter_id: Uuid,
    pub talent_id: Uuid,
    pub talent_profile_id: Uuid,
    pub project_date: DateTime<Utc>,
    pub duration_hours: f64,
    pub budget: f64,
    pub message: String,
}

impl NewBooking {
    /// A pending booking with a fresh id and timestamps.
    pub fn into_booking(self) -> Booking {
        let now = Utc::now();
        Booking {
            id: Uuid::new_v4(),
            recruiter_id: self.recruiter_id,
            talent_id: self.talent_id,
            talent_profile_id: self.talent_profile_id,
            project_date: self.project_date,
            duration_hours: self.duration_hours,
            budget: self.budget,
            message: self.message,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Dashboard counters over one account's bookings.
///
/// A booking counts as completed once accepted; earnings sum the budgets of
/// accepted bookings.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BookingStats {
    pub total_bookings: usize,
    pub pending_bookings: usize,
    pub completed_bookings: usize,
    pub earnings: f64,
}

impl BookingStats {
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        bookings
            .iter()
            .fold(BookingStats::default(), |mut stats, booking| {
                stats.total_bookings += 1;
                match booking.status {
                    BookingStatus::Pending => stats.pending_bookings += 1,
                    BookingStatus::Accepted => {
                        stats.completed_bookings += 1;
                        stats.earnings += booking.budget;
                    }
                    BookingStatus::Rejected => {}
                }
                stats
            })
    }
}
