//! Persistence boundary for talent profiles, bookings and sessions.
//!
//! Handlers and the ranking engine only see the `ProfileStore`,
//! `BookingStore` and `SessionStore` traits. `AppState` carries them as `Arc<dyn ...>` so the
//! PostgreSQL backend can be swapped for the in-memory one in tests.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::models::talent::{Availability, Category, NewTalentProfile, TalentProfile};
use crate::models::user::Caller;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored row holds a value the domain model cannot represent.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Exact-match filters applied before ranking. `None` means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileFilter {
    pub category: Option<Category>,
    pub availability: Option<Availability>,
}

impl ProfileFilter {
    pub fn matches(&self, profile: &TalentProfile) -> bool {
        self.category.map_or(true, |c| profile.category == c)
            && self
                .availability
                .map_or(true, |a| profile.availability == a)
    }
}

/// Result of adding or removing a like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Changed,
    /// Already liked (on add) or not liked (on remove).
    Unchanged,
    ProfileMissing,
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Profiles matching `filter`, in store order (oldest first, then by id).
    async fn find_by_filters(&self, filter: ProfileFilter)
        -> Result<Vec<TalentProfile>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TalentProfile>, StoreError>;

    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<TalentProfile>, StoreError>;

    /// Looks `id` up as a profile id first, then as an owner account id.
    async fn find_by_id_or_owner(&self, id: Uuid) -> Result<Option<TalentProfile>, StoreError> {
        match self.find_by_id(id).await? {
            Some(profile) => Ok(Some(profile)),
            None => self.find_by_owner(id).await,
        }
    }

    /// Fails with `StoreError::Conflict` when the owner already has a profile.
    async fn insert(&self, profile: NewTalentProfile) -> Result<TalentProfile, StoreError>;

    async fn add_like(&self, profile_id: Uuid, user_id: Uuid) -> Result<LikeOutcome, StoreError>;

    async fn remove_like(&self, profile_id: Uuid, user_id: Uuid)
        -> Result<LikeOutcome, StoreError>;

    /// Ids of every profile `user_id` has liked.
    async fn liked_by(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert(&self, booking: NewBooking) -> Result<Booking, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, StoreError>;

    /// Bookings addressed to the talent account, newest first.
    async fn for_talent(&self, talent_id: Uuid) -> Result<Vec<Booking>, StoreError>;

    /// Bookings made by the recruiter account, newest first.
    async fn for_recruiter(&self, recruiter_id: Uuid) -> Result<Vec<Booking>, StoreError>;

    /// Returns the updated booking, or `None` when `id` does not exist.
    async fn set_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, StoreError>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolves an opaque bearer token. Unknown and expired tokens yield `None`.
    async fn resolve(&self, token: &str) -> Result<Option<Caller>, StoreError>;
}
