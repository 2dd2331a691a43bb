//! In-memory stores backing the handler and engine tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::models::talent::{NewTalentProfile, TalentProfile};
use crate::models::user::Caller;
use crate::store::{
    BookingStore, LikeOutcome, ProfileFilter, ProfileStore, SessionStore, StoreError,
};

/// Keeps profiles in insertion order, which doubles as store order.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<Vec<TalentProfile>>,
    unavailable: AtomicBool,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: Vec<TalentProfile>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<TalentProfile>> {
        self.profiles.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<TalentProfile>> {
        self.profiles.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_by_filters(
        &self,
        filter: ProfileFilter,
    ) -> Result<Vec<TalentProfile>, StoreError> {
        self.check_available()?;
        Ok(self
            .read()
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TalentProfile>, StoreError> {
        self.check_available()?;
        Ok(self.read().iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<TalentProfile>, StoreError> {
        self.check_available()?;
        Ok(self.read().iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn insert(&self, profile: NewTalentProfile) -> Result<TalentProfile, StoreError> {
        self.check_available()?;
        let mut profiles = self.write();
        if profiles.iter().any(|p| p.user_id == profile.user_id) {
            return Err(StoreError::Conflict(format!(
                "user {} already has a talent profile",
                profile.user_id
            )));
        }
        let profile = profile.into_profile();
        profiles.push(profile.clone());
        Ok(profile)
    }

    async fn add_like(&self, profile_id: Uuid, user_id: Uuid) -> Result<LikeOutcome, StoreError> {
        self.check_available()?;
        let mut profiles = self.write();
        let Some(profile) = profiles.iter_mut().find(|p| p.id == profile_id) else {
            return Ok(LikeOutcome::ProfileMissing);
        };
        if !profile.likes.insert(user_id) {
            return Ok(LikeOutcome::Unchanged);
        }
        profile.updated_at = Utc::now();
        Ok(LikeOutcome::Changed)
    }

    async fn remove_like(
        &self,
        profile_id: Uuid,
        user_id: Uuid,
    ) -> Result<LikeOutcome, StoreError> {
        self.check_available()?;
        let mut profiles = self.write();
        let Some(profile) = profiles.iter_mut().find(|p| p.id == profile_id) else {
            return Ok(LikeOutcome::ProfileMissing);
        };
        if !profile.likes.remove(&user_id) {
            return Ok(LikeOutcome::Unchanged);
        }
        profile.updated_at = Utc::now();
        Ok(LikeOutcome::Changed)
    }

    async fn liked_by(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        self.check_available()?;
        Ok(self
            .read()
            .iter()
            .filter(|p| p.likes.contains(&user_id))
            .map(|p| p.id)
            .collect())
    }
}

/// Keeps bookings in insertion order; listings walk it backwards so the most
/// recently inserted booking comes first.
#[derive(Default)]
pub struct MemoryBookingStore {
    bookings: RwLock<Vec<Booking>>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_first(&self, keep: impl Fn(&Booking) -> bool) -> Vec<Booking> {
        self.bookings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .rev()
            .filter(|b| keep(b))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn insert(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let booking = booking.into_booking();
        self.bookings
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, StoreError> {
        Ok(self
            .bookings
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn for_talent(&self, talent_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        Ok(self.newest_first(|b| b.talent_id == talent_id))
    }

    async fn for_recruiter(&self, recruiter_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        Ok(self.newest_first(|b| b.recruiter_id == recruiter_id))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, StoreError> {
        let mut bookings = self.bookings.write().unwrap_or_else(|e| e.into_inner());
        Ok(bookings.iter_mut().find(|b| b.id == id).map(|b| {
            b.status = status;
            b.updated_at = Utc::now();
            b.clone()
        }))
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Caller>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, token: impl Into<String>, caller: Caller) {
        self.sessions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.into(), caller);
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn resolve(&self, token: &str) -> Result<Option<Caller>, StoreError> {
        Ok(self
            .sessions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .cloned())
    }
}
