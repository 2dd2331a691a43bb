use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::models::talent::{NewTalentProfile, TalentProfile, UnknownVariant};
use crate::models::user::Caller;
use crate::store::{
    BookingStore, LikeOutcome, ProfileFilter, ProfileStore, SessionStore, StoreError,
};

/// Columns of `talent_profiles` plus the aggregated like set.
const PROFILE_SELECT: &str = r#"
    SELECT p.id, p.user_id, p.name, p.email, p.phone, p.bio, p.category, p.skills,
           p.experience, p.hourly_rate, p.location, p.portfolio, p.availability,
           p.resume_text, p.profile_pic, p.created_at, p.updated_at,
           COALESCE(
               ARRAY_AGG(l.user_id ORDER BY l.user_id) FILTER (WHERE l.user_id IS NOT NULL),
               '{}'::uuid[]
           ) AS likes
    FROM talent_profiles p
    LEFT JOIN talent_likes l ON l.talent_id = p.id
"#;

#[derive(Debug, Clone, FromRow)]
pub struct TalentProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub category: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub hourly_rate: f64,
    pub location: String,
    pub portfolio: Option<String>,
    pub availability: String,
    pub resume_text: String,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes: Vec<Uuid>,
}

impl TryFrom<TalentProfileRow> for TalentProfile {
    type Error = StoreError;

    fn try_from(row: TalentProfileRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt =
            |e: UnknownVariant| StoreError::Corrupt(format!("talent profile {id}: {e}"));
        Ok(TalentProfile {
            category: row.category.parse().map_err(corrupt)?,
            experience: row.experience.parse().map_err(corrupt)?,
            availability: row.availability.parse().map_err(corrupt)?,
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            bio: row.bio,
            skills: row.skills,
            hourly_rate: row.hourly_rate,
            location: row.location,
            portfolio: row.portfolio,
            resume_text: row.resume_text,
            profile_pic: row.profile_pic,
            likes: row.likes.into_iter().collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_profiles(rows: Vec<TalentProfileRow>) -> Result<Vec<TalentProfile>, StoreError> {
    rows.into_iter().map(TalentProfile::try_from).collect()
}

/// `ProfileStore` over the `talent_profiles` / `talent_likes` tables.
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn profile_exists(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM talent_profiles WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn touch(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("UPDATE talent_profiles SET updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find_by_filters(
        &self,
        filter: ProfileFilter,
    ) -> Result<Vec<TalentProfile>, StoreError> {
        let sql = format!(
            "{PROFILE_SELECT}
            WHERE ($1::text IS NULL OR p.category = $1)
              AND ($2::text IS NULL OR p.availability = $2)
            GROUP BY p.id
            ORDER BY p.created_at, p.id"
        );
        let rows = sqlx::query_as::<_, TalentProfileRow>(&sql)
            .bind(filter.category.map(|c| c.as_str()))
            .bind(filter.availability.map(|a| a.as_str()))
            .fetch_all(&self.pool)
            .await?;
        debug!("Fetched {} talent profiles for {:?}", rows.len(), filter);
        into_profiles(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TalentProfile>, StoreError> {
        let sql = format!("{PROFILE_SELECT} WHERE p.id = $1 GROUP BY p.id");
        sqlx::query_as::<_, TalentProfileRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(TalentProfile::try_from)
            .transpose()
    }

    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<TalentProfile>, StoreError> {
        let sql = format!("{PROFILE_SELECT} WHERE p.user_id = $1 GROUP BY p.id");
        sqlx::query_as::<_, TalentProfileRow>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .map(TalentProfile::try_from)
            .transpose()
    }

    async fn insert(&self, profile: NewTalentProfile) -> Result<TalentProfile, StoreError> {
        let user_id = profile.user_id;
        let profile = profile.into_profile();

        let result = sqlx::query(
            r#"
            INSERT INTO talent_profiles
                (id, user_id, name, email, phone, bio, category, skills, experience,
                 hourly_rate, location, portfolio, availability, resume_text, profile_pic,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.bio)
        .bind(profile.category.as_str())
        .bind(&profile.skills)
        .bind(profile.experience.as_str())
        .bind(profile.hourly_rate)
        .bind(&profile.location)
        .bind(&profile.portfolio)
        .bind(profile.availability.as_str())
        .bind(&profile.resume_text)
        .bind(&profile.profile_pic)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict(format!(
                "user {user_id} already has a talent profile"
            )));
        }

        info!("Inserted talent profile {} for user {user_id}", profile.id);
        Ok(profile)
    }

    async fn add_like(&self, profile_id: Uuid, user_id: Uuid) -> Result<LikeOutcome, StoreError> {
        if !self.profile_exists(profile_id).await? {
            return Ok(LikeOutcome::ProfileMissing);
        }
        let result = sqlx::query(
            "INSERT INTO talent_likes (talent_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(profile_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(LikeOutcome::Unchanged);
        }
        self.touch(profile_id).await?;
        Ok(LikeOutcome::Changed)
    }

    async fn remove_like(
        &self,
        profile_id: Uuid,
        user_id: Uuid,
    ) -> Result<LikeOutcome, StoreError> {
        if !self.profile_exists(profile_id).await? {
            return Ok(LikeOutcome::ProfileMissing);
        }
        let result = sqlx::query("DELETE FROM talent_likes WHERE talent_id = $1 AND user_id = $2")
            .bind(profile_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(LikeOutcome::Unchanged);
        }
        self.touch(profile_id).await?;
        Ok(LikeOutcome::Changed)
    }

    async fn liked_by(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        Ok(sqlx::query_scalar(
            "SELECT talent_id FROM talent_likes WHERE user_id = $1 ORDER BY created_at, talent_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }
}

const BOOKING_COLUMNS: &str = "id, recruiter_id, talent_id, talent_profile_id, project_date, \
     duration_hours, budget, message, status, created_at, updated_at";

#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub recruiter_id: Uuid,
    pub talent_id: Uuid,
    pub talent_profile_id: Uuid,
    pub project_date: DateTime<Utc>,
    pub duration_hours: f64,
    pub budget: f64,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = StoreError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("booking {}: {e}", row.id)))?;
        Ok(Booking {
            id: row.id,
            recruiter_id: row.recruiter_id,
            talent_id: row.talent_id,
            talent_profile_id: row.talent_profile_id,
            project_date: row.project_date,
            duration_hours: row.duration_hours,
            budget: row.budget,
            message: row.message,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// `BookingStore` over the `bookings` table.
#[derive(Clone)]
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_where(&self, column: &str, account: Uuid) -> Result<Vec<Booking>, StoreError> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE {column} = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(account)
            .fetch_all(&self.pool)
            .await?;
        debug!("Fetched {} bookings by {column} {account}", rows.len());
        rows.into_iter().map(Booking::try_from).collect()
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn insert(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let booking = booking.into_booking();
        sqlx::query(&format!(
            "INSERT INTO bookings ({BOOKING_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"
        ))
        .bind(booking.id)
        .bind(booking.recruiter_id)
        .bind(booking.talent_id)
        .bind(booking.talent_profile_id)
        .bind(booking.project_date)
        .bind(booking.duration_hours)
        .bind(booking.budget)
        .bind(&booking.message)
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;

        info!(
            "Inserted booking {} from recruiter {} for talent {}",
            booking.id, booking.recruiter_id, booking.talent_id
        );
        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, StoreError> {
        sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Booking::try_from)
        .transpose()
    }

    async fn for_talent(&self, talent_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        self.list_where("talent_id", talent_id).await
    }

    async fn for_recruiter(&self, recruiter_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        self.list_where("recruiter_id", recruiter_id).await
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Option<Booking>, StoreError> {
        sqlx::query_as::<_, BookingRow>(&format!(
            "UPDATE bookings SET status = $2, updated_at = now() WHERE id = $1 \
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .map(Booking::try_from)
        .transpose()
    }
}

#[derive(Debug, FromRow)]
struct SessionCallerRow {
    user_id: Uuid,
    email: String,
    role: String,
}

/// `SessionStore` over the `sessions` / `users` tables.
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn resolve(&self, token: &str) -> Result<Option<Caller>, StoreError> {
        let row: Option<SessionCallerRow> = sqlx::query_as(
            r#"
            SELECT u.id AS user_id, u.email, u.role
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1 AND s.expires_at > now()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| {
            let role = r
                .role
                .parse()
                .map_err(|e| StoreError::Corrupt(format!("user {}: {e}", r.user_id)))?;
            Ok(Caller {
                user_id: r.user_id,
                email: r.email,
                role,
            })
        })
        .transpose()
    }
}
