use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Raised when a string does not name a member of one of the closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {field} (expected one of: {expected})")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

impl UnknownVariant {
    fn new(field: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            field,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Professional,
    Creative,
    Technical,
    Household,
    Showbizz,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Professional,
        Category::Creative,
        Category::Technical,
        Category::Household,
        Category::Showbizz,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Professional => "Professional",
            Category::Creative => "Creative",
            Category::Technical => "Technical",
            Category::Household => "Household",
            Category::Showbizz => "Showbizz",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                UnknownVariant::new("category", s, &names)
            })
    }
}

/// Years-of-experience bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Experience {
    #[serde(rename = "0-1")]
    UpToOne,
    #[serde(rename = "1-3")]
    OneToThree,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "5-10")]
    FiveToTen,
    #[serde(rename = "10+")]
    TenPlus,
}

impl Experience {
    pub const ALL: [Experience; 5] = [
        Experience::UpToOne,
        Experience::OneToThree,
        Experience::ThreeToFive,
        Experience::FiveToTen,
        Experience::TenPlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::UpToOne => "0-1",
            Experience::OneToThree => "1-3",
            Experience::ThreeToFive => "3-5",
            Experience::FiveToTen => "5-10",
            Experience::TenPlus => "10+",
        }
    }
}

impl FromStr for Experience {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Experience::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Experience::ALL.iter().map(|e| e.as_str()).collect();
                UnknownVariant::new("experience", s, &names)
            })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Freelance,
}

impl Availability {
    pub const ALL: [Availability; 4] = [
        Availability::FullTime,
        Availability::PartTime,
        Availability::Contract,
        Availability::Freelance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::FullTime => "full-time",
            Availability::PartTime => "part-time",
            Availability::Contract => "contract",
            Availability::Freelance => "freelance",
        }
    }
}

impl FromStr for Availability {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Availability::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Availability::ALL.iter().map(|a| a.as_str()).collect();
                UnknownVariant::new("availability", s, &names)
            })
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Category, Experience, Availability);

/// A registered service provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TalentProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub category: Category,
    pub skills: Vec<String>,
    pub experience: Experience,
    pub hourly_rate: f64,
    pub location: String,
    pub portfolio: Option<String>,
    pub availability: Availability,
    /// Plain text extracted from the uploaded resume at registration time.
    pub resume_text: String,
    pub profile_pic: Option<String>,
    /// Accounts that liked this profile.
    pub likes: BTreeSet<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TalentProfile {
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}

/// Validated input for a profile insert. Enum fields are already typed, so an
/// out-of-range value can never reach the store.
#[derive(Debug, Clone)]
pub struct NewTalentProfile {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub category: Category,
    pub skills: Vec<String>,
    pub experience: Experience,
    pub hourly_rate: f64,
    pub location: String,
    pub portfolio: Option<String>,
    pub availability: Availability,
    pub resume_text: String,
    pub profile_pic: Option<String>,
}

impl NewTalentProfile {
    /// Materializes the profile with a fresh id and timestamps.
    pub fn into_profile(self) -> TalentProfile {
        let now = Utc::now();
        TalentProfile {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            bio: self.bio,
            category: self.category,
            skills: self.skills,
            experience: self.experience,
            hourly_rate: self.hourly_rate,
            location: self.location,
            portfolio: self.portfolio,
            availability: self.availability,
            resume_text: self.resume_text,
            profile_pic: self.profile_pic,
            likes: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        }
    }

    #[test]
    fn test_category_is_case_sensitive() {
        let err = "technical".parse::<Category>().unwrap_err();
        assert_eq!(err.field, "category");
        assert!(err.to_string().contains("Technical"));
    }

    #[test]
    fn test_experience_rejects_unknown_bucket() {
        assert_eq!("10+".parse::<Experience>().unwrap(), Experience::TenPlus);
        assert!("2-4".parse::<Experience>().is_err());
    }

    #[test]
    fn test_availability_serde_matches_wire_names() {
        let json = serde_json::to_string(&Availability::PartTime).unwrap();
        assert_eq!(json, "\"part-time\"");
        let parsed: Availability = serde_json::from_str("\"freelance\"").unwrap();
        assert_eq!(parsed, Availability::Freelance);
        assert!(serde_json::from_str::<Availability>("\"weekends\"").is_err());
    }

    #[test]
    fn test_experience_serde_uses_bucket_labels() {
        let json = serde_json::to_string(&Experience::FiveToTen).unwrap();
        assert_eq!(json, "\"5-10\"");
    }

    #[test]
    fn test_availability_defaults_to_full_time() {
        assert_eq!(Availability::default(), Availability::FullTime);
    }
}
