use serde::Deserialize;

use crate::errors::AppError;
use crate::input::{ListField, NumberField};
use crate::models::talent::{Availability, Category, Experience, NewTalentProfile};
use crate::models::user::Caller;

/// Body of `POST /api/talent/register`.
///
/// Fields arrive as loose strings so that missing and malformed values can be
/// reported together with our own messages instead of a serde rejection.
/// `skills` may be a list or comma-separated text; `hourly_rate` may be a
/// number or numeric text.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterTalentRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub category: Option<String>,
    pub skills: Option<ListField>,
    pub experience: Option<String>,
    pub hourly_rate: Option<NumberField>,
    pub location: Option<String>,
    pub portfolio: Option<String>,
    pub availability: Option<String>,
    /// Already-extracted resume text.
    #[serde(default)]
    pub resume_text: String,
    pub profile_pic: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RegisterTalentRequest {
    /// Checks required fields and closed enumerations, producing a profile
    /// ready to insert for `caller`.
    pub fn validate(self, caller: &Caller) -> Result<NewTalentProfile, AppError> {
        let name = non_blank(self.name);
        let phone = non_blank(self.phone);
        let bio = non_blank(self.bio);
        let category = non_blank(self.category);
        let experience = non_blank(self.experience);
        let location = non_blank(self.location);
        let hourly_rate = match &self.hourly_rate {
            Some(rate) => rate.value("hourly_rate")?,
            None => None,
        };

        let missing: Vec<&str> = [
            ("name", name.is_none()),
            ("phone", phone.is_none()),
            ("bio", bio.is_none()),
            ("category", category.is_none()),
            ("experience", experience.is_none()),
            ("hourly_rate", hourly_rate.is_none()),
            ("location", location.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        let (
            Some(name),
            Some(phone),
            Some(bio),
            Some(category),
            Some(experience),
            Some(hourly_rate),
            Some(location),
        ) = (name, phone, bio, category, experience, hourly_rate, location)
        else {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        };

        let category: Category = category.parse()?;
        let experience: Experience = experience.parse()?;
        let availability = match non_blank(self.availability) {
            Some(a) => a.parse::<Availability>()?,
            None => Availability::default(),
        };

        if !hourly_rate.is_finite() || hourly_rate < 0.0 {
            return Err(AppError::Validation(
                "hourly_rate must be a non-negative number".to_string(),
            ));
        }

        let skills = self.skills.map(ListField::into_items).unwrap_or_default();

        Ok(NewTalentProfile {
            user_id: caller.user_id,
            name,
            email: caller.email.clone(),
            phone,
            bio,
            category,
            skills,
            experience,
            hourly_rate,
            location,
            portfolio: non_blank(self.portfolio),
            availability,
            resume_text: self.resume_text,
            profile_pic: non_blank(self.profile_pic),
        })
    }
}
