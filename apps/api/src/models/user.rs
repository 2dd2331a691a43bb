use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::talent::UnknownVariant;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Talent,
    Recruiter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Talent => "talent",
            Role::Recruiter => "recruiter",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "talent" => Ok(Role::Talent),
            "recruiter" => Ok(Role::Recruiter),
            other => Err(UnknownVariant {
                field: "role",
                value: other.to_string(),
                expected: "talent, recruiter".to_string(),
            }),
        }
    }
}

/// The authenticated account behind a request, resolved from its bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}
