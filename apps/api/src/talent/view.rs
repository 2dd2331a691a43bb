use serde::Serialize;
use uuid::Uuid;

use crate::models::talent::TalentProfile;
use crate::search::engine::RankedProfile;

/// A profile as returned to clients, carrying everything a listing or card
/// needs so the client never follows up with per-id lookups.
#[derive(Debug, Clone, Serialize)]
pub struct TalentView {
    #[serde(flatten)]
    pub profile: TalentProfile,
    pub like_count: usize,
    /// Whether the requesting account is in `likes`.
    pub liked_by_me: bool,
    /// Relevance in [0, 1]; only present when a search query was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl TalentView {
    pub fn new(profile: TalentProfile, viewer: Uuid, similarity: Option<f64>) -> Self {
        Self {
            like_count: profile.like_count(),
            liked_by_me: profile.likes.contains(&viewer),
            similarity,
            profile,
        }
    }

    pub fn from_ranked(ranked: RankedProfile, viewer: Uuid) -> Self {
        Self::new(ranked.profile, viewer, ranked.similarity)
    }
}
