//! Axum route handler for talent search.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::AppQuery;
use crate::models::talent::{Availability, Category};
use crate::search::engine::search;
use crate::state::AppState;
use crate::store::ProfileFilter;
use crate::talent::view::TalentView;

/// Query string of `GET /api/talent/search`. Blank values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub category: Option<String>,
    pub availability: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl SearchParams {
    /// Parses the enum filters, rejecting values outside the enumerations.
    pub fn filter(&self) -> Result<ProfileFilter, AppError> {
        Ok(ProfileFilter {
            category: present(&self.category)
                .map(str::parse::<Category>)
                .transpose()?,
            availability: present(&self.availability)
                .map(str::parse::<Availability>)
                .transpose()?,
        })
    }
}

/// GET /api/talent/search
///
/// Returns profiles ranked by cosine similarity to `query`, or the filtered
/// list in store order when no query is given.
pub async fn handle_search(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    AppQuery(params): AppQuery<SearchParams>,
) -> Result<Json<Vec<TalentView>>, AppError> {
    let filter = params.filter()?;

    let limit = state.config.search_max_query_chars;
    if let Some(q) = params.query.as_deref() {
        if q.chars().count() > limit {
            return Err(AppError::Validation(format!(
                "query must be at most {limit} characters"
            )));
        }
    }

    let results = search(state.profiles.as_ref(), params.query.as_deref(), filter).await?;

    Ok(Json(
        results
            .into_iter()
            .map(|r| TalentView::from_ranked(r, caller.user_id))
            .collect(),
    ))
}
