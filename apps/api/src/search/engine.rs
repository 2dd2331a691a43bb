//! Talent ranking: filter through the store, score each candidate against
//! the query, stable-sort by descending score.
//!
//! Holds no state between calls. The only await point is the store fetch.

use tracing::{debug, info};

use crate::models::talent::TalentProfile;
use crate::search::similarity::{composite_document, cosine, term_frequencies};
use crate::store::{ProfileFilter, ProfileStore, StoreError};

/// Scores closer than this are treated as equal when ordering results.
pub const SCORE_EPSILON: f64 = 1e-9;

/// One search hit. `similarity` is `None` in browse mode (no query).
#[derive(Debug, Clone, PartialEq)]
pub struct RankedProfile {
    pub profile: TalentProfile,
    pub similarity: Option<f64>,
}

/// Runs a search against the store.
///
/// An absent or blank query returns the filtered candidates in store order,
/// unscored. Otherwise every candidate is scored and the list is sorted by
/// descending similarity; ties keep store order.
pub async fn search(
    store: &dyn ProfileStore,
    query: Option<&str>,
    filter: ProfileFilter,
) -> Result<Vec<RankedProfile>, StoreError> {
    let candidates = store.find_by_filters(filter).await?;

    let ranked = match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => rank(candidates, q),
        None => candidates
            .into_iter()
            .map(|profile| RankedProfile {
                profile,
                similarity: None,
            })
            .collect(),
    };

    info!(
        "Talent search returned {} results (query: {}, filter: {:?})",
        ranked.len(),
        query.is_some_and(|q| !q.trim().is_empty()),
        filter
    );
    Ok(ranked)
}

/// Scores and orders `candidates` against a non-empty query.
pub fn rank(candidates: Vec<TalentProfile>, query: &str) -> Vec<RankedProfile> {
    let query = query.to_lowercase();
    let query_tf = term_frequencies(&query);

    let mut ranked: Vec<RankedProfile> = candidates
        .into_iter()
        .map(|profile| {
            let document = composite_document(&profile);
            let score = cosine(&query_tf, &term_frequencies(&document));
            RankedProfile {
                profile,
                similarity: Some(score),
            }
        })
        .collect();

    // `sort_by_key` is stable, so equal keys preserve candidate order.
    ranked.sort_by_key(|r| std::cmp::Reverse(sort_key(r.similarity.unwrap_or(0.0))));

    debug!(
        "Ranked {} candidates, top score {:?}",
        ranked.len(),
        ranked.first().and_then(|r| r.similarity)
    );
    ranked
}

/// Quantizes a score in [0, 1] so floating-point noise below
/// `SCORE_EPSILON` cannot reorder results.
fn sort_key(score: f64) -> i64 {
    (score / SCORE_EPSILON).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::talent::{Availability, Category, Experience, NewTalentProfile};
    use crate::store::memory::MemoryProfileStore;
    use uuid::Uuid;

    fn profile(
        name: &str,
        bio: &str,
        skills: &[&str],
        category: Category,
        availability: Availability,
    ) -> TalentProfile {
        NewTalentProfile {
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0101".to_string(),
            bio: bio.to_string(),
            category,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience: Experience::ThreeToFive,
            hourly_rate: 40.0,
            location: "Nairobi".to_string(),
            portfolio: None,
            availability,
            resume_text: String::new(),
            profile_pic: None,
        }
        .into_profile()
    }

    fn names(results: &[RankedProfile]) -> Vec<&str> {
        results.iter().map(|r| r.profile.name.as_str()).collect()
    }

    fn sample_store() -> MemoryProfileStore {
        MemoryProfileStore::with_profiles(vec![
            profile(
                "Chef",
                "Professional chef",
                &["Cooking"],
                Category::Household,
                Availability::PartTime,
            ),
            profile(
                "Dev",
                "Experienced React Developer with 5 years",
                &["React", "Node"],
                Category::Technical,
                Availability::FullTime,
            ),
            profile(
                "Designer",
                "Brand design and illustration",
                &["Figma"],
                Category::Creative,
                Availability::Freelance,
            ),
        ])
    }

    #[tokio::test]
    async fn test_query_ranks_matching_profile_first() {
        let store = sample_store();
        let results = search(&store, Some("react developer"), ProfileFilter::default())
            .await
            .unwrap();

        assert_eq!(results[0].profile.name, "Dev");
        let dev = results[0].similarity.unwrap();
        let chef = results
            .iter()
            .find(|r| r.profile.name == "Chef")
            .and_then(|r| r.similarity)
            .unwrap();
        assert!(dev > 0.0);
        assert_eq!(chef, 0.0);
    }

    #[tokio::test]
    async fn test_browse_mode_returns_store_order_unscored() {
        let store = sample_store();
        for query in [None, Some(""), Some("   ")] {
            let results = search(&store, query, ProfileFilter::default())
                .await
                .unwrap();
            assert_eq!(names(&results), vec!["Chef", "Dev", "Designer"]);
            assert!(results.iter().all(|r| r.similarity.is_none()));
        }
    }

    #[tokio::test]
    async fn test_category_filter_applies_before_ranking() {
        let store = MemoryProfileStore::with_profiles(vec![
            profile(
                "Creative",
                "I design logos",
                &[],
                Category::Creative,
                Availability::FullTime,
            ),
            profile(
                "Technical",
                "I design systems",
                &[],
                Category::Technical,
                Availability::FullTime,
            ),
        ]);
        let filter = ProfileFilter {
            category: Some(Category::Technical),
            availability: None,
        };

        let results = search(&store, Some("design"), filter).await.unwrap();

        assert_eq!(names(&results), vec!["Technical"]);
        assert!(results[0].similarity.unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_filters_never_leak_non_matching_profiles() {
        let store = sample_store();
        let filter = ProfileFilter {
            category: None,
            availability: Some(Availability::Freelance),
        };
        let results = search(&store, Some("react chef design"), filter)
            .await
            .unwrap();
        assert!(results
            .iter()
            .all(|r| r.profile.availability == Availability::Freelance));
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_candidate_list_is_not_an_error() {
        let store = MemoryProfileStore::new();
        let results = search(&store, Some("anything"), ProfileFilter::default())
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = sample_store();
        store.set_unavailable(true);
        let err = search(&store, Some("react"), ProfileFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_search_is_idempotent() {
        let store = sample_store();
        let first = search(&store, Some("design react"), ProfileFilter::default())
            .await
            .unwrap();
        let second = search(&store, Some("design react"), ProfileFilter::default())
            .await
            .unwrap();
        assert_eq!(names(&first), names(&second));
        for (a, b) in first.iter().zip(&second) {
            let (a, b) = (a.similarity.unwrap(), b.similarity.unwrap());
            assert!((a - b).abs() < SCORE_EPSILON);
        }
    }

    #[test]
    fn test_identical_profiles_tie_in_candidate_order() {
        let twin = |name: &str| {
            profile(
                name,
                "wedding photographer",
                &["Photography"],
                Category::Creative,
                Availability::Contract,
            )
        };
        let other = profile(
            "Other",
            "plumber",
            &[],
            Category::Household,
            Availability::Contract,
        );
        let results = rank(
            vec![other, twin("First"), twin("Second")],
            "photographer",
        );

        assert_eq!(names(&results), vec!["First", "Second", "Other"]);
        assert_eq!(results[0].similarity, results[1].similarity);
    }

    #[test]
    fn test_rank_orders_by_descending_score() {
        let candidates = vec![
            profile("Low", "rust", &[], Category::Technical, Availability::FullTime),
            profile(
                "High",
                "rust rust tokio axum",
                &["Rust", "Tokio", "Axum"],
                Category::Technical,
                Availability::FullTime,
            ),
        ];
        let results = rank(candidates, "rust tokio axum");
        assert_eq!(names(&results), vec!["High", "Low"]);
        let scores: Vec<f64> = results.iter().filter_map(|r| r.similarity).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_sort_key_absorbs_float_noise() {
        assert_eq!(sort_key(0.5), sort_key(0.5 + 1e-12));
        assert!(sort_key(0.5) > sort_key(0.49));
    }
}
