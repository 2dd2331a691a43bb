//! Term-frequency cosine similarity between a query and a profile's text.
//!
//! This is the only scoring implementation in the system; clients render the
//! `similarity` the server returns and never recompute it.

use std::collections::HashMap;

use crate::models::talent::TalentProfile;

/// Term → occurrence count.
pub type TermFrequencies<'a> = HashMap<&'a str, u32>;

/// Splits on runs of whitespace; empty tokens never appear.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Counts each whitespace-delimited term. Expects already lower-cased input.
pub fn term_frequencies(text: &str) -> TermFrequencies<'_> {
    let mut tf = HashMap::new();
    for term in tokenize(text) {
        *tf.entry(term).or_insert(0) += 1;
    }
    tf
}

fn magnitude(tf: &TermFrequencies<'_>) -> f64 {
    tf.values()
        .map(|&count| f64::from(count) * f64::from(count))
        .sum::<f64>()
        .sqrt()
}

/// Cosine of the angle between two term-frequency vectors.
/// Zero whenever either side has no terms.
pub fn cosine(query: &TermFrequencies<'_>, document: &TermFrequencies<'_>) -> f64 {
    let query_magnitude = magnitude(query);
    let document_magnitude = magnitude(document);
    if query_magnitude == 0.0 || document_magnitude == 0.0 {
        return 0.0;
    }

    // Iterate the smaller map; only shared terms contribute.
    let (small, large) = if query.len() <= document.len() {
        (query, document)
    } else {
        (document, query)
    };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, &a)| large.get(term).map(|&b| f64::from(a) * f64::from(b)))
        .sum();

    (dot / (query_magnitude * document_magnitude)).clamp(0.0, 1.0)
}

/// The searchable text of a profile: bio, skills, category, experience and
/// resume text, space-joined in that order and lower-cased.
pub fn composite_document(profile: &TalentProfile) -> String {
    let skills = profile.skills.join(" ");
    [
        profile.bio.as_str(),
        skills.as_str(),
        profile.category.as_str(),
        profile.experience.as_str(),
        profile.resume_text.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}
