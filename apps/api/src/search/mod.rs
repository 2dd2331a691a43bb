// Talent search: cosine-similarity scoring over each profile's composite
// document, ranked after exact-match filtering in the profile store.

pub mod engine;
pub mod handlers;
pub mod similarity;
