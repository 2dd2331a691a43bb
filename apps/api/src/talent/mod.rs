// Talent profile surface: registration, lookup, likes, and the JSON view
// shared with search results.

pub mod handlers;
pub mod registration;
pub mod view;
