pub mod booking;
pub mod talent;
pub mod user;
