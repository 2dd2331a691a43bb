pub mod handlers;
pub mod request;
