pub mod auth;
pub mod content;
pub mod messages;
pub mod upload;
