//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod health;
pub mod messages;
pub mod notifications;
pub mod posts;
pub mod users;
