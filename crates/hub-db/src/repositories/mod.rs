//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in hub-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod message;
mod notification;
mod post;
mod user;

pub use message::PgMessageRepository;
pub use notification::PgNotificationRepository;
pub use post::PgPostRepository;
pub use user::PgUserRepository;
