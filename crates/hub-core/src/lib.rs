//! # hub-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! notification fan-out contract. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, Message, MessageType, Notification, NotificationKind, Post, Share, User,
};
pub use error::DomainError;
pub use events::NotificationEvent;
pub use traits::{
    ConversationSummary, MessageRepository, NotificationRepository, PostFilter, PostRepository,
    PostSort, RepoResult, UserRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
