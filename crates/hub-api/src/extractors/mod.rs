//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use pagination::{Pagination, PaginationParams, CONVERSATION_LIMIT, NOTIFICATION_LIMIT};
pub use path::{CommentIdPath, MessageIdPath, NotificationIdPath, PostIdPath, UserIdPath};
pub use validated::{OptionalValidatedJson, ValidatedJson};
