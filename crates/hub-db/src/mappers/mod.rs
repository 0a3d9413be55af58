//! Entity to model mappers
//!
//! This module provides conversions between domain entities (hub-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod message;
mod notification;
mod post;
mod user;

pub use message::MessageInsert;
pub use notification::NotificationInsert;
pub use post::{CommentInsert, PostInsert};
pub use user::{UserInsert, UserUpdate};
