//! Database models - SQLx-compatible structs for PostgreSQL tables

mod message;
mod notification;
mod post;
mod user;

pub use message::{ConversationRowModel, MessageModel};
pub use notification::NotificationModel;
pub use post::{CommentModel, LikeModel, PostModel, ShareModel};
pub use user::UserModel;
