//! Domain entities - core business objects

mod message;
mod notification;
mod post;
mod user;

pub use message::{Message, MessageType};
pub use notification::{Notification, NotificationKind};
pub use post::{Comment, Post, Share};
pub use user::User;
