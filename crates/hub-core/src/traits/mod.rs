//! Repository traits (ports) - define the interface for data access

mod repositories;

pub use repositories::{
    ConversationSummary, MessageRepository, NotificationRepository, PostFilter, PostRepository,
    PostSort, RepoResult, UserRepository,
};
