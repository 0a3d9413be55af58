//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Comment, Message, Notification, Post, Share, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Batch lookup by ID, order unspecified
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields of an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Set the online flag and refresh last-seen
    async fn set_online(&self, id: Snowflake, online: bool) -> RepoResult<()>;

    /// Case-insensitive name search, capped at `limit` results
    async fn search(&self, query: &str, limit: i64) -> RepoResult<Vec<User>>;

    /// Toggle the follow relationship; returns true when now following
    async fn toggle_follow(&self, follower: Snowflake, followee: Snowflake) -> RepoResult<bool>;

    /// Users following `id`
    async fn followers(&self, id: Snowflake) -> RepoResult<Vec<User>>;

    /// Users that `id` follows
    async fn following(&self, id: Snowflake) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Post Repository
// ============================================================================

/// Feed sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    #[default]
    Newest,
    Oldest,
    /// By like count, ties broken newest-first
    Popular,
}

impl PostSort {
    /// Parse from the query-string form, defaulting to newest
    pub fn parse(s: &str) -> Self {
        match s {
            "oldest" => Self::Oldest,
            "popular" => Self::Popular,
            _ => Self::Newest,
        }
    }
}

/// Filter options for feed queries
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Case-insensitive match against content or tags
    pub search: Option<String>,
    /// Posts carrying any of these tags
    pub tags: Vec<String>,
    /// Restrict to one author
    pub author_id: Option<Snowflake>,
    pub sort: PostSort,
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Find post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Page of public posts matching the filter
    async fn list(&self, filter: &PostFilter, offset: i64, limit: i64) -> RepoResult<Vec<Post>>;

    /// Total count of public posts matching the filter
    async fn count(&self, filter: &PostFilter) -> RepoResult<i64>;

    /// A user's public posts, newest first
    async fn find_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Post>>;

    /// Delete a post and its embedded comments, likes, and shares
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Toggle `user_id` in the like set; returns true when now liked
    async fn toggle_like(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// (post_id, user_id) pairs for every like on the given posts
    async fn likes_for(&self, post_ids: &[Snowflake])
        -> RepoResult<Vec<(Snowflake, Snowflake)>>;

    /// Add a comment
    async fn add_comment(&self, comment: &Comment) -> RepoResult<()>;

    /// Find a comment by ID
    async fn find_comment(&self, comment_id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Delete a comment
    async fn delete_comment(&self, comment_id: Snowflake) -> RepoResult<()>;

    /// Comments for the given posts, newest first within each post
    async fn comments_for(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<Comment>>;

    /// Append a share record to a post
    async fn add_share(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Share records for the given posts
    async fn shares_for(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<Share>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persist a notification
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Find notification by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>>;

    /// Page of a recipient's notifications, newest first
    async fn list_for(
        &self,
        recipient_id: Snowflake,
        offset: i64,
        limit: i64,
    ) -> RepoResult<Vec<Notification>>;

    /// Total notification count for a recipient
    async fn count_for(&self, recipient_id: Snowflake) -> RepoResult<i64>;

    /// Unread notification count for a recipient
    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<i64>;

    /// Mark one notification read
    async fn mark_read(&self, id: Snowflake) -> RepoResult<()>;

    /// Mark all of a recipient's notifications read
    async fn mark_all_read(&self, recipient_id: Snowflake) -> RepoResult<()>;

    /// Delete a notification
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// One row of the conversation list: the latest message exchanged with a
/// peer plus how many of their messages remain unread
#[derive(Debug, Clone)]
pub struct ConversationSummary {
    pub peer_id: Snowflake,
    pub last_message: Message,
    pub unread_count: i64,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a message
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Find message by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// Page of messages between two users, newest first
    async fn conversation(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
        offset: i64,
        limit: i64,
    ) -> RepoResult<Vec<Message>>;

    /// Total messages between two users
    async fn conversation_count(&self, user_a: Snowflake, user_b: Snowflake) -> RepoResult<i64>;

    /// Mark all unread `sender` → `recipient` messages read; returns rows updated
    async fn mark_conversation_read(
        &self,
        sender: Snowflake,
        recipient: Snowflake,
    ) -> RepoResult<u64>;

    /// Latest message and unread count per distinct peer, most recent first
    async fn conversations(&self, user_id: Snowflake) -> RepoResult<Vec<ConversationSummary>>;

    /// Total unread messages addressed to a user
    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<i64>;

    /// Delete a message
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}
