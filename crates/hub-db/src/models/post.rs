//! Post, comment, like and share database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub content: Option<String>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub is_public: bool,
    pub original_post_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Database model for post_likes table
#[derive(Debug, Clone, FromRow)]
pub struct LikeModel {
    pub post_id: i64,
    pub user_id: i64,
}

/// Database model for post_shares table
#[derive(Debug, Clone, FromRow)]
pub struct ShareModel {
    pub post_id: i64,
    pub user_id: i64,
    pub shared_at: DateTime<Utc>,
}
