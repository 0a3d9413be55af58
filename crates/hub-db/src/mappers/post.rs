//! Post and comment entity <-> model mappers

use hub_core::{Comment, Post, Share, Snowflake};

use crate::models::{CommentModel, PostModel, ShareModel};

/// Convert PostModel to Post entity
impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            images: model.images,
            tags: model.tags,
            location: model.location,
            is_public: model.is_public,
            original_post_id: model.original_post_id.map(Snowflake::new),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert CommentModel to Comment entity
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            created_at: model.created_at,
        }
    }
}

/// Convert ShareModel to Share entity
impl From<ShareModel> for Share {
    fn from(model: ShareModel) -> Self {
        Share {
            post_id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            shared_at: model.shared_at,
        }
    }
}

/// Convert Post entity reference to values for database insertion
pub struct PostInsert<'a> {
    pub id: i64,
    pub author_id: i64,
    pub content: Option<&'a str>,
    pub images: &'a [String],
    pub tags: &'a [String],
    pub location: Option<&'a str>,
    pub is_public: bool,
    pub original_post_id: Option<i64>,
}

impl<'a> PostInsert<'a> {
    pub fn new(post: &'a Post) -> Self {
        Self {
            id: post.id.into_inner(),
            author_id: post.author_id.into_inner(),
            content: post.content.as_deref(),
            images: &post.images,
            tags: &post.tags,
            location: post.location.as_deref(),
            is_public: post.is_public,
            original_post_id: post.original_post_id.map(Snowflake::into_inner),
        }
    }
}

/// Convert Comment entity reference to values for database insertion
pub struct CommentInsert<'a> {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub content: &'a str,
}

impl<'a> CommentInsert<'a> {
    pub fn new(comment: &'a Comment) -> Self {
        Self {
            id: comment.id.into_inner(),
            post_id: comment.post_id.into_inner(),
            author_id: comment.author_id.into_inner(),
            content: &comment.content,
        }
    }
}
