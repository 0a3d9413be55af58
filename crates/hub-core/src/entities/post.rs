//! Post entity - a feed post with embedded comments, likes, and shares

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum post content length
pub const MAX_POST_LENGTH: usize = 1000;

/// Maximum comment length
pub const MAX_COMMENT_LENGTH: usize = 500;

/// Feed post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: Option<String>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub is_public: bool,
    /// Set when this post is a share of another post
    pub original_post_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post, validating the content-or-image invariant
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        content: Option<String>,
        images: Vec<String>,
    ) -> Result<Self, DomainError> {
        let content = content.filter(|c| !c.trim().is_empty());

        if content.is_none() && images.is_empty() {
            return Err(DomainError::EmptyPost);
        }
        if let Some(ref text) = content {
            if text.chars().count() > MAX_POST_LENGTH {
                return Err(DomainError::ContentTooLong {
                    max: MAX_POST_LENGTH,
                });
            }
        }

        let now = Utc::now();
        Ok(Self {
            id,
            author_id,
            content,
            images,
            tags: Vec::new(),
            location: None,
            is_public: true,
            original_post_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Create a share of `original`, attributed to `author_id`
    ///
    /// A share may carry its own commentary but needs no content of its own.
    pub fn new_share(
        id: Snowflake,
        author_id: Snowflake,
        original: Snowflake,
        content: Option<String>,
    ) -> Result<Self, DomainError> {
        let content = content.filter(|c| !c.trim().is_empty());
        if let Some(ref text) = content {
            if text.chars().count() > MAX_POST_LENGTH {
                return Err(DomainError::ContentTooLong {
                    max: MAX_POST_LENGTH,
                });
            }
        }

        let now = Utc::now();
        Ok(Self {
            id,
            author_id,
            content,
            images: Vec::new(),
            tags: Vec::new(),
            location: None,
            is_public: true,
            original_post_id: Some(original),
            created_at: now,
            updated_at: now,
        })
    }

    /// Check if this post is a share of another post
    #[inline]
    pub fn is_share(&self) -> bool {
        self.original_post_id.is_some()
    }

    /// Check if the given identity is the author
    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }
}

/// Comment embedded in a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new Comment, validating length and non-emptiness
    pub fn new(
        id: Snowflake,
        post_id: Snowflake,
        author_id: Snowflake,
        content: String,
    ) -> Result<Self, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Comment text is required".to_string(),
            ));
        }
        if content.chars().count() > MAX_COMMENT_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: MAX_COMMENT_LENGTH,
            });
        }

        Ok(Self {
            id,
            post_id,
            author_id,
            content,
            created_at: Utc::now(),
        })
    }

    /// A comment is removable by its own author or the post's author
    #[inline]
    pub fn removable_by(&self, user_id: Snowflake, post_author: Snowflake) -> bool {
        self.author_id == user_id || post_author == user_id
    }
}

/// Share record attached to an original post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub shared_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_requires_content_or_image() {
        let err = Post::new(Snowflake::new(1), Snowflake::new(2), None, vec![]);
        assert!(matches!(err, Err(DomainError::EmptyPost)));

        let err = Post::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Some("   ".to_string()),
            vec![],
        );
        assert!(matches!(err, Err(DomainError::EmptyPost)));

        let post = Post::new(
            Snowflake::new(1),
            Snowflake::new(2),
            None,
            vec!["photo.jpg".to_string()],
        )
        .unwrap();
        assert!(post.content.is_none());
        assert_eq!(post.images.len(), 1);
    }

    #[test]
    fn test_post_content_length_limit() {
        let long = "x".repeat(MAX_POST_LENGTH + 1);
        let err = Post::new(Snowflake::new(1), Snowflake::new(2), Some(long), vec![]);
        assert!(matches!(err, Err(DomainError::ContentTooLong { .. })));
    }

    #[test]
    fn test_share_needs_no_content() {
        let share = Post::new_share(Snowflake::new(3), Snowflake::new(2), Snowflake::new(1), None)
            .unwrap();
        assert!(share.is_share());
        assert_eq!(share.original_post_id, Some(Snowflake::new(1)));
    }

    #[test]
    fn test_comment_validation() {
        let err = Comment::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "  ".to_string(),
        );
        assert!(err.is_err());

        let long = "x".repeat(MAX_COMMENT_LENGTH + 1);
        let err = Comment::new(Snowflake::new(1), Snowflake::new(2), Snowflake::new(3), long);
        assert!(matches!(err, Err(DomainError::ContentTooLong { .. })));
    }

    #[test]
    fn test_comment_removable_by_post_author() {
        let comment = Comment::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "nice".to_string(),
        )
        .unwrap();

        let post_author = Snowflake::new(9);
        assert!(comment.removable_by(Snowflake::new(3), post_author));
        assert!(comment.removable_by(post_author, post_author));
        assert!(!comment.removable_by(Snowflake::new(4), post_author));
    }
}
