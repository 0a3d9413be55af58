//! Post service
//!
//! Feed assembly, post creation, likes, comments, and shares.

use std::collections::HashMap;

use hub_core::{
    Comment, NotificationEvent, NotificationKind, Post, PostFilter, Snowflake, User,
};
use tracing::{info, instrument};

use crate::dto::mappers::deleted_user_placeholder;
use crate::dto::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, FeedResponse, LikeResponse,
    PostResponse, SharePostRequest, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new post
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        author_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let mut post = Post::new(
            self.ctx.generate_id(),
            author_id,
            request.content,
            request.images,
        )?;
        post.tags = request.tags;
        post.location = request.location;
        post.is_public = request.is_public;

        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, "Post created");

        self.assemble_one(post).await
    }

    /// Page of the public feed
    #[instrument(skip(self, filter))]
    pub async fn get_feed(
        &self,
        filter: PostFilter,
        page: i64,
        limit: i64,
    ) -> ServiceResult<FeedResponse> {
        let offset = (page - 1) * limit;

        let posts = self.ctx.post_repo().list(&filter, offset, limit).await?;
        let total = self.ctx.post_repo().count(&filter).await?;

        Ok(FeedResponse {
            posts: self.assemble(posts).await?,
            current_page: page,
            total_pages: super::total_pages(total, limit),
            total_posts: total,
        })
    }

    /// A single post with engagement expanded
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: Snowflake) -> ServiceResult<PostResponse> {
        let post = self.require_post(post_id).await?;
        self.assemble_one(post).await
    }

    /// A user's public posts, newest first
    #[instrument(skip(self))]
    pub async fn get_user_posts(&self, author_id: Snowflake) -> ServiceResult<Vec<PostResponse>> {
        let posts = self.ctx.post_repo().find_by_author(author_id).await?;
        self.assemble(posts).await
    }

    /// Delete a post; only its author may do so
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let post = self.require_post(post_id).await?;

        if !post.is_author(user_id) {
            return Err(hub_core::DomainError::NotPostAuthor.into());
        }

        self.ctx.post_repo().delete(post_id).await?;

        info!(post_id = %post_id, "Post deleted");

        Ok(())
    }

    /// Toggle a like; a fresh like notifies the post author
    #[instrument(skip(self))]
    pub async fn toggle_like(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<LikeResponse> {
        let post = self.require_post(post_id).await?;

        let liked = self.ctx.post_repo().toggle_like(post_id, user_id).await?;

        if liked {
            let liker = self.require_user(user_id).await?;
            let event = NotificationEvent::new(
                post.author_id,
                user_id,
                NotificationKind::Like,
                format!("{} liked your post", liker.name),
            )
            .with_post(post_id);
            NotificationService::new(self.ctx).dispatch(event).await?;
        }

        let likes = self.ctx.post_repo().likes_for(&[post_id]).await?;

        Ok(LikeResponse {
            liked,
            like_count: likes.len(),
        })
    }

    /// Comment on a post, notifying its author
    #[instrument(skip(self, request))]
    pub async fn add_comment(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let post = self.require_post(post_id).await?;
        let author = self.require_user(user_id).await?;

        let comment = Comment::new(self.ctx.generate_id(), post_id, user_id, request.content)?;
        self.ctx.post_repo().add_comment(&comment).await?;

        let event = NotificationEvent::new(
            post.author_id,
            user_id,
            NotificationKind::Comment,
            format!("{} commented on your post", author.name),
        )
        .with_post(post_id)
        .with_comment(comment.id);
        NotificationService::new(self.ctx).dispatch(event).await?;

        Ok(CommentResponse {
            id: comment.id.to_string(),
            author: UserResponse::from(&author),
            content: comment.content,
            created_at: comment.created_at,
        })
    }

    /// Remove a comment; allowed for the comment author and the post author
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        comment_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        let comment = self
            .ctx
            .post_repo()
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        let post = self.require_post(comment.post_id).await?;

        if !comment.removable_by(user_id, post.author_id) {
            return Err(hub_core::DomainError::NotCommentAuthor.into());
        }

        self.ctx.post_repo().delete_comment(comment_id).await?;
        Ok(())
    }

    /// Repost, optionally with commentary; notifies the original author
    #[instrument(skip(self, request))]
    pub async fn share_post(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        request: SharePostRequest,
    ) -> ServiceResult<PostResponse> {
        let original = self.require_post(post_id).await?;
        let sharer = self.require_user(user_id).await?;

        // Shares always point at the root post, so a share of a share still
        // credits the original author.
        let root_id = original.original_post_id.unwrap_or(original.id);
        let root = self.require_post(root_id).await?;

        let share = Post::new_share(self.ctx.generate_id(), user_id, root_id, request.content)?;
        self.ctx.post_repo().create(&share).await?;
        self.ctx.post_repo().add_share(root_id, user_id).await?;

        let event = NotificationEvent::new(
            root.author_id,
            user_id,
            NotificationKind::Share,
            format!("{} shared your post", sharer.name),
        )
        .with_post(root_id);
        NotificationService::new(self.ctx).dispatch(event).await?;

        info!(post_id = %share.id, original = %root_id, "Post shared");

        self.assemble_one(share).await
    }

    async fn require_post(&self, post_id: Snowflake) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))
    }

    async fn require_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    async fn assemble_one(&self, post: Post) -> ServiceResult<PostResponse> {
        let mut responses = self.assemble(vec![post]).await?;
        responses
            .pop()
            .ok_or_else(|| ServiceError::internal("post assembly produced no output"))
    }

    /// Expand raw posts with their authors, likes, comments, and share counts
    async fn assemble(&self, posts: Vec<Post>) -> ServiceResult<Vec<PostResponse>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Snowflake> = posts.iter().map(|p| p.id).collect();

        let likes = self.ctx.post_repo().likes_for(&post_ids).await?;
        let comments = self.ctx.post_repo().comments_for(&post_ids).await?;
        let shares = self.ctx.post_repo().shares_for(&post_ids).await?;

        // One batched lookup covers post authors and comment authors alike
        let mut author_ids: Vec<Snowflake> = posts.iter().map(|p| p.author_id).collect();
        author_ids.extend(comments.iter().map(|c| c.author_id));
        author_ids.sort_unstable();
        author_ids.dedup();

        let users = self.ctx.user_repo().find_by_ids(&author_ids).await?;
        let users: HashMap<Snowflake, &User> = users.iter().map(|u| (u.id, u)).collect();
        let expand = |id: Snowflake| {
            users
                .get(&id)
                .map_or_else(|| deleted_user_placeholder(id), |u| UserResponse::from(*u))
        };

        let responses = posts
            .into_iter()
            .map(|post| {
                let post_likes: Vec<String> = likes
                    .iter()
                    .filter(|(pid, _)| *pid == post.id)
                    .map(|(_, uid)| uid.to_string())
                    .collect();

                let post_comments: Vec<CommentResponse> = comments
                    .iter()
                    .filter(|c| c.post_id == post.id)
                    .map(|c| CommentResponse {
                        id: c.id.to_string(),
                        author: expand(c.author_id),
                        content: c.content.clone(),
                        created_at: c.created_at,
                    })
                    .collect();

                let share_count = shares.iter().filter(|s| s.post_id == post.id).count();

                PostResponse {
                    id: post.id.to_string(),
                    author: expand(post.author_id),
                    content: post.content,
                    images: post.images,
                    tags: post.tags,
                    location: post.location,
                    is_public: post.is_public,
                    original_post_id: post.original_post_id.map(|id| id.to_string()),
                    like_count: post_likes.len(),
                    likes: post_likes,
                    comment_count: post_comments.len(),
                    comments: post_comments,
                    share_count,
                    created_at: post.created_at,
                    updated_at: post.updated_at,
                }
            })
            .collect();

        Ok(responses)
    }
}
