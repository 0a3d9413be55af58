//! User service
//!
//! Profile pages, profile edits, the follow toggle, and user search.

use hub_core::{NotificationEvent, NotificationKind, PostFilter, Snowflake};
use tracing::{info, instrument};

use crate::dto::{FollowResponse, ProfileResponse, UpdateProfileRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

const SEARCH_LIMIT: i64 = 20;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public profile with follower, following and post counts
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Snowflake) -> ServiceResult<ProfileResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let followers = self.ctx.user_repo().followers(user_id).await?;
        let following = self.ctx.user_repo().following(user_id).await?;

        let filter = PostFilter {
            author_id: Some(user_id),
            ..Default::default()
        };
        let post_count = self.ctx.post_repo().count(&filter).await?;

        Ok(ProfileResponse {
            user: UserResponse::from(&user),
            follower_count: followers.len(),
            following_count: following.len(),
            post_count,
        })
    }

    /// Update the authenticated user's own profile
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        if let Some(name) = request.name {
            user.set_name(name);
        }
        if let Some(bio) = request.bio {
            user.set_bio(Some(bio));
        }
        if let Some(avatar) = request.avatar {
            user.avatar = if avatar.is_empty() { None } else { Some(avatar) };
        }

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user_id, "Profile updated");

        Ok(UserResponse::from(&user))
    }

    /// Toggle following another user; a fresh follow notifies the followee
    #[instrument(skip(self))]
    pub async fn toggle_follow(
        &self,
        follower_id: Snowflake,
        followee_id: Snowflake,
    ) -> ServiceResult<FollowResponse> {
        let follower = self
            .ctx
            .user_repo()
            .find_by_id(follower_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", follower_id.to_string()))?;

        let followee = self
            .ctx
            .user_repo()
            .find_by_id(followee_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", followee_id.to_string()))?;

        if !follower.can_follow(followee.id) {
            return Err(hub_core::DomainError::SelfFollow.into());
        }

        let following = self
            .ctx
            .user_repo()
            .toggle_follow(follower_id, followee_id)
            .await?;

        if following {
            let event = NotificationEvent::new(
                followee_id,
                follower_id,
                NotificationKind::Follow,
                format!("{} started following you", follower.name),
            );
            NotificationService::new(self.ctx).dispatch(event).await?;
        }

        let followers = self.ctx.user_repo().followers(followee_id).await?;

        Ok(FollowResponse {
            following,
            follower_count: followers.len(),
        })
    }

    /// Users following `user_id`
    #[instrument(skip(self))]
    pub async fn followers(&self, user_id: Snowflake) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().followers(user_id).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Users that `user_id` follows
    #[instrument(skip(self))]
    pub async fn following(&self, user_id: Snowflake) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().following(user_id).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Case-insensitive name search
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> ServiceResult<Vec<UserResponse>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let users = self.ctx.user_repo().search(trimmed, SEARCH_LIMIT).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }
}
