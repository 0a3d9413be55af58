//! User handlers
//!
//! Endpoints for profiles, follow relationships, search, and presence.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use hub_service::{
    FollowResponse, PostService, PresenceService, ProfilePageResponse, ProfileResponse,
    UpdateProfileRequest, UpdateStatusRequest, UserResponse, UserService,
};

use crate::extractors::{AuthUser, UserIdPath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Search query parameters
#[derive(Debug, serde::Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search users by name
///
/// GET /users/search?q=...
pub async fn search_users(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.search(&query.q).await?;
    Ok(Json(response))
}

/// Get a user's profile summary
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<ProfileResponse>> {
    let user_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    let response = service.get_profile(user_id).await?;
    Ok(Json(response))
}

/// Get a user's profile page with their public posts
///
/// GET /users/{user_id}/profile
pub async fn get_user_profile(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<ProfilePageResponse>> {
    let user_id = path.user_id()?;

    let profile = UserService::new(state.service_context())
        .get_profile(user_id)
        .await?;
    let posts = PostService::new(state.service_context())
        .get_user_posts(user_id)
        .await?;

    Ok(Json(ProfilePageResponse { profile, posts }))
}

/// Update the authenticated user's profile
///
/// PUT /users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Follow or unfollow a user
///
/// PUT /users/{user_id}/follow
pub async fn toggle_follow(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<FollowResponse>> {
    let followee_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    let response = service.toggle_follow(auth.user_id, followee_id).await?;
    Ok(Json(response))
}

/// List a user's followers
///
/// GET /users/{user_id}/followers
pub async fn get_followers(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let user_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    let response = service.followers(user_id).await?;
    Ok(Json(response))
}

/// List users a user follows
///
/// GET /users/{user_id}/following
pub async fn get_following(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let user_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    let response = service.following(user_id).await?;
    Ok(Json(response))
}

/// Update the authenticated user's presence status
///
/// PUT /users/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<NoContent> {
    let service = PresenceService::new(state.service_context());
    if request.online {
        service.set_online(auth.user_id).await?;
    } else {
        service.set_offline(auth.user_id).await?;
    }
    Ok(NoContent)
}
