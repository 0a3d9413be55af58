//! Post handlers
//!
//! Endpoints for the feed, post CRUD, likes, comments, and shares.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use hub_core::{PostFilter, PostSort, Snowflake};
use hub_service::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, FeedResponse, LikeResponse,
    PostResponse, PostService, SharePostRequest,
};

use crate::extractors::{
    AuthUser, CommentIdPath, OptionalAuthUser, OptionalValidatedJson, Pagination, PostIdPath,
    UserIdPath, ValidatedJson,
};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Feed query parameters beyond pagination
#[derive(Debug, serde::Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub search: Option<String>,
    /// Comma-separated tag list
    #[serde(default)]
    pub tags: Option<String>,
    /// Restrict to one author (Snowflake as string)
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl FeedQuery {
    fn into_filter(self) -> Result<PostFilter, ApiError> {
        let author_id = self
            .author
            .map(|s| {
                s.parse::<Snowflake>()
                    .map_err(|_| ApiError::invalid_query("Invalid 'author' format"))
            })
            .transpose()?;

        let tags = self
            .tags
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(PostFilter {
            search: self.search.filter(|s| !s.trim().is_empty()),
            tags,
            author_id,
            sort: self.sort.as_deref().map(PostSort::parse).unwrap_or_default(),
        })
    }
}

/// Get the public feed
///
/// GET /posts
pub async fn get_feed(
    State(state): State<AppState>,
    _auth: OptionalAuthUser,
    pagination: Pagination,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let filter = query.into_filter()?;

    let service = PostService::new(state.service_context());
    let response = service
        .get_feed(filter, pagination.page(), pagination.limit())
        .await?;
    Ok(Json(response))
}

/// Create a new post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.create_post(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get a single post
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    _auth: OptionalAuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<PostResponse>> {
    let post_id = path.post_id()?;

    let service = PostService::new(state.service_context());
    let response = service.get_post(post_id).await?;
    Ok(Json(response))
}

/// Delete a post (author only)
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<NoContent> {
    let post_id = path.post_id()?;

    let service = PostService::new(state.service_context());
    service.delete_post(post_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Like or unlike a post
///
/// PUT /posts/{post_id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<LikeResponse>> {
    let post_id = path.post_id()?;

    let service = PostService::new(state.service_context());
    let response = service.toggle_like(post_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Comment on a post
///
/// POST /posts/{post_id}/comment
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let post_id = path.post_id()?;

    let service = PostService::new(state.service_context());
    let response = service.add_comment(post_id, auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Remove a comment (comment author or post author)
///
/// DELETE /posts/{post_id}/comment/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
) -> ApiResult<NoContent> {
    let comment_id = path.comment_id()?;

    let service = PostService::new(state.service_context());
    service.delete_comment(comment_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Share a post, optionally with commentary
///
/// POST /posts/{post_id}/share
pub async fn share_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    OptionalValidatedJson(request): OptionalValidatedJson<SharePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let post_id = path.post_id()?;

    let service = PostService::new(state.service_context());
    let response = service
        .share_post(post_id, auth.user_id, request.unwrap_or_default())
        .await?;
    Ok(Created(Json(response)))
}

/// Get a user's public posts
///
/// GET /posts/user/{user_id}
pub async fn get_user_posts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let user_id = path.user_id()?;

    let service = PostService::new(state.service_context());
    let response = service.get_user_posts(user_id).await?;
    Ok(Json(response))
}
