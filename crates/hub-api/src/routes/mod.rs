//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{auth, health, messages, notifications, posts, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(post_routes())
        .merge(notification_routes())
        .merge(message_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::current_user))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/search", get(users::search_users))
        .route("/users/profile", put(users::update_profile))
        .route("/users/status", put(users::update_status))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/profile", get(users::get_user_profile))
        .route("/users/:user_id/follow", put(users::toggle_follow))
        .route("/users/:user_id/followers", get(users::get_followers))
        .route("/users/:user_id/following", get(users::get_following))
}

/// Post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::get_feed))
        .route("/posts", post(posts::create_post))
        .route("/posts/user/:user_id", get(posts::get_user_posts))
        .route("/posts/:post_id", get(posts::get_post))
        .route("/posts/:post_id", delete(posts::delete_post))
        .route("/posts/:post_id/like", put(posts::toggle_like))
        .route("/posts/:post_id/comment", post(posts::add_comment))
        .route(
            "/posts/:post_id/comment/:comment_id",
            delete(posts::delete_comment),
        )
        .route("/posts/:post_id/share", post(posts::share_post))
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route("/notifications/read-all", put(notifications::mark_all_read))
        .route(
            "/notifications/:notification_id/read",
            put(notifications::mark_read),
        )
        .route(
            "/notifications/:notification_id",
            delete(notifications::delete_notification),
        )
}

/// Direct message routes
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(messages::send_message))
        .route("/messages/conversations", get(messages::get_conversations))
        .route(
            "/messages/conversation/:user_id",
            get(messages::get_conversation),
        )
        .route(
            "/messages/conversation/:user_id/read",
            put(messages::mark_conversation_read),
        )
        .route("/messages/unread-count", get(messages::unread_count))
        .route("/messages/:message_id", delete(messages::delete_message))
}
