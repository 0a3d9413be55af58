//! Test fixtures and data builders
//!
//! Request builders produce unique data per call so tests can run against
//! a shared database without colliding, and lightweight response mirrors
//! deserialize only the fields the tests assert on.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static UNIQUE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    UNIQUE_COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Auth Fixtures
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test User {}", suffix),
            email: format!("testuser{}@example.com", suffix),
            password: "testpassword123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(register: &RegisterRequest) -> Self {
        Self {
            email: register.email.clone(),
            password: register.password.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

// ============================================================================
// User Fixtures
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub is_online: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowInfo {
    pub following: bool,
    pub follower_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInfo {
    pub user: UserInfo,
    pub follower_count: usize,
    pub following_count: usize,
    pub post_count: i64,
}

// ============================================================================
// Post Fixtures
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    pub tags: Vec<String>,
    pub is_public: bool,
}

impl CreatePostRequest {
    pub fn unique() -> Self {
        Self {
            content: format!("Test post {}", unique_suffix()),
            tags: vec!["testing".to_string()],
            is_public: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInfo {
    pub id: String,
    pub author: UserInfo,
    pub content: Option<String>,
    pub like_count: usize,
    pub comment_count: usize,
    pub share_count: usize,
    pub original_post_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedInfo {
    pub posts: Vec<PostInfo>,
    pub current_page: i64,
    pub total_posts: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeInfo {
    pub liked: bool,
    pub like_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInfo {
    pub id: String,
    pub content: String,
}

// ============================================================================
// Message Fixtures
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub recipient_id: String,
    pub content: String,
}

impl SendMessageRequest {
    pub fn to(recipient_id: &str) -> Self {
        Self {
            recipient_id: recipient_id.to_string(),
            content: format!("Test message {}", unique_suffix()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageInfo {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    pub is_read: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationInfo {
    pub messages: Vec<MessageInfo>,
    pub total_messages: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummaryInfo {
    pub peer: UserInfo,
    pub last_message: MessageInfo,
    pub unread_count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountInfo {
    pub unread_count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkedReadInfo {
    pub marked_count: u64,
}

// ============================================================================
// Notification Fixtures
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInfo {
    pub id: String,
    pub sender: UserInfo,
    pub kind: String,
    pub post_id: Option<String>,
    pub is_read: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListInfo {
    pub notifications: Vec<NotificationInfo>,
    pub unread_count: i64,
}

// ============================================================================
// Error Fixtures
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
