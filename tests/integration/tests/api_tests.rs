//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with migrations applied
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

/// Register a fresh user and return the token together with the request used
async fn register_user(server: &TestServer) -> (String, RegisterRequest, AuthUser) {
    let request = RegisterRequest::unique();
    let response = server.post("/api/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (auth.token, request, auth.user)
}

/// Create a post for the given token and return its id
async fn create_post(server: &TestServer, token: &str) -> PostInfo {
    let request = CreatePostRequest::unique();
    let response = server.post_auth("/api/posts", token, &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.name, request.name);
    assert_eq!(auth.user.email, request.email);
    assert!(!auth.token.is_empty());
}

#[tokio::test]
async fn test_register_then_login_round_trip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    let response = server.post("/api/auth/register", &register_req).await.unwrap();
    let registered: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.id, registered.user.id);
    assert!(!auth.token.is_empty());

    // The login token resolves to the same identity
    let response = server.get_auth("/api/auth/me", &auth.token).await.unwrap();
    let me: AuthUser = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, registered.user.id);
    assert_eq!(me.email, register_req.email);
}

#[tokio::test]
async fn test_duplicate_email_and_bad_login_share_error_shape() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/api/auth/register", &request).await.unwrap();

    // Duplicate registration
    let response = server.post("/api/auth/register", &request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let duplicate: ErrorResponse = response.json().await.unwrap();

    // Wrong password against the same account
    let login_req = LoginRequest {
        email: request.email.clone(),
        password: "not-the-password".to_string(),
    };
    let response = server.post("/api/auth/login", &login_req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bad_login: ErrorResponse = response.json().await.unwrap();

    // Both failures surface the same 400 shape so email existence
    // cannot be probed through either endpoint
    assert!(!duplicate.error.code.is_empty());
    assert!(!bad_login.error.code.is_empty());
    assert!(!duplicate.error.message.is_empty());
    assert!(!bad_login.error.message.is_empty());
}

#[tokio::test]
async fn test_login_unknown_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: format!("nobody{}@example.com", unique_suffix()),
        password: "whatever123".to_string(),
    };

    let response = server.post("/api/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_current_user_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/auth/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_post_appears_in_feed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _, _) = register_user(&server).await;

    let post = create_post(&server, &token).await;
    assert_eq!(post.like_count, 0);
    assert_eq!(post.comment_count, 0);

    // Public feed is readable without a token
    let response = server.get("/api/posts?limit=50").await.unwrap();
    let feed: FeedInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(feed.posts.iter().any(|p| p.id == post.id));
}

#[tokio::test]
async fn test_get_post_by_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _, user) = register_user(&server).await;
    let post = create_post(&server, &token).await;

    let response = server.get(&format!("/api/posts/{}", post.id)).await.unwrap();
    let fetched: PostInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, post.id);
    assert_eq!(fetched.author.id, user.id);
}

#[tokio::test]
async fn test_delete_post_by_non_author_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author_token, _, _) = register_user(&server).await;
    let (other_token, _, _) = register_user(&server).await;
    let post = create_post(&server, &author_token).await;

    let response = server
        .delete_auth(&format!("/api/posts/{}", post.id), &other_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Author can still delete it
    let response = server
        .delete_auth(&format!("/api/posts/{}", post.id), &author_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&format!("/api/posts/{}", post.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_double_like_toggles() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author_token, _, _) = register_user(&server).await;
    let (liker_token, _, _) = register_user(&server).await;
    let post = create_post(&server, &author_token).await;

    let path = format!("/api/posts/{}/like", post.id);

    let response = server.put_auth_empty(&path, &liker_token).await.unwrap();
    let like: LikeInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(like.liked);
    assert_eq!(like.like_count, 1);

    // Second like from the same user removes the first
    let response = server.put_auth_empty(&path, &liker_token).await.unwrap();
    let like: LikeInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!like.liked);
    assert_eq!(like.like_count, 0);
}

#[tokio::test]
async fn test_like_notifies_author() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author_token, _, _) = register_user(&server).await;
    let (liker_token, _, liker) = register_user(&server).await;
    let post = create_post(&server, &author_token).await;

    let response = server
        .put_auth_empty(&format!("/api/posts/{}/like", post.id), &liker_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/notifications", &author_token).await.unwrap();
    let list: NotificationListInfo = assert_json(response, StatusCode::OK).await.unwrap();

    let likes: Vec<_> = list
        .notifications
        .iter()
        .filter(|n| n.kind == "like" && n.post_id.as_deref() == Some(post.id.as_str()))
        .collect();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0].sender.id, liker.id);
    assert!(!likes[0].is_read);
    assert!(list.unread_count >= 1);
}

#[tokio::test]
async fn test_comment_on_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author_token, _, _) = register_user(&server).await;
    let (commenter_token, _, _) = register_user(&server).await;
    let (bystander_token, _, _) = register_user(&server).await;
    let post = create_post(&server, &author_token).await;

    let request = CreateCommentRequest {
        content: "Nice post".to_string(),
    };
    let response = server
        .post_auth(&format!("/api/posts/{}/comment", post.id), &commenter_token, &request)
        .await
        .unwrap();
    let comment: CommentInfo = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.content, "Nice post");

    let response = server.get(&format!("/api/posts/{}", post.id)).await.unwrap();
    let fetched: PostInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.comment_count, 1);

    // Only the comment author or the post author may delete it
    let response = server
        .delete_auth(
            &format!("/api/posts/{}/comment/{}", post.id, comment.id),
            &bystander_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .delete_auth(
            &format!("/api/posts/{}/comment/{}", post.id, comment.id),
            &commenter_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_share_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author_token, _, _) = register_user(&server).await;
    let (sharer_token, _, _) = register_user(&server).await;
    let post = create_post(&server, &author_token).await;

    let response = server
        .post_auth(
            &format!("/api/posts/{}/share", post.id),
            &sharer_token,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    let shared: PostInfo = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(shared.original_post_id.as_deref(), Some(post.id.as_str()));

    let response = server.get(&format!("/api/posts/{}", post.id)).await.unwrap();
    let fetched: PostInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.share_count, 1);
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_search_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, request, user) = register_user(&server).await;

    let response = server
        .get_auth(&format!("/api/users/search?q={}", request.name.replace(' ', "%20")), &token)
        .await
        .unwrap();
    let users: Vec<UserInfo> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(users.iter().any(|u| u.id == user.id));
}

#[tokio::test]
async fn test_follow_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (follower_token, _, follower) = register_user(&server).await;
    let (_, _, followee) = register_user(&server).await;

    let path = format!("/api/users/{}/follow", followee.id);

    let response = server.put_auth_empty(&path, &follower_token).await.unwrap();
    let follow: FollowInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(follow.following);
    assert_eq!(follow.follower_count, 1);

    let response = server
        .get_auth(&format!("/api/users/{}/followers", followee.id), &follower_token)
        .await
        .unwrap();
    let followers: Vec<UserInfo> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(followers.iter().any(|u| u.id == follower.id));

    // Toggling again unfollows
    let response = server.put_auth_empty(&path, &follower_token).await.unwrap();
    let follow: FollowInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!follow.following);
    assert_eq!(follow.follower_count, 0);
}

#[tokio::test]
async fn test_self_follow_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _, user) = register_user(&server).await;

    let response = server
        .put_auth_empty(&format!("/api/users/{}/follow", user.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_user_profile_counts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _, user) = register_user(&server).await;
    create_post(&server, &token).await;

    let response = server
        .get_auth(&format!("/api/users/{}", user.id), &token)
        .await
        .unwrap();
    let profile: ProfileInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.user.id, user.id);
    assert_eq!(profile.post_count, 1);
    assert_eq!(profile.follower_count, 0);
    assert_eq!(profile.following_count, 0);
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_send_message() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (sender_token, _, sender) = register_user(&server).await;
    let (_, _, recipient) = register_user(&server).await;

    let request = SendMessageRequest::to(&recipient.id);
    let response = server.post_auth("/api/messages", &sender_token, &request).await.unwrap();
    let message: MessageInfo = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(message.sender_id, sender.id);
    assert_eq!(message.recipient_id, recipient.id);
    assert!(!message.is_read);
}

#[tokio::test]
async fn test_self_message_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (token, _, user) = register_user(&server).await;

    let request = SendMessageRequest::to(&user.id);
    let response = server.post_auth("/api/messages", &token, &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_conversation_fetch_marks_read() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (sender_token, _, sender) = register_user(&server).await;
    let (recipient_token, _, recipient) = register_user(&server).await;

    let request = SendMessageRequest::to(&recipient.id);
    server.post_auth("/api/messages", &sender_token, &request).await.unwrap();

    let response = server
        .get_auth("/api/messages/unread-count", &recipient_token)
        .await
        .unwrap();
    let unread: UnreadCountInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.unread_count, 1);

    // Fetching the conversation marks the peer's messages as read
    let response = server
        .get_auth(&format!("/api/messages/conversation/{}", sender.id), &recipient_token)
        .await
        .unwrap();
    let conversation: ConversationInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(conversation.total_messages, 1);

    let response = server
        .get_auth("/api/messages/unread-count", &recipient_token)
        .await
        .unwrap();
    let unread: UnreadCountInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.unread_count, 0);

    // Nothing left to mark on an explicit second pass
    let response = server
        .put_auth_empty(
            &format!("/api/messages/conversation/{}/read", sender.id),
            &recipient_token,
        )
        .await
        .unwrap();
    let marked: MarkedReadInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(marked.marked_count, 0);
}

#[tokio::test]
async fn test_conversation_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (sender_token, _, _) = register_user(&server).await;
    let (recipient_token, _, recipient) = register_user(&server).await;

    let request = SendMessageRequest::to(&recipient.id);
    let response = server.post_auth("/api/messages", &sender_token, &request).await.unwrap();
    let message: MessageInfo = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth("/api/messages/conversations", &recipient_token)
        .await
        .unwrap();
    let conversations: Vec<ConversationSummaryInfo> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0].last_message.id, message.id);
    assert_eq!(conversations[0].unread_count, 1);
    assert_eq!(conversations[0].peer.id, message.sender_id);
}

#[tokio::test]
async fn test_delete_message_by_non_sender_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (sender_token, _, _) = register_user(&server).await;
    let (recipient_token, _, recipient) = register_user(&server).await;

    let request = SendMessageRequest::to(&recipient.id);
    let response = server.post_auth("/api/messages", &sender_token, &request).await.unwrap();
    let message: MessageInfo = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/messages/{}", message.id), &recipient_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/messages/{}", message.id), &sender_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_notifications_require_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/notifications").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_mark_notifications_read() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author_token, _, _) = register_user(&server).await;
    let (liker_token, _, _) = register_user(&server).await;
    let post = create_post(&server, &author_token).await;

    server
        .put_auth_empty(&format!("/api/posts/{}/like", post.id), &liker_token)
        .await
        .unwrap();

    let response = server.get_auth("/api/notifications", &author_token).await.unwrap();
    let list: NotificationListInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.unread_count, 1);
    let notification_id = list.notifications[0].id.clone();

    let response = server
        .put_auth_empty(&format!("/api/notifications/{}/read", notification_id), &author_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth("/api/notifications/unread-count", &author_token)
        .await
        .unwrap();
    let unread: UnreadCountInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.unread_count, 0);
}

#[tokio::test]
async fn test_mark_all_notifications_read() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author_token, _, _) = register_user(&server).await;
    let (other_token, _, _) = register_user(&server).await;
    let first = create_post(&server, &author_token).await;
    let second = create_post(&server, &author_token).await;

    for post in [&first, &second] {
        server
            .put_auth_empty(&format!("/api/posts/{}/like", post.id), &other_token)
            .await
            .unwrap();
    }

    let response = server
        .put_auth_empty("/api/notifications/read-all", &author_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth("/api/notifications/unread-count", &author_token)
        .await
        .unwrap();
    let unread: UnreadCountInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.unread_count, 0);
}

// ============================================================================
// Token Identity Tests
// ============================================================================

#[tokio::test]
async fn test_token_for_vanished_user_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let config = integration_tests::test_config().unwrap();

    // A well-formed token whose identity has no user row behind it
    let jwt = hub_common::JwtService::new(&config.jwt.secret, config.jwt.token_expiry);
    let token = jwt.issue_token(hub_core::Snowflake::new(1)).unwrap();

    let response = server.get_auth("/api/auth/me", &token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Protected mutations are rejected at the auth layer, not as a
    // foreign-key failure from the insert
    let request = CreatePostRequest::unique();
    let response = server.post_auth("/api/posts", &token, &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_notification_mutation_by_non_recipient_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author_token, _, _) = register_user(&server).await;
    let (liker_token, _, _) = register_user(&server).await;
    let (intruder_token, _, _) = register_user(&server).await;
    let post = create_post(&server, &author_token).await;

    server
        .put_auth_empty(&format!("/api/posts/{}/like", post.id), &liker_token)
        .await
        .unwrap();

    let response = server.get_auth("/api/notifications", &author_token).await.unwrap();
    let list: NotificationListInfo = assert_json(response, StatusCode::OK).await.unwrap();
    let notification_id = list.notifications[0].id.clone();

    // Only the recipient may mark or delete a notification
    let response = server
        .put_auth_empty(&format!("/api/notifications/{}/read", notification_id), &intruder_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/notifications/{}", notification_id), &intruder_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Still unread and still present for the recipient
    let response = server
        .get_auth("/api/notifications/unread-count", &author_token)
        .await
        .unwrap();
    let unread: UnreadCountInfo = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.unread_count, 1);
}
