//! # hub-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    AuthResponse, CommentResponse, ConversationResponse, ConversationSummaryResponse,
    CreateCommentRequest, CreatePostRequest, CurrentUserResponse, FeedResponse, FollowResponse,
    HealthResponse, LikeResponse, LoginRequest, MarkedReadResponse, MessageResponse,
    NotificationListResponse, NotificationResponse, PostResponse, ProfilePageResponse,
    ProfileResponse, ReadinessResponse, RegisterRequest, SendMessageRequest, SharePostRequest,
    UnreadCountResponse, UpdateProfileRequest, UpdateStatusRequest, UserResponse,
};
pub use services::{
    AuthService, MessageService, NotificationService, PostService, PresenceService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
