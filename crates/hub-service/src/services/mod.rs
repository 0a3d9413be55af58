//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod context;
pub mod error;
pub mod message;
pub mod notification;
pub mod post;
pub mod presence;
pub mod user;

// Re-export all services for convenience
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use notification::NotificationService;
pub use post::PostService;
pub use presence::PresenceService;
pub use user::UserService;

/// Ceiling division for page counts; an empty result set still has one page.
pub(crate) fn total_pages(total: i64, limit: i64) -> i64 {
    ((total + limit - 1) / limit).max(1)
}

#[cfg(test)]
mod tests {
    use super::total_pages;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(99, 10), 10);
        assert_eq!(total_pages(100, 10), 10);
        assert_eq!(total_pages(101, 10), 11);
    }
}
