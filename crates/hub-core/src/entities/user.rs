//! User entity - represents an account on the network

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User account entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub is_online: bool,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, name: String, email: String, bio: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            bio,
            avatar: None,
            is_online: false,
            last_seen: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether this user may follow `other`
    ///
    /// Self-follow is never allowed.
    #[inline]
    pub fn can_follow(&self, other: Snowflake) -> bool {
        self.id != other
    }

    /// Mark the user online or offline, recording the last-seen time
    pub fn set_online(&mut self, online: bool) {
        self.is_online = online;
        self.last_seen = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Update the display name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Update the bio
    pub fn set_bio(&mut self, bio: Option<String>) {
        self.bio = bio;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_offline() {
        let user = User::new(
            Snowflake::new(1),
            "alice".to_string(),
            "alice@example.com".to_string(),
            None,
        );
        assert!(!user.is_online);
        assert!(user.last_seen.is_none());
    }

    #[test]
    fn test_cannot_follow_self() {
        let user = User::new(
            Snowflake::new(7),
            "alice".to_string(),
            "alice@example.com".to_string(),
            None,
        );
        assert!(!user.can_follow(Snowflake::new(7)));
        assert!(user.can_follow(Snowflake::new(8)));
    }

    #[test]
    fn test_set_online_records_last_seen() {
        let mut user = User::new(
            Snowflake::new(1),
            "alice".to_string(),
            "alice@example.com".to_string(),
            None,
        );
        user.set_online(true);
        assert!(user.is_online);
        assert!(user.last_seen.is_some());

        user.set_online(false);
        assert!(!user.is_online);
    }
}
