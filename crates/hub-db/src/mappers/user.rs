//! User entity <-> model mapper

use hub_core::{Snowflake, User};

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            name: model.name,
            email: model.email,
            bio: model.bio,
            avatar: model.avatar,
            is_online: model.is_online,
            last_seen: model.last_seen,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert User entity reference to values for database insertion
pub struct UserInsert<'a> {
    pub id: i64,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub bio: Option<&'a str>,
    pub avatar: Option<&'a str>,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User, password_hash: &'a str) -> Self {
        Self {
            id: user.id.into_inner(),
            name: &user.name,
            email: &user.email,
            password_hash,
            bio: user.bio.as_deref(),
            avatar: user.avatar.as_deref(),
        }
    }
}

/// Convert User entity reference to values for database update
pub struct UserUpdate<'a> {
    pub id: i64,
    pub name: &'a str,
    pub bio: Option<&'a str>,
    pub avatar: Option<&'a str>,
}

impl<'a> UserUpdate<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            id: user.id.into_inner(),
            name: &user.name,
            bio: user.bio.as_deref(),
            avatar: user.avatar.as_deref(),
        }
    }
}
