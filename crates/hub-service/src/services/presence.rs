//! Presence service
//!
//! Tracks the online flag on the user record. The gateway flips it when a
//! socket connects or drops, and clients may set it over REST as well.

use hub_core::Snowflake;
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Presence service
pub struct PresenceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PresenceService<'a> {
    /// Create a new PresenceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mark a user online
    #[instrument(skip(self))]
    pub async fn set_online(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx.user_repo().set_online(user_id, true).await?;
        debug!(user_id = %user_id, "User online");
        Ok(())
    }

    /// Mark a user offline, stamping last-seen
    #[instrument(skip(self))]
    pub async fn set_offline(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx.user_repo().set_online(user_id, false).await?;
        debug!(user_id = %user_id, "User offline");
        Ok(())
    }
}
