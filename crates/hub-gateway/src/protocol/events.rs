//! Gateway event names
//!
//! Client events are what a connected socket may emit; each maps to the
//! server event delivered to the recipient's connections.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Events a client may emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientEventKind {
    /// Started typing to a peer
    Typing,
    /// Stopped typing
    StopTyping,
    /// A direct message was sent over REST; nudge the recipient
    NewMessage,
    /// A notification was produced; nudge the recipient
    NewNotification,
}

impl ClientEventKind {
    /// The server event relayed to the recipient
    #[must_use]
    pub const fn relayed_as(self) -> ServerEventKind {
        match self {
            Self::Typing => ServerEventKind::UserTyping,
            Self::StopTyping => ServerEventKind::UserStopTyping,
            Self::NewMessage => ServerEventKind::MessageReceived,
            Self::NewNotification => ServerEventKind::NotificationReceived,
        }
    }

    /// Get the string representation of the event name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Typing => "typing",
            Self::StopTyping => "stopTyping",
            Self::NewMessage => "newMessage",
            Self::NewNotification => "newNotification",
        }
    }
}

impl fmt::Display for ClientEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events the server delivers to a recipient's connections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServerEventKind {
    UserTyping,
    UserStopTyping,
    MessageReceived,
    NotificationReceived,
}

impl ServerEventKind {
    /// Get the string representation of the event name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserTyping => "userTyping",
            Self::UserStopTyping => "userStopTyping",
            Self::MessageReceived => "messageReceived",
            Self::NotificationReceived => "notificationReceived",
        }
    }
}

impl fmt::Display for ServerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
