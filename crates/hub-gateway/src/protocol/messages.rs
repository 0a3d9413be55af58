//! Gateway message envelopes
//!
//! Client frames name the event and the recipient; relayed frames name the
//! event and the originating user. Payloads pass through untouched.

use hub_core::Snowflake;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{ClientEventKind, ServerEventKind};

/// Protocol-level errors for inbound frames
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Invalid frame: {0}")]
    InvalidFrame(#[from] serde_json::Error),

    #[error("Invalid recipient ID: {0}")]
    InvalidRecipient(String),
}

/// A frame received from a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientEvent {
    /// Event name
    pub event: ClientEventKind,

    /// Recipient user ID (Snowflake as string)
    pub to: String,

    /// Opaque payload relayed as-is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ClientEvent {
    /// Parse a frame from its JSON text
    pub fn from_json(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse the recipient ID
    pub fn recipient(&self) -> Result<Snowflake, ProtocolError> {
        self.to
            .parse()
            .map_err(|_| ProtocolError::InvalidRecipient(self.to.clone()))
    }

    /// Build the frame relayed to the recipient's connections
    #[must_use]
    pub fn relay(self, from: Snowflake) -> ServerEvent {
        ServerEvent {
            event: self.event.relayed_as(),
            from: from.to_string(),
            data: self.data,
        }
    }
}

/// A frame delivered to a recipient's connections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerEvent {
    /// Event name
    pub event: ServerEventKind,

    /// Originating user ID (Snowflake as string)
    pub from: String,

    /// Opaque payload from the client frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ServerEvent {
    /// Serialize to JSON text
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_client_frame() {
        let frame = r#"{"event":"typing","to":"42"}"#;
        let event = ClientEvent::from_json(frame).unwrap();

        assert_eq!(event.event, ClientEventKind::Typing);
        assert_eq!(event.recipient().unwrap(), Snowflake::from(42i64));
        assert!(event.data.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_event() {
        let frame = r#"{"event":"selfDestruct","to":"42"}"#;
        assert!(ClientEvent::from_json(frame).is_err());
    }

    #[test]
    fn test_invalid_recipient() {
        let frame = r#"{"event":"typing","to":"not-a-number"}"#;
        let event = ClientEvent::from_json(frame).unwrap();
        assert!(event.recipient().is_err());
    }

    #[test]
    fn test_relay_keeps_payload() {
        let event = ClientEvent {
            event: ClientEventKind::NewMessage,
            to: "42".to_string(),
            data: Some(json!({"messageId": "7"})),
        };

        let relayed = event.relay(Snowflake::from(9i64));
        assert_eq!(relayed.event, ServerEventKind::MessageReceived);
        assert_eq!(relayed.from, "9");
        assert_eq!(relayed.data, Some(json!({"messageId": "7"})));
    }
}
