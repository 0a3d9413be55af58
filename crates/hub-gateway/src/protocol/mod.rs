//! Gateway wire protocol
//!
//! Defines the event names and envelope formats exchanged over the socket.

mod events;
mod messages;

pub use events::{ClientEventKind, ServerEventKind};
pub use messages::{ClientEvent, ProtocolError, ServerEvent};
