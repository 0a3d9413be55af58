//! Connection management
//!
//! Tracks WebSocket connections and routes relayed events to users.

mod connection;
mod manager;

pub use connection::{Connection, ConnectionState};
pub use manager::ConnectionManager;
