//! # hub-gateway
//!
//! WebSocket gateway relaying presence and typing events between users.

pub mod connection;
pub mod protocol;
pub mod server;

pub use server::{create_app, create_gateway_state, run, run_server, GatewayState};
