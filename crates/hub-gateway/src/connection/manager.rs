//! Connection manager
//!
//! Manages all active WebSocket connections using DashMap for thread-safe access.

use super::Connection;
use crate::protocol::ServerEvent;
use dashmap::DashMap;
use hub_core::Snowflake;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Manages all active WebSocket connections
///
/// Uses `DashMap` for concurrent access to connection state. A user may hold
/// several connections at once (one per device); events fan out to all of
/// them.
#[derive(Debug, Default)]
pub struct ConnectionManager {
    /// Active connections by session ID
    connections: DashMap<String, Arc<Connection>>,

    /// User ID to session IDs mapping
    user_connections: DashMap<Snowflake, HashSet<String>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            user_connections: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    pub fn add_connection(
        &self,
        session_id: String,
        sender: mpsc::Sender<ServerEvent>,
    ) -> Arc<Connection> {
        let connection = Connection::new(session_id.clone(), sender);
        self.connections
            .insert(session_id.clone(), connection.clone());

        tracing::debug!(session_id = %session_id, "Connection added");

        connection
    }

    /// Remove a connection
    ///
    /// Uses `alter` for atomic modify-and-cleanup operations to avoid TOCTOU
    /// race conditions.
    pub async fn remove_connection(&self, session_id: &str) {
        if let Some((_, connection)) = self.connections.remove(session_id) {
            if let Some(user_id) = connection.user_id().await {
                self.user_connections.alter(&user_id, |_, mut sessions| {
                    sessions.remove(session_id);
                    sessions
                });

                self.user_connections
                    .retain(|_, sessions| !sessions.is_empty());
            }

            tracing::debug!(session_id = %session_id, "Connection removed");
        }
    }

    /// Get a connection by session ID
    pub fn get_connection(&self, session_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(session_id).map(|r| r.clone())
    }

    /// Link a connection to an authenticated user
    pub async fn authenticate_connection(&self, session_id: &str, user_id: Snowflake) -> bool {
        if let Some(connection) = self.connections.get(session_id) {
            connection.set_user_id(user_id).await;
            connection
                .set_state(super::ConnectionState::Connected)
                .await;

            self.user_connections
                .entry(user_id)
                .or_default()
                .insert(session_id.to_string());

            tracing::debug!(
                session_id = %session_id,
                user_id = %user_id,
                "Connection authenticated"
            );

            true
        } else {
            false
        }
    }

    /// Get all connections for a user
    pub fn get_user_connections(&self, user_id: Snowflake) -> Vec<Arc<Connection>> {
        self.user_connections
            .get(&user_id)
            .map(|sessions| {
                sessions
                    .iter()
                    .filter_map(|sid| self.connections.get(sid).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether a user has any live connection besides the given session
    pub fn has_other_connections(&self, user_id: Snowflake, session_id: &str) -> bool {
        self.user_connections
            .get(&user_id)
            .is_some_and(|sessions| sessions.iter().any(|sid| sid != session_id))
    }

    /// Send an event to all connections of a user, returning how many received it
    pub async fn send_to_user(&self, user_id: Snowflake, event: ServerEvent) -> usize {
        let connections = self.get_user_connections(user_id);
        let mut sent = 0;

        for conn in connections {
            if conn.send(event.clone()).await.is_ok() {
                sent += 1;
            }
        }

        tracing::trace!(
            user_id = %user_id,
            sent = sent,
            "Event sent to user connections"
        );

        sent
    }

    /// Number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of distinct authenticated users
    pub fn user_count(&self) -> usize {
        self.user_connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ClientEvent, ClientEventKind};

    #[tokio::test]
    async fn test_add_and_remove_connection() {
        let manager = ConnectionManager::new();
        let (tx, _rx) = mpsc::channel(10);

        manager.add_connection("s1".to_string(), tx);
        assert_eq!(manager.connection_count(), 1);
        assert!(manager.get_connection("s1").is_some());

        manager.remove_connection("s1").await;
        assert_eq!(manager.connection_count(), 0);
        assert!(manager.get_connection("s1").is_none());
    }

    #[tokio::test]
    async fn test_authenticate_and_fan_out() {
        let manager = ConnectionManager::new();
        let user = Snowflake::from(7i64);

        let (tx1, mut rx1) = mpsc::channel(10);
        let (tx2, mut rx2) = mpsc::channel(10);
        manager.add_connection("s1".to_string(), tx1);
        manager.add_connection("s2".to_string(), tx2);

        assert!(manager.authenticate_connection("s1", user).await);
        assert!(manager.authenticate_connection("s2", user).await);
        assert_eq!(manager.user_count(), 1);

        let event = ClientEvent {
            event: ClientEventKind::Typing,
            to: user.to_string(),
            data: None,
        }
        .relay(Snowflake::from(9i64));

        let sent = manager.send_to_user(user, event).await;
        assert_eq!(sent, 2);
        assert!(rx1.recv().await.is_some());
        assert!(rx2.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_remove_cleans_user_mapping() {
        let manager = ConnectionManager::new();
        let user = Snowflake::from(7i64);

        let (tx1, _rx1) = mpsc::channel(10);
        let (tx2, _rx2) = mpsc::channel(10);
        manager.add_connection("s1".to_string(), tx1);
        manager.add_connection("s2".to_string(), tx2);
        manager.authenticate_connection("s1", user).await;
        manager.authenticate_connection("s2", user).await;

        assert!(manager.has_other_connections(user, "s1"));

        manager.remove_connection("s2").await;
        assert!(!manager.has_other_connections(user, "s1"));

        manager.remove_connection("s1").await;
        assert_eq!(manager.user_count(), 0);
    }

    #[tokio::test]
    async fn test_send_to_unknown_user() {
        let manager = ConnectionManager::new();
        let event = ClientEvent {
            event: ClientEventKind::Typing,
            to: "1".to_string(),
            data: None,
        }
        .relay(Snowflake::from(2i64));

        let sent = manager.send_to_user(Snowflake::from(1i64), event).await;
        assert_eq!(sent, 0);
    }
}
