//! In-process topic broker
//!
//! Implements the structured transport's `TopicPublisher` contract: sessions
//! subscribe to named topics, and a publish fans the payload out to every
//! subscriber's outbound channel. Per-subscriber failures are discarded;
//! the broker never reports a delivery error back to the publisher.

use crate::protocol::ServerMessage;
use async_trait::async_trait;
use dashmap::DashMap;
use readshare_core::{DomainResult, TopicPublisher};
use std::collections::HashSet;
use tokio::sync::mpsc;

/// Topic subscriptions and session outbound channels
#[derive(Debug, Default)]
pub struct TopicBroker {
    /// Topic name to subscriber session ids
    subscriptions: DashMap<String, HashSet<String>>,

    /// Session id to outbound message channel
    senders: DashMap<String, mpsc::Sender<ServerMessage>>,
}

impl TopicBroker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriptions: DashMap::new(),
            senders: DashMap::new(),
        }
    }

    /// Register a session's outbound channel
    pub fn register_session(&self, session_id: &str, sender: mpsc::Sender<ServerMessage>) {
        self.senders.insert(session_id.to_string(), sender);
        tracing::debug!(session_id = %session_id, "Session registered with broker");
    }

    /// Drop a session and all of its subscriptions
    pub fn unregister_session(&self, session_id: &str) {
        self.senders.remove(session_id);

        self.subscriptions.iter_mut().for_each(|mut entry| {
            entry.value_mut().remove(session_id);
        });
        self.subscriptions.retain(|_, subscribers| !subscribers.is_empty());

        tracing::debug!(session_id = %session_id, "Session unregistered from broker");
    }

    /// Subscribe a session to a topic (idempotent)
    pub fn subscribe(&self, session_id: &str, topic: &str) {
        self.subscriptions
            .entry(topic.to_string())
            .or_default()
            .insert(session_id.to_string());

        tracing::trace!(session_id = %session_id, topic = %topic, "Subscribed");
    }

    /// Unsubscribe a session from a topic
    pub fn unsubscribe(&self, session_id: &str, topic: &str) {
        self.subscriptions.alter(topic, |_, mut subscribers| {
            subscribers.remove(session_id);
            subscribers
        });
        self.subscriptions.retain(|_, subscribers| !subscribers.is_empty());

        tracing::trace!(session_id = %session_id, topic = %topic, "Unsubscribed");
    }

    /// Number of subscribers on a topic
    #[must_use]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.subscriptions
            .get(topic)
            .map_or(0, |subscribers| subscribers.len())
    }

    /// Number of registered sessions
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.senders.len()
    }
}

#[async_trait]
impl TopicPublisher for TopicBroker {
    async fn publish(&self, topic: &str, payload: &str) -> DomainResult<()> {
        let subscribers: Vec<String> = self
            .subscriptions
            .get(topic)
            .map(|subscribers| subscribers.iter().cloned().collect())
            .unwrap_or_default();

        let mut sent = 0;
        for session_id in &subscribers {
            if let Some(sender) = self.senders.get(session_id) {
                let message = ServerMessage::Topic {
                    topic: topic.to_string(),
                    payload: payload.to_string(),
                };
                if sender.try_send(message).is_ok() {
                    sent += 1;
                } else {
                    tracing::debug!(
                        session_id = %session_id,
                        topic = %topic,
                        "Subscriber channel unavailable, skipping"
                    );
                }
            }
        }

        tracing::trace!(topic = %topic, sent = sent, "Topic published");
        Ok(())
    }
}
