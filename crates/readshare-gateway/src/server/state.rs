//! Gateway state
//!
//! Shared dependencies for the gateway server. Everything is explicitly
//! constructed and injected; tests build isolated instances per case.

use crate::broker::TopicBroker;
use readshare_common::AppConfig;
use readshare_realtime::{IdleSweeper, NotificationHub, PresenceLifecycleCoordinator, RoomChannelRegistry};
use readshare_store::InMemoryMemberDirectory;
use std::sync::Arc;

/// Gateway application state
#[derive(Clone)]
pub struct GatewayState {
    coordinator: Arc<PresenceLifecycleCoordinator>,
    hub: Arc<NotificationHub>,
    broker: Arc<TopicBroker>,
    channels: Arc<RoomChannelRegistry>,
    sweeper: Arc<IdleSweeper>,
    directory: Arc<InMemoryMemberDirectory>,
    config: Arc<AppConfig>,
}

impl GatewayState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        coordinator: Arc<PresenceLifecycleCoordinator>,
        hub: Arc<NotificationHub>,
        broker: Arc<TopicBroker>,
        channels: Arc<RoomChannelRegistry>,
        sweeper: Arc<IdleSweeper>,
        directory: Arc<InMemoryMemberDirectory>,
        config: AppConfig,
    ) -> Self {
        Self {
            coordinator,
            hub,
            broker,
            channels,
            sweeper,
            directory,
            config: Arc::new(config),
        }
    }

    /// Get the presence lifecycle coordinator
    pub fn coordinator(&self) -> &PresenceLifecycleCoordinator {
        &self.coordinator
    }

    /// Get the notification hub (used by write paths after a persist)
    pub fn hub(&self) -> &NotificationHub {
        &self.hub
    }

    /// Get the topic broker
    pub fn broker(&self) -> &TopicBroker {
        &self.broker
    }

    /// Get the raw room channel registry
    pub fn channels(&self) -> &RoomChannelRegistry {
        &self.channels
    }

    /// Get the idle sweeper
    pub fn sweeper(&self) -> &IdleSweeper {
        &self.sweeper
    }

    /// Get the member directory backing presence lookups
    pub fn directory(&self) -> &InMemoryMemberDirectory {
        &self.directory
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("coordinator", &self.coordinator)
            .field("config", &"AppConfig")
            .finish()
    }
}
