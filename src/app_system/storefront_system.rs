use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::actor_framework::spawn;
use crate::admin_actor::ProductAdminService;
use crate::api_actor::ApiService;
use crate::cart_actor::CartService;
use crate::clients::{AdminClient, ApiClient, CartClient, RecordsClient, SessionClient};
use crate::config::ClientConfig;
use crate::error::ShellError;
use crate::records_actor::RecordsService;
use crate::session_actor::SessionGate;
use crate::storage::{FileStore, KeyValueStore};

/// Tunables shared by the services.
#[derive(Debug, Clone, Copy)]
pub struct SystemSettings {
    pub redirect_delay: Duration,
    pub mailbox_size: usize,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self { redirect_delay: Duration::from_millis(1500), mailbox_size: 32 }
    }
}

impl From<&ClientConfig> for SystemSettings {
    fn from(config: &ClientConfig) -> Self {
        Self { redirect_delay: config.redirect_delay(), mailbox_size: config.mailbox_size }
    }
}

/// Starts every service and hands out their clients.
///
/// The API gateway comes first since every other service holds a client to it.
pub struct StorefrontSystem {
    pub session: SessionClient,
    pub cart: CartClient,
    pub admin: AdminClient,
    pub records: RecordsClient,
    api: ApiClient,
    handles: Vec<JoinHandle<()>>,
}

impl StorefrontSystem {
    pub fn new(config: &ClientConfig) -> Result<Self, ShellError> {
        let settings = SystemSettings::from(config);

        let (api_sender, api_handle) = spawn(ApiService::new(config.api_url.as_str())?, settings.mailbox_size);
        let store = FileStore::new(config.session_file.clone());

        let mut system = Self::with_api(ApiClient::new(api_sender), Box::new(store), settings);
        system.handles.insert(0, api_handle);
        info!(api_url = %config.api_url, "Storefront system started");
        Ok(system)
    }

    /// Starts the feature services on top of an existing API client.
    pub fn with_api(api: ApiClient, store: Box<dyn KeyValueStore>, settings: SystemSettings) -> Self {
        let size = settings.mailbox_size;

        let (session_sender, session_handle) =
            spawn(SessionGate::new(api.clone(), store, settings.redirect_delay), size);
        let (cart_sender, cart_handle) = spawn(CartService::new(api.clone()), size);
        let (admin_sender, admin_handle) = spawn(ProductAdminService::new(api.clone()), size);
        let (records_sender, records_handle) = spawn(RecordsService::new(api.clone()), size);

        Self {
            session: SessionClient::new(session_sender),
            cart: CartClient::new(cart_sender),
            admin: AdminClient::new(admin_sender),
            records: RecordsClient::new(records_sender),
            api,
            handles: vec![session_handle, cart_handle, admin_handle, records_handle],
        }
    }

    pub async fn shutdown(self) -> Result<(), ShellError> {
        info!("Shutting down system...");

        // Feature services hold API clients, so the gateway stops last.
        drop(self.session);
        drop(self.cart);
        drop(self.admin);
        drop(self.records);
        drop(self.api);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Service task failed: {:?}", e);
                return Err(ShellError::Shutdown(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_framework::create_mock_api;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_shutdown_stops_every_service() {
        let (api, mut api_rx) = create_mock_api(10);
        let system = StorefrontSystem::with_api(api, Box::new(MemoryStore::default()), SystemSettings::default());

        system.shutdown().await.unwrap();

        // Every API client is gone once the services have stopped.
        assert!(api_rx.recv().await.is_none());
    }
}
