// ── Backend handle ──
//
// Bundles the console client with the admin store. Built once from a
// `BackendConfig` and passed by reference; there is no global instance.

use botdeck_api::ConsoleClient;
use tracing::debug;

use crate::config::BackendConfig;
use crate::error::CoreError;
use crate::store::AdminStore;

pub struct Backend {
    console: ConsoleClient,
    store: AdminStore,
}

impl Backend {
    pub fn new(config: &BackendConfig) -> Result<Self, CoreError> {
        let console = config.console_client()?;
        let store = AdminStore::new(config.admin_client()?);
        debug!(
            console = %console.base_url(),
            admin = %store.client().base_url(),
            "backend ready"
        );
        Ok(Self { console, store })
    }

    /// Typed console contract.
    pub fn console(&self) -> &ConsoleClient {
        &self.console
    }

    /// Cached admin contract.
    pub fn store(&self) -> &AdminStore {
        &self.store
    }
}
