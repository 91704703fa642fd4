//! Shared application state.

use std::sync::Arc;

use leadscout_core::LeadScoutConfig;
use leadscout_extract::ExtractionEngine;
use leadscout_model::{ModelConfig, ModelSessionClient};
use leadscout_store::LeadStore;

use crate::router::RequestRouter;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: LeadScoutConfig,
    pub model_config: ModelConfig,
    pub store: Arc<LeadStore>,
    pub router: RequestRouter,
}

impl AppState {
    pub fn new(
        config: LeadScoutConfig,
        model_config: ModelConfig,
        store: LeadStore,
        client: ModelSessionClient,
    ) -> Self {
        let store = Arc::new(store);
        let router = RequestRouter::new(ExtractionEngine::new(client), store.clone());
        Self {
            config,
            model_config,
            store,
            router,
        }
    }

    pub fn client(&self) -> &ModelSessionClient {
        self.router.engine().client()
    }
}
