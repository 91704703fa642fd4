//! Model session client for the on-device generation capability.
//!
//! Generation goes to a locally hosted OpenAI-compatible server (Ollama,
//! llama.cpp server, LM Studio). Each request opens one session, sends one
//! prompt, reads one completion and closes the session.

pub mod config;
pub mod error;
pub mod local;
pub mod session;

pub use config::ModelConfig;
pub use error::ModelError;
pub use local::LocalModelBackend;
pub use session::{
    GenerationBackend, GenerationSession, ModelSessionClient, SessionGuard, UnavailableBackend,
};

use std::sync::Arc;

/// Build the backend described by the configuration.
///
/// A disabled configuration yields `UnavailableBackend`, so every extraction
/// fails fast with remediation guidance instead of attempting a request.
pub fn create_backend(config: &ModelConfig) -> Result<Arc<dyn GenerationBackend>, ModelError> {
    if !config.enabled {
        tracing::info!("On-device generation disabled by configuration");
        return Ok(Arc::new(UnavailableBackend::disabled()));
    }
    let backend = LocalModelBackend::new(config)?;
    tracing::info!("Using local model '{}' at {}", config.model, config.base_url);
    Ok(Arc::new(backend))
}
