//! Session traits, scoped session guard and the single-shot client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::ModelError;

/// A text generation capability that can open configured sessions.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Human-readable description of the target (model and endpoint).
    fn describe(&self) -> String;

    /// Whether the capability is present and ready to serve the model.
    async fn is_available(&self) -> bool;

    /// Actionable message explaining what is missing and how to enable it.
    fn unavailable_reason(&self) -> String;

    /// Open a session configured with a fixed system instruction.
    async fn open(&self, instructions: &str) -> Result<Box<dyn GenerationSession>, ModelError>;
}

/// One configured conversation with the generation capability.
#[async_trait]
pub trait GenerationSession: Send {
    /// Send one prompt and wait for the full completion.
    async fn complete(&mut self, prompt: &str) -> Result<String, ModelError>;

    /// Release the session's resources.
    fn close(&mut self);
}

/// Owns an open session and closes it exactly once.
///
/// `close` runs either when the guard is closed explicitly or when it is
/// dropped, which covers early returns, cancelled futures and panics.
pub struct SessionGuard {
    session: Option<Box<dyn GenerationSession>>,
}

impl SessionGuard {
    pub fn new(session: Box<dyn GenerationSession>) -> Self {
        Self {
            session: Some(session),
        }
    }

    pub async fn complete(&mut self, prompt: &str) -> Result<String, ModelError> {
        match self.session.as_mut() {
            Some(session) => session.complete(prompt).await,
            None => Err(ModelError::SessionClosed),
        }
    }

    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
            debug!("Generation session closed");
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Single-shot request/response client over a generation backend.
#[derive(Clone)]
pub struct ModelSessionClient {
    backend: Arc<dyn GenerationBackend>,
    timeout: Duration,
}

impl ModelSessionClient {
    pub fn new(backend: Arc<dyn GenerationBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    pub async fn is_available(&self) -> bool {
        self.backend.is_available().await
    }

    pub fn unavailable_reason(&self) -> String {
        self.backend.unavailable_reason()
    }

    /// Open a scoped session. Fails with `Unavailable` and remediation
    /// guidance when the capability is absent.
    pub async fn open(&self, instructions: &str) -> Result<SessionGuard, ModelError> {
        if !self.backend.is_available().await {
            return Err(ModelError::Unavailable(self.backend.unavailable_reason()));
        }
        let session = self.backend.open(instructions).await?;
        debug!("Generation session opened on {}", self.backend.describe());
        Ok(SessionGuard::new(session))
    }

    /// Open a session, send one prompt, close the session.
    ///
    /// The timeout covers the availability check, the open and the
    /// completion. Sessions are never reused: every call gets a fresh one.
    pub async fn prompt_once(&self, instructions: &str, prompt: &str) -> Result<String, ModelError> {
        let exchange = async {
            let mut session = self.open(instructions).await?;
            let result = session.complete(prompt).await;
            session.close();
            result
        };
        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(ModelError::Timeout(self.timeout.as_secs())),
        }
    }
}

/// Backend used when on-device generation is switched off or missing.
#[derive(Debug, Clone)]
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(
            "On-device generation is disabled. Set \"enabled\": true in model-config.json \
             or export LEADSCOUT_MODEL_ENABLED=1, then restart LeadScout.",
        )
    }
}

#[async_trait]
impl GenerationBackend for UnavailableBackend {
    fn describe(&self) -> String {
        "unavailable".into()
    }

    async fn is_available(&self) -> bool {
        false
    }

    fn unavailable_reason(&self) -> String {
        self.reason.clone()
    }

    async fn open(&self, _instructions: &str) -> Result<Box<dyn GenerationSession>, ModelError> {
        Err(ModelError::Unavailable(self.reason.clone()))
    }
}
