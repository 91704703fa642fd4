//! Errors raised by the model session client.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    /// The generation capability is absent; the message carries remediation steps.
    #[error("{0}")]
    Unavailable(String),

    #[error("Model did not respond within {0} seconds")]
    Timeout(u64),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("Request to model server failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Model server returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected model server response: {0}")]
    InvalidResponse(String),

    #[error("Session already closed")]
    SessionClosed,
}
