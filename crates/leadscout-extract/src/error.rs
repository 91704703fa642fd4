//! Extraction failure kinds.

use leadscout_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Generation capability absent; the message says how to enable it.
    #[error("{0}")]
    CapabilityUnavailable(String),

    #[error("Failed to extract structured data - no JSON found in response")]
    NoStructuredData { raw: String },

    #[error("Failed to parse AI response as JSON: {source}")]
    MalformedResponse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No meaningful job or contact information found on this page")]
    NoMeaningfulData,

    #[error("The language model did not answer within {0} seconds")]
    Timeout(u64),

    #[error("Language model request failed: {0}")]
    Generation(String),
}

impl ExtractionError {
    /// Stable identifier used in `errorKind` on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CapabilityUnavailable(_) => "capabilityUnavailable",
            Self::NoStructuredData { .. } => "noStructuredData",
            Self::MalformedResponse { .. } => "malformedResponse",
            Self::NoMeaningfulData => "noMeaningfulData",
            Self::Timeout(_) => "timeout",
            Self::Generation(_) => "generation",
        }
    }
}

impl From<ModelError> for ExtractionError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Unavailable(reason) => Self::CapabilityUnavailable(reason),
            ModelError::Timeout(secs) => Self::Timeout(secs),
            other => Self::Generation(other.to_string()),
        }
    }
}
