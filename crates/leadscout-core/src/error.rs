//! Error types for LeadScout.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Index {index} is out of range ({len} stored leads)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),
}

impl Error {
    /// Stable identifier used in `errorKind` on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "indexOutOfRange",
            Self::Export(_) => "export",
            Self::Storage(_) | Self::Io(_) | Self::Json(_) => "storage",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
