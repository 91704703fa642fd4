//! LeadScout Core — lead record types, configuration, shared errors.

pub mod config;
pub mod error;
pub mod lead;

pub use config::{DataPaths, LeadScoutConfig};
pub use error::{Error, Result};
pub use lead::{LeadRecord, StoredLead};
