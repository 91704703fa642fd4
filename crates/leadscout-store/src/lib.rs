//! Lead store — durable, most-recent-first collection of extracted leads.
//!
//! The whole collection lives under one file and is read and written
//! wholesale. Mutations are serialized through the store's lock, so two
//! concurrent saves cannot overwrite each other.

pub mod export;
pub mod store;

pub use store::LeadStore;
