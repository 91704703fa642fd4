//! LeadScout background service.
//!
//! The browser extension's content script and popup talk to this service
//! over HTTP. Every message goes through [`router::RequestRouter`], which
//! validates the caller and dispatches to the extraction engine or the
//! lead store.

pub mod router;
pub mod routes;
pub mod state;

pub use router::{RequestRouter, Response, RouterError, SenderContext};
pub use state::AppState;
