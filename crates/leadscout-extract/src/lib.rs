//! Extraction engine — turns page text into a validated lead record.
//!
//! The model's reply is untrusted text. Recovery is deterministic: take the
//! brace-delimited span, parse it, resolve each canonical field through a
//! fixed list of key paths, then require a title or description.

pub mod engine;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod prompts;

pub use engine::ExtractionEngine;
pub use error::ExtractionError;
pub use normalize::normalize;
pub use parse::{find_brace_span, recover_record};
