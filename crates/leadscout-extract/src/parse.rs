//! Recovering the JSON payload from a free-form model reply.

use leadscout_core::LeadRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::ExtractionError;
use crate::normalize::normalize;

/// First `{` through last `}`, across newlines.
static BRACE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// Greedy brace-delimited span of `raw`, if any.
pub fn find_brace_span(raw: &str) -> Option<&str> {
    BRACE_SPAN.find(raw).map(|m| m.as_str())
}

/// Parse the brace span of `raw` as JSON.
pub fn parse_payload(raw: &str) -> Result<Value, ExtractionError> {
    let span = find_brace_span(raw).ok_or_else(|| ExtractionError::NoStructuredData {
        raw: raw.to_string(),
    })?;
    serde_json::from_str(span).map_err(|source| ExtractionError::MalformedResponse {
        raw: raw.to_string(),
        source,
    })
}

/// Full recovery: span, parse, normalize, meaningfulness check.
pub fn recover_record(raw: &str) -> Result<LeadRecord, ExtractionError> {
    let payload = parse_payload(raw)?;
    let record = normalize(&payload);
    if !record.is_meaningful() {
        return Err(ExtractionError::NoMeaningfulData);
    }
    Ok(record)
}
