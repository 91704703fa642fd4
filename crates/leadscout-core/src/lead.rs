//! Lead record types shared by extraction, storage and the request protocol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical job/contact record recovered from a page.
///
/// Every field is optional; absent values serialize as `null` so the
/// canonical JSON form always carries the full field set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub job_description_summary: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub hours_per_week: Option<String>,
}

impl LeadRecord {
    /// A record is meaningful when it carries a job title or a job description.
    pub fn is_meaningful(&self) -> bool {
        has_text(&self.job_title) || has_text(&self.job_description)
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// A lead as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLead {
    pub id: String,
    #[serde(flatten)]
    pub record: LeadRecord,
    pub source_url: String,
    pub captured_at: DateTime<Utc>,
}

impl StoredLead {
    /// Stamp a record for persistence.
    pub fn capture(record: LeadRecord, source_url: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            record,
            source_url: source_url.into(),
            captured_at: Utc::now(),
        }
    }
}
