//! Request router — validates inbound messages and dispatches them.
//!
//! Messages are small tagged objects, `{"action": "...", ...fields}`. Every
//! message yields exactly one [`Response`]; failures are folded into
//! `{success: false, error, errorKind}` rather than surfacing as transport
//! errors.

use std::sync::Arc;

use leadscout_core::{LeadRecord, StoredLead};
use leadscout_extract::{normalize, ExtractionEngine, ExtractionError};
use leadscout_store::LeadStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Who sent a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenderContext {
    pub extension_id: String,
    /// Present only for messages from a content script running in a tab.
    pub tab_id: Option<i64>,
}

impl SenderContext {
    pub fn new(extension_id: impl Into<String>) -> Self {
        Self {
            extension_id: extension_id.into(),
            tab_id: None,
        }
    }

    pub fn with_tab(mut self, tab_id: i64) -> Self {
        self.tab_id = Some(tab_id);
        self
    }
}

/// A recognized request.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    ExtractLead {
        page_content: String,
        selected_text: Option<String>,
    },
    ListLeads,
    SaveLead {
        lead: LeadRecord,
        url: String,
    },
    ClearLeads,
    DeleteLead {
        index: usize,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractBody {
    #[serde(default)]
    page_content: Option<String>,
    #[serde(default)]
    selected_text: Option<String>,
}

#[derive(Deserialize)]
struct SaveBody {
    #[serde(default)]
    lead: Option<Value>,
    #[serde(default)]
    url: Option<String>,
}

impl Request {
    /// Parse a message body. Sender validation happens in the router.
    pub fn parse(message: &Value) -> Result<Self, RouterError> {
        let action = message
            .get("action")
            .and_then(Value::as_str)
            .ok_or(RouterError::UnknownAction(None))?;

        match action {
            "extractLead" => {
                let body = ExtractBody::deserialize(message)
                    .map_err(|e| RouterError::InvalidRequest(format!("Invalid extractLead: {e}")))?;
                Ok(Self::ExtractLead {
                    page_content: body.page_content.unwrap_or_default(),
                    selected_text: body.selected_text,
                })
            }
            "getStoredLeads" => Ok(Self::ListLeads),
            "saveLead" => {
                let body = SaveBody::deserialize(message)
                    .map_err(|e| RouterError::InvalidRequest(format!("Invalid saveLead: {e}")))?;
                let lead = match body.lead {
                    Some(value @ Value::Object(_)) => normalize(&value),
                    _ => {
                        return Err(RouterError::InvalidRequest(
                            "No lead data provided".to_string(),
                        ))
                    }
                };
                if !lead.is_meaningful() {
                    return Err(ExtractionError::NoMeaningfulData.into());
                }
                Ok(Self::SaveLead {
                    lead,
                    url: body.url.unwrap_or_default(),
                })
            }
            "clearLeads" => Ok(Self::ClearLeads),
            "deleteLead" => {
                let index = message
                    .get("index")
                    .and_then(Value::as_u64)
                    .and_then(|i| usize::try_from(i).ok())
                    .ok_or_else(|| {
                        RouterError::InvalidRequest("Invalid lead index".to_string())
                    })?;
                Ok(Self::DeleteLead { index })
            }
            other => Err(RouterError::UnknownAction(Some(other.to_string()))),
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            Self::ExtractLead { .. } => "extractLead",
            Self::ListLeads => "getStoredLeads",
            Self::SaveLead { .. } => "saveLead",
            Self::ClearLeads => "clearLeads",
            Self::DeleteLead { .. } => "deleteLead",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Unknown action")]
    UnknownAction(Option<String>),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Store(#[from] leadscout_core::Error),
}

impl RouterError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalidRequest",
            Self::UnknownAction(_) => "unknownAction",
            Self::Extraction(e) => e.kind(),
            Self::Store(e) => e.kind(),
        }
    }

    fn invalid_sender() -> Self {
        Self::InvalidRequest("Invalid message or sender".to_string())
    }
}

/// Wire response. Absent fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<LeadRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leads: Option<Vec<StoredLead>>,
    #[serde(rename = "totalLeads", skip_serializing_if = "Option::is_none")]
    pub total_leads: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "errorKind", skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn with_data(record: LeadRecord) -> Self {
        Self {
            data: Some(record),
            ..Self::ok()
        }
    }

    pub fn with_leads(leads: Vec<StoredLead>) -> Self {
        Self {
            leads: Some(leads),
            ..Self::ok()
        }
    }

    pub fn with_total(total: usize) -> Self {
        Self {
            total_leads: Some(total),
            ..Self::ok()
        }
    }

    pub fn failure(err: &RouterError) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            error_kind: Some(err.kind().to_string()),
            ..Default::default()
        }
    }
}

/// Dispatches validated requests to the extraction engine or the store.
#[derive(Clone)]
pub struct RequestRouter {
    engine: ExtractionEngine,
    store: Arc<LeadStore>,
}

impl RequestRouter {
    pub fn new(engine: ExtractionEngine, store: Arc<LeadStore>) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &ExtractionEngine {
        &self.engine
    }

    pub fn store(&self) -> &Arc<LeadStore> {
        &self.store
    }

    /// Handle one message. Always answers.
    pub async fn dispatch(&self, message: Option<Value>, sender: Option<SenderContext>) -> Response {
        match self.handle(message, sender).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request failed ({}): {}", e.kind(), e);
                Response::failure(&e)
            }
        }
    }

    async fn handle(
        &self,
        message: Option<Value>,
        sender: Option<SenderContext>,
    ) -> Result<Response, RouterError> {
        let (Some(message), Some(sender)) = (message, sender) else {
            return Err(RouterError::invalid_sender());
        };
        let request = Request::parse(&message)?;
        debug!(
            action = request.action(),
            extension = %sender.extension_id,
            tab = ?sender.tab_id,
            "Dispatching request"
        );

        match request {
            Request::ExtractLead {
                page_content,
                selected_text,
            } => {
                if sender.tab_id.is_none() {
                    return Err(RouterError::invalid_sender());
                }
                let record = self
                    .engine
                    .extract(&page_content, selected_text.as_deref())
                    .await?;
                Ok(Response::with_data(record))
            }
            Request::ListLeads => Ok(Response::with_leads(self.store.list())),
            Request::SaveLead { lead, url } => {
                let total = self.store.append(lead, &url)?;
                Ok(Response::with_total(total))
            }
            Request::ClearLeads => {
                self.store.clear()?;
                Ok(Response::ok())
            }
            Request::DeleteLead { index } => {
                let remaining = self.store.delete_at(index)?;
                Ok(Response::with_total(remaining))
            }
        }
    }
}
