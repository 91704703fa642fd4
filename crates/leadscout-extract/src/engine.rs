//! Extraction: prompt, complete, recover.

use leadscout_core::LeadRecord;
use leadscout_model::ModelSessionClient;
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::parse::recover_record;
use crate::prompts::{build_user_prompt, EXTRACTION_SYSTEM_PROMPT};

/// Turns page text into a validated `LeadRecord`.
#[derive(Clone)]
pub struct ExtractionEngine {
    client: ModelSessionClient,
}

impl ExtractionEngine {
    pub fn new(client: ModelSessionClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ModelSessionClient {
        &self.client
    }

    /// Extract one lead from a page.
    ///
    /// Fails fast with `CapabilityUnavailable` when no model is reachable.
    /// No retries: a failed generation is final for this request. The
    /// returned record carries no source URL or capture time.
    pub async fn extract(
        &self,
        page_content: &str,
        selected_text: Option<&str>,
    ) -> Result<LeadRecord, ExtractionError> {
        let prompt = build_user_prompt(page_content, selected_text);
        debug!(
            page_bytes = page_content.len(),
            has_selection = selected_text.is_some(),
            "--> Sending extraction prompt"
        );

        let raw = self
            .client
            .prompt_once(EXTRACTION_SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| {
                warn!("Generation failed: {}", e);
                ExtractionError::from(e)
            })?;

        debug!("<-- Model reply: {}", raw);

        match recover_record(&raw) {
            Ok(record) => {
                info!(
                    "Extracted lead: {}",
                    record.job_title.as_deref().unwrap_or("(untitled)")
                );
                Ok(record)
            }
            Err(e) => {
                warn!("Extraction rejected ({}): {}", e.kind(), e);
                Err(e)
            }
        }
    }
}
