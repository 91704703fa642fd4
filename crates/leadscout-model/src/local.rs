//! Local OpenAI-compatible generation backend (Ollama, llama.cpp server, LM Studio).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::session::{GenerationBackend, GenerationSession};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: usize,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    id: String,
}

/// Backend for a locally hosted model behind an OpenAI-compatible API.
#[derive(Clone, Debug)]
pub struct LocalModelBackend {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f64,
    max_tokens: usize,
}

impl LocalModelBackend {
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ModelError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.get(format!("{}{}", self.base_url, path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.client.post(format!("{}{}", self.base_url, path)))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, ModelError> {
        let response = self.get("/models").send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api { status, body });
        }
        let list: ModelList = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;
        Ok(list.data.into_iter().map(|m| m.id).collect())
    }

    async fn chat(&self, system: &str, prompt: &str) -> Result<String, ModelError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: false,
        };

        debug!("Prompting {} ({} prompt bytes)", self.describe(), prompt.len());

        let response = self.post("/chat/completions").json(&body).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api { status, body });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ModelError::InvalidResponse("completion carried no message".into()))
    }
}

/// Ollama reports untagged models with an implicit `:latest` tag.
fn model_matches(listed: &str, wanted: &str) -> bool {
    listed == wanted
        || listed.strip_suffix(":latest") == Some(wanted)
        || wanted.strip_suffix(":latest") == Some(listed)
}

#[async_trait]
impl GenerationBackend for LocalModelBackend {
    fn describe(&self) -> String {
        format!("{} @ {}", self.model, self.base_url)
    }

    async fn is_available(&self) -> bool {
        match self.list_models().await {
            Ok(models) => {
                let found = models.iter().any(|m| model_matches(m, &self.model));
                if !found {
                    warn!(
                        "Model '{}' not served by {} (available: {})",
                        self.model,
                        self.base_url,
                        models.join(", ")
                    );
                }
                found
            }
            Err(e) => {
                warn!("Model server at {} unreachable: {}", self.base_url, e);
                false
            }
        }
    }

    fn unavailable_reason(&self) -> String {
        format!(
            "On-device language model '{model}' is not available at {url}. \
             Start a local model server (for example `ollama serve`), download the model \
             with `ollama pull {model}`, or point LEADSCOUT_MODEL_URL and LEADSCOUT_MODEL \
             at a running OpenAI-compatible server.",
            model = self.model,
            url = self.base_url,
        )
    }

    async fn open(&self, instructions: &str) -> Result<Box<dyn GenerationSession>, ModelError> {
        Ok(Box::new(LocalSession {
            backend: self.clone(),
            instructions: Some(instructions.to_string()),
        }))
    }
}

/// A session holds the system instruction; the server keeps no state between calls.
struct LocalSession {
    backend: LocalModelBackend,
    instructions: Option<String>,
}

#[async_trait]
impl GenerationSession for LocalSession {
    async fn complete(&mut self, prompt: &str) -> Result<String, ModelError> {
        let instructions = self.instructions.as_deref().ok_or(ModelError::SessionClosed)?;
        self.backend.chat(instructions, prompt).await
    }

    fn close(&mut self) {
        self.instructions = None;
    }
}
