use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::ReplyConfig;
use crate::modules::journal::MoodTag;
use super::fallback::{FallbackTable, RandomSource, UuidRandom};

#[derive(Error, Debug)]
pub enum ReplyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No API key configured")]
    MissingApiKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Trimmed content of the first choice, if there is any text.
    pub fn first_content(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(str::to_string)
    }
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ReplyError>;
}

pub struct OpenAiChatBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiChatBackend {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &ReplyConfig) -> Result<Self, ReplyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl ChatBackend for OpenAiChatBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ReplyError> {
        if self.api_key.trim().is_empty() {
            return Err(ReplyError::MissingApiKey);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReplyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ReplyError::InvalidResponse(format!("Failed to parse chat response: {}", e)))
    }
}

/// Anything that can answer a mood entry. An empty answer aborts the submission.
#[async_trait]
pub trait ReplySource: Send {
    async fn get_reply(&mut self, message: &str, tag: &MoodTag) -> String;
}

/// Remote reply with a canned fallback; always yields non-empty text.
pub struct ReplyClient {
    backend: Box<dyn ChatBackend>,
    fallback: FallbackTable,
    random: Box<dyn RandomSource>,
    config: ReplyConfig,
}

impl ReplyClient {
    pub fn new(backend: Box<dyn ChatBackend>, config: ReplyConfig) -> Self {
        Self {
            backend,
            fallback: FallbackTable::new(),
            random: Box::new(UuidRandom),
            config,
        }
    }

    pub fn with_random(mut self, random: Box<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn from_config(config: &ReplyConfig) -> Result<Self, ReplyError> {
        let backend = OpenAiChatBackend::from_config(config)?;
        Ok(Self::new(Box::new(backend), config.clone()))
    }

    pub fn build_request(&self, message: &str, tag: &MoodTag) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(self.config.instruction_for(tag.label())),
                ChatMessage::user(message),
            ],
            temperature: self.config.temperature,
        }
    }

    pub fn fallback_reply(&mut self, tag: &MoodTag) -> String {
        self.fallback.pick(tag, self.random.as_mut()).to_string()
    }
}

#[async_trait]
impl ReplySource for ReplyClient {
    async fn get_reply(&mut self, message: &str, tag: &MoodTag) -> String {
        let request = self.build_request(message, tag);

        match self.backend.complete(&request).await {
            Ok(response) => match response.first_content() {
                Some(content) => {
                    tracing::debug!(tag = %tag, "remote reply received");
                    content
                }
                None => {
                    tracing::warn!(tag = %tag, "remote reply was empty, using fallback");
                    self.fallback_reply(tag)
                }
            },
            Err(e) => {
                tracing::warn!(tag = %tag, error = %e, "remote reply failed, using fallback");
                self.fallback_reply(tag)
            }
        }
    }
}
