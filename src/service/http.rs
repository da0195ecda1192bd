//! HTTP implementation of [`RecommendationService`] over `reqwest`.
//!
//! One POST per user message, no retries. A configurable client-wide timeout
//! turns a hung service into an ordinary transport error so the caller's
//! cleanup still runs.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::client::{DEFAULT_ERROR_MESSAGE, RecommendationService, ServiceError};
use super::types::{ChatReply, ChatRequest, ChatResponse, ErrorBody, HealthStatus};

pub struct HttpRecommendationService {
    base_url: String,
    chat_path: String,
    client: reqwest::Client,
}

impl HttpRecommendationService {
    pub fn new(
        base_url: impl Into<String>,
        chat_path: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ServiceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        let mut chat_path = chat_path.into();
        if !chat_path.starts_with('/') {
            chat_path.insert(0, '/');
        }

        Ok(Self {
            base_url,
            chat_path,
            client,
        })
    }

    fn chat_url(&self) -> String {
        format!("{}{}", self.base_url, self.chat_path)
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }
}

/// Pull a human-readable message out of a failure body, falling back to the
/// generic message when the body is empty, not JSON, or has no `error`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}

#[async_trait]
impl RecommendationService for HttpRecommendationService {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn recommend(&self, message: &str) -> Result<ChatReply, ServiceError> {
        let url = self.chat_url();
        info!("POST {} (message_len={})", url, message.len());

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await?;

        let status = response.status();
        debug!("Chat response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            warn!("Chat request failed: {} - {}", status, message);
            return Err(ServiceError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ServiceError::Parse(e.to_string()))?;
        let reply = ChatReply::from(parsed);

        info!(
            "Chat reply received: reply_len={}, recommendations={}",
            reply.reply.len(),
            reply.recommendations.len()
        );
        Ok(reply)
    }

    async fn health(&self) -> Result<HealthStatus, ServiceError> {
        let response = self.client.get(self.health_url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Service {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ServiceError::Parse(e.to_string()))
    }

    async fn probe_image(&self, url: &str) -> Result<(), ServiceError> {
        let response = self.client.head(url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            debug!("Image probe failed: {} -> {}", url, status);
            Err(ServiceError::Service {
                status: status.as_u16(),
                message: format!("image unavailable: {url}"),
            })
        }
    }
}
