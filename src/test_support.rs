//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::state::App;
use crate::service::{ChatReply, HealthStatus, RecommendationService, ServiceError};

/// A canned service for tests that don't need real HTTP calls.
///
/// Answers every `recommend` with the configured result and records the
/// messages it was sent.
pub struct StubService {
    result: Result<ChatReply, ServiceError>,
    broken_images: Vec<String>,
    requests: Mutex<Vec<String>>,
}

impl Default for StubService {
    fn default() -> Self {
        Self::replying(ChatReply {
            reply: "stub reply".to_string(),
            recommendations: Vec::new(),
        })
    }
}

impl StubService {
    pub fn replying(reply: ChatReply) -> Self {
        Self {
            result: Ok(reply),
            broken_images: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ServiceError) -> Self {
        Self {
            result: Err(error),
            broken_images: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Image URLs that `probe_image` reports as unavailable.
    pub fn with_broken_images(mut self, urls: &[&str]) -> Self {
        self.broken_images = urls.iter().map(|u| u.to_string()).collect();
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RecommendationService for StubService {
    fn endpoint(&self) -> &str {
        "stub"
    }

    async fn recommend(&self, message: &str) -> Result<ChatReply, ServiceError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(message.to_string());
        }
        self.result.clone()
    }

    async fn health(&self) -> Result<HealthStatus, ServiceError> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            products_loaded: 0,
        })
    }

    async fn probe_image(&self, url: &str) -> Result<(), ServiceError> {
        if self.broken_images.iter().any(|u| u == url) {
            Err(ServiceError::Service {
                status: 404,
                message: format!("image unavailable: {url}"),
            })
        } else {
            Ok(())
        }
    }
}

/// Creates a test App backed by a default StubService.
pub fn test_app() -> App {
    App::new(Arc::new(StubService::default()))
}
