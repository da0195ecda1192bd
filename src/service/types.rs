//! Wire types for the SmartShop HTTP contract.
//!
//! ```text
//! POST /chat    {"message": "..."}
//!   200         {"reply": "...", "recommendations": [ {...}, ... ]}
//!   4xx/5xx     {"error": "..."}          (body optional)
//! GET  /health  {"status": "healthy", "products_loaded": 42}
//! ```

use serde::{Deserialize, Serialize};

use crate::core::product::ProductRecord;

#[derive(Serialize, Debug)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub recommendations: Option<Vec<ProductRecord>>,
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// A successful answer from the service. Missing or null fields are
/// normalized to empty here so the reducer never sees an `Option`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatReply {
    pub reply: String,
    pub recommendations: Vec<ProductRecord>,
}

impl From<ChatResponse> for ChatReply {
    fn from(response: ChatResponse) -> Self {
        Self {
            reply: response.reply.unwrap_or_default(),
            recommendations: response.recommendations.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub products_loaded: u64,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_message_only() {
        let body = serde_json::to_value(ChatRequest { message: "running shoes" }).unwrap();
        assert_eq!(body, serde_json::json!({"message": "running shoes"}));
    }

    #[test]
    fn missing_recommendations_become_empty() {
        let response: ChatResponse = serde_json::from_str(r#"{"reply": "hi"}"#).unwrap();
        let reply = ChatReply::from(response);
        assert_eq!(reply.reply, "hi");
        assert!(reply.recommendations.is_empty());
    }

    #[test]
    fn null_recommendations_become_empty() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"reply": "hi", "recommendations": null}"#).unwrap();
        assert!(ChatReply::from(response).recommendations.is_empty());
    }

    #[test]
    fn error_body_is_optional() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.error.is_none());
    }

    #[test]
    fn health_status_parses() {
        let health: HealthStatus =
            serde_json::from_str(r#"{"status": "healthy", "products_loaded": 12}"#).unwrap();
        assert!(health.is_healthy());
        assert_eq!(health.products_loaded, 12);
    }
}
