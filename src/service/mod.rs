//! # Recommendation Service
//!
//! Everything that talks to the remote SmartShop service lives here. The
//! rest of the crate only sees the [`RecommendationService`] trait and the
//! domain types it returns, so tests can swap in a stub.

pub mod client;
pub mod http;
pub mod types;

pub use client::{RecommendationService, ServiceError};
pub use http::HttpRecommendationService;
pub use types::{ChatReply, HealthStatus};
