//! Lyric-generation API integration
//!
//! Provides the interface to the remote `/generate` and `/health` endpoints.
//! Generation, retrieval and ranking all happen behind this boundary.

pub mod client;
pub mod mock;

pub use client::LyricsApiClient;
pub use mock::MockGenerationClient;

use crate::models::{GenerateRequest, GenerateResponse, HealthStatus};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;
    async fn health(&self) -> Result<HealthStatus>;
}
