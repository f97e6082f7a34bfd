use crate::error::Result;
use async_trait::async_trait;

/// Delivers an encoded request body to the processor and returns the raw
/// response body. Retries, TLS and timeouts belong to the implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, url: &str, body: String) -> Result<String>;
}

pub type TransportBox = Box<dyn Transport>;
