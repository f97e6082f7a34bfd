use crate::domain::ports::Transport;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: String,
}

/// A transport that answers from a queue of scripted response bodies and
/// records every request it receives.
///
/// Clones share the same queue and log, so a test can hand one clone to a
/// `Gateway` and inspect the traffic through another.
#[derive(Default, Clone)]
pub struct RecordingTransport {
    responses: Arc<RwLock<VecDeque<String>>>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
}

impl RecordingTransport {
    /// Creates a transport with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response body while building the transport, before any
    /// request is in flight.
    pub fn with_response(self, body: impl Into<String>) -> Self {
        if let Ok(mut queue) = self.responses.try_write() {
            queue.push_back(body.into());
        }
        self
    }

    pub async fn push_response(&self, body: impl Into<String>) {
        self.responses.write().await.push_back(body.into());
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    pub async fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.read().await.last().cloned()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post(&self, url: &str, body: String) -> Result<String> {
        self.requests.write().await.push(RecordedRequest {
            url: url.to_string(),
            body,
        });
        self.responses.write().await.pop_front().ok_or_else(|| {
            GatewayError::transport(
                format!("POST {url}"),
                std::io::Error::other("no scripted response left"),
            )
        })
    }
}
