#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use stub_relay_application::ports::UpstreamExchange;
use stub_relay_domain::DomainError;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct MockUpstream {
    reply: Arc<RwLock<Result<Vec<u8>, DomainError>>>,
    received: Arc<RwLock<Vec<Vec<u8>>>>,
    timeouts: Arc<RwLock<Vec<Duration>>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::replying(Vec::new())
    }

    pub fn replying(reply: Vec<u8>) -> Self {
        Self {
            reply: Arc::new(RwLock::new(Ok(reply))),
            received: Arc::new(RwLock::new(Vec::new())),
            timeouts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn set_reply(&self, reply: Vec<u8>) {
        *self.reply.write().await = Ok(reply);
    }

    pub async fn set_error(&self, error: DomainError) {
        *self.reply.write().await = Err(error);
    }

    pub async fn received(&self) -> Vec<Vec<u8>> {
        self.received.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.received.read().await.len()
    }

    pub async fn timeouts(&self) -> Vec<Duration> {
        self.timeouts.read().await.clone()
    }
}

#[async_trait]
impl UpstreamExchange for MockUpstream {
    async fn exchange(&self, query: &[u8], timeout: Duration) -> Result<Vec<u8>, DomainError> {
        self.received.write().await.push(query.to_vec());
        self.timeouts.write().await.push(timeout);
        self.reply.read().await.clone()
    }

    fn server(&self) -> String {
        "mock-upstream:53".to_string()
    }
}
