use async_trait::async_trait;
use std::time::Duration;
use stub_relay_domain::DomainError;

/// One request/response round trip with the configured upstream resolver.
///
/// Implementations open a fresh session per call, send `query` unmodified and
/// return the raw reply. Failing to get a reply within `timeout` is reported
/// as [`DomainError::UpstreamTimeout`]; any other transport failure as
/// [`DomainError::UpstreamUnavailable`].
#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    async fn exchange(&self, query: &[u8], timeout: Duration) -> Result<Vec<u8>, DomainError>;

    /// Human-readable upstream address, for logs.
    fn server(&self) -> String;
}
