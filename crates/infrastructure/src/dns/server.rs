use std::net::SocketAddr;
use std::sync::Arc;
use stub_relay_application::use_cases::{RelayOutcome, RelayQueryUseCase};
use tracing::{debug, warn};

/// Turns one received datagram into at most one response datagram.
///
/// Every failure is contained here: it is logged and the datagram is dropped,
/// so the receive loop and other in-flight exchanges are never affected.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<RelayQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<RelayQueryUseCase>) -> Self {
        Self { use_case }
    }

    pub async fn handle_datagram(&self, query: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        match self.use_case.execute(query).await {
            Ok(RelayOutcome::Rejected(response)) => {
                debug!(client = %client, bytes = response.len(), "Answering NOTIMP");
                Some(response)
            }
            Ok(RelayOutcome::Forwarded(response)) => {
                debug!(client = %client, bytes = response.len(), "Relaying upstream response");
                Some(response)
            }
            Err(e) if e.is_upstream_failure() => {
                warn!(client = %client, error = %e, "Upstream exchange failed, dropping query");
                None
            }
            Err(e) => {
                debug!(client = %client, bytes = query.len(), error = %e, "Malformed datagram dropped");
                None
            }
        }
    }
}
