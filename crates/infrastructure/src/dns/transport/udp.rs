//! UDP upstream transport (RFC 1035 §4.2.1)
//!
//! Every exchange binds a fresh ephemeral socket, connects it to the upstream
//! so only its datagrams are accepted, writes the query and reads one reply.
//! Replies larger than [`MAX_UPSTREAM_RESPONSE_SIZE`] are cut at that size.

use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use stub_relay_application::ports::UpstreamExchange;
use stub_relay_domain::{DomainError, MAX_UPSTREAM_RESPONSE_SIZE};
use tokio::net::UdpSocket;
use tracing::debug;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn unavailable(&self, reason: String) -> DomainError {
        DomainError::UpstreamUnavailable {
            server: self.server_addr.to_string(),
            reason,
        }
    }

    async fn round_trip(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.unavailable(format!("failed to bind UDP socket: {}", e)))?;

        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.unavailable(format!("failed to connect: {}", e)))?;

        let bytes_sent = socket
            .send(query)
            .await
            .map_err(|e| self.unavailable(format!("failed to send query: {}", e)))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UPSTREAM_RESPONSE_SIZE];
        let bytes_received = socket
            .recv(&mut recv_buf)
            .await
            .map_err(|e| self.unavailable(format!("failed to receive response: {}", e)))?;

        recv_buf.truncate(bytes_received);

        debug!(server = %self.server_addr, bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}

#[async_trait]
impl UpstreamExchange for UdpTransport {
    async fn exchange(&self, query: &[u8], timeout: Duration) -> Result<Vec<u8>, DomainError> {
        tokio::time::timeout(timeout, self.round_trip(query))
            .await
            .map_err(|_| DomainError::UpstreamTimeout {
                server: self.server_addr.to_string(),
            })?
    }

    fn server(&self) -> String {
        self.server_addr.to_string()
    }
}
