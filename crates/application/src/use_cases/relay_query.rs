use crate::ports::UpstreamExchange;
use std::sync::Arc;
use std::time::Duration;
use stub_relay_domain::{DomainError, Header, ResponseSummary, RCODE_NOTIMP, UPSTREAM_TIMEOUT};
use tracing::{debug, Level};

/// What the relay does with a decoded query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayDecision {
    Forward,
    Reject,
}

impl RelayDecision {
    pub fn for_header(header: &Header) -> Self {
        if header.is_standard_query() {
            RelayDecision::Forward
        } else {
            RelayDecision::Reject
        }
    }
}

/// The response to send back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// NOTIMP answer built locally, the upstream was never contacted.
    Rejected(Vec<u8>),
    /// Upstream reply with its header rewritten for the client.
    Forwarded(Vec<u8>),
}

impl RelayOutcome {
    pub fn bytes(&self) -> &[u8] {
        match self {
            RelayOutcome::Rejected(bytes) | RelayOutcome::Forwarded(bytes) => bytes,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, RelayOutcome::Rejected(_))
    }
}

pub struct RelayQueryUseCase {
    upstream: Arc<dyn UpstreamExchange>,
    timeout: Duration,
}

impl RelayQueryUseCase {
    pub fn new(upstream: Arc<dyn UpstreamExchange>) -> Self {
        Self {
            upstream,
            timeout: UPSTREAM_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs one exchange for the raw client `query`.
    ///
    /// Errors mean the client gets no response at all.
    pub async fn execute(&self, query: &[u8]) -> Result<RelayOutcome, DomainError> {
        let header = Header::decode(query)?;

        match RelayDecision::for_header(&header) {
            RelayDecision::Reject => {
                debug!(id = header.id, opcode = header.opcode, "Rejecting non-standard query");
                Ok(RelayOutcome::Rejected(not_implemented_response(
                    &header, query,
                )))
            }
            RelayDecision::Forward => {
                let reply = self.upstream.exchange(query, self.timeout).await?;
                let response = rewrite_upstream_response(header.id, &reply)?;

                if tracing::enabled!(Level::DEBUG) {
                    log_summary(&self.upstream.server(), &response);
                }

                Ok(RelayOutcome::Forwarded(response))
            }
        }
    }
}

/// Builds a NOTIMP answer from the query's own header, echoing everything
/// after the header verbatim.
pub fn not_implemented_response(header: &Header, query: &[u8]) -> Vec<u8> {
    let response_header = Header {
        query_response: true,
        authoritative_answer: false,
        truncation: false,
        recursion_available: false,
        reserved: 0,
        response_code: RCODE_NOTIMP,
        authority_count: 0,
        additional_count: 0,
        ..*header
    };

    with_body(&response_header, query)
}

/// Patches the upstream reply header so the client sees its own id and no
/// authority or additional sections. The body is passed through untouched.
pub fn rewrite_upstream_response(client_id: u16, reply: &[u8]) -> Result<Vec<u8>, DomainError> {
    let upstream_header = Header::decode(reply)?;

    let response_header = Header {
        id: client_id,
        authoritative_answer: false,
        reserved: 0,
        truncation: false,
        recursion_available: false,
        authority_count: 0,
        additional_count: 0,
        ..upstream_header
    };

    Ok(with_body(&response_header, reply))
}

fn with_body(header: &Header, message: &[u8]) -> Vec<u8> {
    let body = message.get(Header::LEN..).unwrap_or_default();
    let mut response = Vec::with_capacity(Header::LEN + body.len());
    response.extend_from_slice(&header.encode());
    response.extend_from_slice(body);
    response
}

fn log_summary(server: &str, response: &[u8]) {
    match ResponseSummary::inspect(response) {
        Ok(summary) => debug!(upstream = %server, response = %summary, "Upstream answered"),
        Err(e) => debug!(upstream = %server, error = %e, "Upstream answer not introspectable"),
    }
}
