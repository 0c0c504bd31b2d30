use std::net::SocketAddr;
use std::time::Duration;
use stub_relay_domain::{DomainError, UpstreamAddr};
use tracing::debug;

/// Resolves the configured upstream to a single socket address, looking up
/// hostnames once and taking the first address returned.
pub async fn resolve_upstream(
    addr: &UpstreamAddr,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    let (hostname, port) = match addr {
        UpstreamAddr::Resolved(resolved) => return Ok(*resolved),
        UpstreamAddr::Unresolved { hostname, port } => (hostname, *port),
    };
    let target = format!("{}:{}", hostname, port);

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| DomainError::UpstreamTimeout {
            server: target.clone(),
        })?
        .map_err(|e| DomainError::UpstreamUnavailable {
            server: target.clone(),
            reason: format!("resolution failed: {}", e),
        })?;

    let resolved = addrs.next().ok_or_else(|| DomainError::UpstreamUnavailable {
        server: target.clone(),
        reason: "no addresses found".to_string(),
    })?;

    debug!(upstream = %target, resolved = %resolved, "Upstream hostname resolved");
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolved_address_is_returned_as_is() {
        let addr: UpstreamAddr = "9.9.9.9:53".parse().unwrap();
        let resolved = resolve_upstream(&addr, Duration::from_secs(1)).await.unwrap();
        assert_eq!(resolved, "9.9.9.9:53".parse().unwrap());
    }

    #[tokio::test]
    async fn test_localhost_resolves() {
        let addr: UpstreamAddr = "localhost:5353".parse().unwrap();
        let resolved = resolve_upstream(&addr, Duration::from_secs(5)).await.unwrap();
        assert!(resolved.ip().is_loopback());
        assert_eq!(resolved.port(), 5353);
    }
}
