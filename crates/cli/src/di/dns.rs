use std::sync::Arc;
use stub_relay_application::use_cases::RelayQueryUseCase;
use stub_relay_domain::{Config, UPSTREAM_TIMEOUT};
use stub_relay_infrastructure::dns::{resolve_upstream, DnsServerHandler, UdpTransport};
use tracing::info;

pub struct DnsServices {
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let upstream = config.upstream.addr().map_err(anyhow::Error::msg)?;
        let upstream_addr = resolve_upstream(&upstream, UPSTREAM_TIMEOUT).await?;

        info!(upstream = %upstream, resolved = %upstream_addr, "Upstream resolver configured");

        let transport = Arc::new(UdpTransport::new(upstream_addr));
        let relay = Arc::new(RelayQueryUseCase::new(transport));
        let handler = DnsServerHandler::new(relay);

        Ok(Self { handler })
    }
}
