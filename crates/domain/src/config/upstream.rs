use crate::UpstreamAddr;
use serde::{Deserialize, Serialize};

/// The single resolver every standard query is forwarded to.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct UpstreamConfig {
    /// `IP:PORT`, `[IPv6]:PORT` or `HOSTNAME:PORT`.
    #[serde(default)]
    pub server: String,
}

impl UpstreamConfig {
    pub fn addr(&self) -> Result<UpstreamAddr, String> {
        self.server.parse()
    }
}
