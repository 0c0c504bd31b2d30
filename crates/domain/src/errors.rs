use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },

    #[error("Malformed domain name: {0}")]
    MalformedName(String),

    #[error("Label '{label}' is {len} bytes long (maximum is 63)")]
    LabelTooLong { label: String, len: usize },

    #[error("Truncated record at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedRecord {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Record data of {len} bytes does not fit a 16-bit length field")]
    DataTooLong { len: usize },

    #[error("Compression pointer {pointer} is outside the {len}-byte message")]
    PointerOutOfRange { pointer: usize, len: usize },

    #[error("Compression loop detected at offset {offset}")]
    CompressionLoop { offset: usize },

    #[error("Upstream {server} unavailable: {reason}")]
    UpstreamUnavailable { server: String, reason: String },

    #[error("Timeout waiting for upstream {server}")]
    UpstreamTimeout { server: String },
}

impl DomainError {
    /// Transport failures, as opposed to structural decode failures.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            DomainError::UpstreamUnavailable { .. } | DomainError::UpstreamTimeout { .. }
        )
    }
}
