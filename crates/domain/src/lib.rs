//! Stub Relay Domain Layer
//!
//! DNS wire codec (RFC 1035 §4.1): header, names with compression, questions
//! and resource records, plus the relay configuration model.
pub mod config;
pub mod errors;
pub mod header;
pub mod message;
pub mod name;
pub mod question;
pub mod record;
pub mod record_type;
pub mod upstream_addr;

pub use config::{CliOverrides, Config, ConfigError, LogFormat};
pub use errors::DomainError;
pub use header::{Header, OPCODE_QUERY, RCODE_NOTIMP};
pub use message::{answers, ResponseSummary};
pub use name::{decode_compressed_name, decode_name, decode_name_at, encode_name};
pub use question::{Question, CLASS_IN};
pub use record::{record_span, AnswerRecord, QUESTION_NAME_OFFSET};
pub use record_type::RecordType;
pub use upstream_addr::UpstreamAddr;

use std::time::Duration;

/// How long a forwarded exchange may wait for the upstream reply.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on the size of an upstream reply.
pub const MAX_UPSTREAM_RESPONSE_SIZE: usize = 1024;

/// Upper bound on the size of a client query.
pub const MAX_QUERY_SIZE: usize = 512;
