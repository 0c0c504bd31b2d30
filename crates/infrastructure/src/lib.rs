//! Stub Relay Infrastructure Layer
pub mod dns;
