use crate::name::{decode_name, decode_name_at, encode_name};
use crate::{DomainError, Header, RecordType};

pub const CLASS_IN: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
}

impl Question {
    pub fn new(name: impl Into<String>, qtype: u16, qclass: u16) -> Self {
        Self {
            name: name.into(),
            qtype,
            qclass,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        let mut buf = encode_name(&self.name)?;
        buf.extend_from_slice(&self.qtype.to_be_bytes());
        buf.extend_from_slice(&self.qclass.to_be_bytes());
        Ok(buf)
    }

    /// Decodes the first question of `message`, which starts right after the
    /// header. Returns the absolute offset of the byte following it.
    pub fn decode(message: &[u8]) -> Result<(Self, usize), DomainError> {
        if message.len() <= Header::LEN {
            return Err(DomainError::TooShort {
                needed: Header::LEN + 1,
                actual: message.len(),
            });
        }

        let (name, consumed) = decode_name(&message[Header::LEN..])?;
        Self::read_fixed(message, name, Header::LEN + consumed)
    }

    /// Decodes a question at an arbitrary `offset`, following compression
    /// pointers. Used when walking past every question of a message.
    pub fn decode_at(message: &[u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let (name, consumed) = decode_name_at(message, offset)?;
        Self::read_fixed(message, name, offset + consumed)
    }

    fn read_fixed(message: &[u8], name: String, offset: usize) -> Result<(Self, usize), DomainError> {
        let fixed = message
            .get(offset..offset + 4)
            .ok_or(DomainError::TruncatedRecord {
                offset,
                needed: 4,
                available: message.len().saturating_sub(offset),
            })?;

        let question = Self {
            name,
            qtype: u16::from_be_bytes([fixed[0], fixed[1]]),
            qclass: u16::from_be_bytes([fixed[2], fixed[3]]),
        };

        Ok((question, offset + 4))
    }

    pub fn record_type(&self) -> RecordType {
        RecordType::from_u16(self.qtype)
    }
}
