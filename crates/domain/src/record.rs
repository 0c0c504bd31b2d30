use crate::name::{decode_name_at, encode_name};
use crate::{DomainError, RecordType};
use std::net::Ipv4Addr;

/// Type, class and TTL.
const FIXED_LEN: usize = 8;
const RDLENGTH_LEN: usize = 2;

/// Returns the bytes of the resource record starting at `offset` together with
/// the offset just past it, without interpreting its data.
pub fn record_span(message: &[u8], offset: usize) -> Result<(&[u8], usize), DomainError> {
    let (_, name_len) = decode_name_at(message, offset)?;
    let end = record_end(message, offset, name_len)?;
    Ok((&message[offset..end], end))
}

/// Offset just past the record at `offset` whose name occupies `name_len`
/// bytes of the message.
fn record_end(message: &[u8], offset: usize, name_len: usize) -> Result<usize, DomainError> {
    let rdlength_at = offset + name_len + FIXED_LEN;

    let rdlength = message
        .get(rdlength_at..rdlength_at + RDLENGTH_LEN)
        .ok_or(DomainError::TruncatedRecord {
            offset,
            needed: name_len + FIXED_LEN + RDLENGTH_LEN,
            available: message.len() - offset,
        })?;
    let rdlength = usize::from(u16::from_be_bytes([rdlength[0], rdlength[1]]));

    let end = rdlength_at + RDLENGTH_LEN + rdlength;
    if end > message.len() {
        return Err(DomainError::TruncatedRecord {
            offset,
            needed: end - offset,
            available: message.len() - offset,
        });
    }

    Ok(end)
}

/// A fully decoded answer, authority or additional record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub name: String,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub data: Vec<u8>,
}

impl AnswerRecord {
    pub fn a(name: impl Into<String>, ttl: u32, addr: Ipv4Addr) -> Self {
        Self {
            name: name.into(),
            rtype: RecordType::A.to_u16(),
            class: crate::question::CLASS_IN,
            ttl,
            data: addr.octets().to_vec(),
        }
    }

    pub fn decode(message: &[u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let (name, name_len) = decode_name_at(message, offset)?;
        let next = record_end(message, offset, name_len)?;

        let fixed = &message[offset + name_len..next];
        let record = Self {
            name,
            rtype: u16::from_be_bytes([fixed[0], fixed[1]]),
            class: u16::from_be_bytes([fixed[2], fixed[3]]),
            ttl: u32::from_be_bytes([fixed[4], fixed[5], fixed[6], fixed[7]]),
            data: fixed[FIXED_LEN + RDLENGTH_LEN..].to_vec(),
        };

        Ok((record, next))
    }

    pub fn record_type(&self) -> RecordType {
        RecordType::from_u16(self.rtype)
    }

    /// The address carried by an A record.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        if self.record_type() != RecordType::A {
            return None;
        }
        let octets: [u8; 4] = self.data.as_slice().try_into().ok()?;
        Some(Ipv4Addr::from(octets))
    }

    /// Encodes the record with its name written out in full.
    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        let name = encode_name(&self.name)?;
        self.encode_with_name(&name)
    }

    /// Encodes the record with its name replaced by a compression pointer to
    /// `target`, typically [`QUESTION_NAME_OFFSET`].
    pub fn encode_with_pointer(&self, target: u16) -> Result<Vec<u8>, DomainError> {
        if target > 0x3FFF {
            return Err(DomainError::PointerOutOfRange {
                pointer: usize::from(target),
                len: 0x4000,
            });
        }
        let pointer = (0xC000 | target).to_be_bytes();
        self.encode_with_name(&pointer)
    }

    fn encode_with_name(&self, name: &[u8]) -> Result<Vec<u8>, DomainError> {
        let rdlength = u16::try_from(self.data.len())
            .map_err(|_| DomainError::DataTooLong { len: self.data.len() })?;

        let mut buf = Vec::with_capacity(name.len() + FIXED_LEN + RDLENGTH_LEN + self.data.len());
        buf.extend_from_slice(name);
        buf.extend_from_slice(&self.rtype.to_be_bytes());
        buf.extend_from_slice(&self.class.to_be_bytes());
        buf.extend_from_slice(&self.ttl.to_be_bytes());
        buf.extend_from_slice(&rdlength.to_be_bytes());
        buf.extend_from_slice(&self.data);
        Ok(buf)
    }
}

/// Offset of the first question name, right after the header.
pub const QUESTION_NAME_OFFSET: u16 = 12;
