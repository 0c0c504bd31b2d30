use crate::DomainError;

/// Standard query (RFC 1035 §4.1.1).
pub const OPCODE_QUERY: u8 = 0;

pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_FORMERR: u8 = 1;
pub const RCODE_SERVFAIL: u8 = 2;
pub const RCODE_NXDOMAIN: u8 = 3;
pub const RCODE_NOTIMP: u8 = 4;
pub const RCODE_REFUSED: u8 = 5;

const OPCODE_MASK: u8 = 0x0F;
const RCODE_MASK: u8 = 0x0F;
// Bits 4-6 of the second flag byte; bit 7 belongs to RA.
const RESERVED_MASK: u8 = 0x07;

/// The fixed 12-byte message header.
///
/// Multi-bit fields are not checked against any enumeration: every 4-bit
/// opcode or response code round-trips. Values wider than their field are
/// truncated on [`Header::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    /// Transaction id, echoed back to the client.
    pub id: u16,

    /// QR: set on responses.
    pub query_response: bool,
    /// 4 bits, bits 3-6 of the first flag byte. Only [`OPCODE_QUERY`] is relayed.
    pub opcode: u8,
    pub authoritative_answer: bool,
    pub truncation: bool,
    pub recursion_desired: bool,

    pub recursion_available: bool,
    /// Z: 3 bits, bits 4-6 of the second flag byte.
    pub reserved: u8,
    /// 4 bits, low nibble of the second flag byte.
    pub response_code: u8,

    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl Header {
    pub const LEN: usize = 12;

    /// Decodes the first 12 bytes of `buf`. Trailing bytes are ignored.
    pub fn decode(buf: &[u8]) -> Result<Self, DomainError> {
        if buf.len() < Self::LEN {
            return Err(DomainError::TooShort {
                needed: Self::LEN,
                actual: buf.len(),
            });
        }

        let flags_hi = buf[2];
        let flags_lo = buf[3];

        Ok(Self {
            id: u16::from_be_bytes([buf[0], buf[1]]),
            query_response: flags_hi & 0x80 != 0,
            opcode: (flags_hi >> 3) & OPCODE_MASK,
            authoritative_answer: flags_hi & 0x04 != 0,
            truncation: flags_hi & 0x02 != 0,
            recursion_desired: flags_hi & 0x01 != 0,
            recursion_available: flags_lo & 0x80 != 0,
            reserved: (flags_lo >> 4) & RESERVED_MASK,
            response_code: flags_lo & RCODE_MASK,
            question_count: u16::from_be_bytes([buf[4], buf[5]]),
            answer_count: u16::from_be_bytes([buf[6], buf[7]]),
            authority_count: u16::from_be_bytes([buf[8], buf[9]]),
            additional_count: u16::from_be_bytes([buf[10], buf[11]]),
        })
    }

    pub fn encode(&self) -> [u8; Self::LEN] {
        let mut buf = [0u8; Self::LEN];

        buf[0..2].copy_from_slice(&self.id.to_be_bytes());

        buf[2] = bit(self.recursion_desired)
            | bit(self.truncation) << 1
            | bit(self.authoritative_answer) << 2
            | (self.opcode & OPCODE_MASK) << 3
            | bit(self.query_response) << 7;

        buf[3] = (self.response_code & RCODE_MASK)
            | (self.reserved & RESERVED_MASK) << 4
            | bit(self.recursion_available) << 7;

        buf[4..6].copy_from_slice(&self.question_count.to_be_bytes());
        buf[6..8].copy_from_slice(&self.answer_count.to_be_bytes());
        buf[8..10].copy_from_slice(&self.authority_count.to_be_bytes());
        buf[10..12].copy_from_slice(&self.additional_count.to_be_bytes());

        buf
    }

    pub fn is_standard_query(&self) -> bool {
        self.opcode == OPCODE_QUERY
    }
}

#[inline]
fn bit(flag: bool) -> u8 {
    flag as u8
}

pub fn rcode_to_status(rcode: u8) -> &'static str {
    match rcode {
        RCODE_NOERROR => "NOERROR",
        RCODE_FORMERR => "FORMERR",
        RCODE_SERVFAIL => "SERVFAIL",
        RCODE_NXDOMAIN => "NXDOMAIN",
        RCODE_NOTIMP => "NOTIMP",
        RCODE_REFUSED => "REFUSED",
        _ => "UNKNOWN",
    }
}
