//! Domain name label encoding (RFC 1035 §3.1) and compression pointer
//! resolution (RFC 1035 §4.1.4).
//!
//! The encoder never emits compression pointers. The decoders return the
//! dotted name together with the number of bytes consumed from the buffer
//! they were given; bytes read while following a pointer are not counted.
//!
//! Label bytes outside printable ASCII are written in master-file form
//! (`\DDD`, RFC 1035 §5.1), and a literal `.` or `\` inside a label is
//! backslash-escaped, so decoding and re-encoding is lossless.

use crate::DomainError;

pub const MAX_LABEL_LEN: usize = 63;

/// Wire length of a name including length octets and the root label.
pub const MAX_NAME_LEN: usize = 255;

const POINTER_MASK: u8 = 0xC0;

// Each hop must land on a previously unvisited offset, so this only bounds
// pathological but loop-free chains.
const MAX_POINTER_HOPS: usize = 64;

/// Encodes a dotted name as length-prefixed labels terminated by a zero byte.
///
/// Empty segments are skipped, so `""` and `"."` both encode to the root
/// name and a trailing dot is accepted. `\DDD` and `\X` escapes are
/// resolved to the raw bytes they stand for.
pub fn encode_name(name: &str) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(name.len() + 2);

    for label in split_labels(name)? {
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::LabelTooLong {
                label: escape_label(&label),
                len: label.len(),
            });
        }
        buf.push(label.len() as u8);
        buf.extend_from_slice(&label);
    }
    buf.push(0);

    if buf.len() > MAX_NAME_LEN {
        return Err(DomainError::MalformedName(format!(
            "'{}' encodes to {} bytes (maximum is {})",
            name,
            buf.len(),
            MAX_NAME_LEN
        )));
    }

    Ok(buf)
}

fn split_labels(name: &str) -> Result<Vec<Vec<u8>>, DomainError> {
    let mut labels = Vec::new();
    let mut current = Vec::new();
    let mut chars = name.chars();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !current.is_empty() {
                    labels.push(std::mem::take(&mut current));
                }
            }
            '\\' => current.extend(unescape(&mut chars, name)?),
            other => {
                let mut utf8 = [0u8; 4];
                current.extend_from_slice(other.encode_utf8(&mut utf8).as_bytes());
            }
        }
    }
    if !current.is_empty() {
        labels.push(current);
    }

    Ok(labels)
}

fn unescape(chars: &mut std::str::Chars<'_>, name: &str) -> Result<Vec<u8>, DomainError> {
    let invalid = || DomainError::MalformedName(format!("invalid escape in '{}'", name));

    let first = chars.next().ok_or_else(invalid)?;
    let Some(hundreds) = first.to_digit(10) else {
        let mut utf8 = [0u8; 4];
        return Ok(first.encode_utf8(&mut utf8).as_bytes().to_vec());
    };

    let tens = chars.next().and_then(|c| c.to_digit(10)).ok_or_else(invalid)?;
    let ones = chars.next().and_then(|c| c.to_digit(10)).ok_or_else(invalid)?;
    let value = u8::try_from(hundreds * 100 + tens * 10 + ones).map_err(|_| invalid())?;
    Ok(vec![value])
}

fn escape_label(label: &[u8]) -> String {
    let mut out = String::with_capacity(label.len());
    for &b in label {
        match b {
            b'.' | b'\\' => {
                out.push('\\');
                out.push(char::from(b));
            }
            0x21..=0x7E => out.push(char::from(b)),
            _ => out.push_str(&format!("\\{:03}", b)),
        }
    }
    out
}

/// Decodes an uncompressed name starting at `buf[0]`.
///
/// A compression pointer is rejected here; use [`decode_compressed_name`]
/// when the name may reference earlier parts of the message.
pub fn decode_name(buf: &[u8]) -> Result<(String, usize), DomainError> {
    let mut labels = Vec::new();
    let consumed = read_labels(buf, None, &mut labels, &mut Vec::new(), 0)?;
    Ok((labels.join("."), consumed))
}

/// Decodes a name starting at `data[0]`, following compression pointers into
/// `message`, which must be the whole DNS message.
///
/// A pointer always terminates the name it appears in. Its target may itself
/// end in a pointer; chains are followed until they reach a root label, and a
/// chain that revisits an offset fails with [`DomainError::CompressionLoop`].
pub fn decode_compressed_name(
    data: &[u8],
    message: &[u8],
) -> Result<(String, usize), DomainError> {
    let mut labels = Vec::new();
    let consumed = read_labels(data, Some(message), &mut labels, &mut Vec::new(), 0)?;
    Ok((labels.join("."), consumed))
}

/// Decodes the name at absolute `offset` of `message`.
pub fn decode_name_at(message: &[u8], offset: usize) -> Result<(String, usize), DomainError> {
    let data = message
        .get(offset..)
        .ok_or_else(|| DomainError::MalformedName(format!("offset {} past end of message", offset)))?;
    decode_compressed_name(data, message)
}

fn read_labels(
    data: &[u8],
    message: Option<&[u8]>,
    labels: &mut Vec<String>,
    visited: &mut Vec<usize>,
    prefix_len: usize,
) -> Result<usize, DomainError> {
    let mut i = 0;
    // Wire length of every label collected so far, across pointer hops.
    let mut wire_len = prefix_len;

    loop {
        let len = *data.get(i).ok_or_else(|| {
            DomainError::MalformedName(format!("missing length octet at position {}", i))
        })?;

        match len & POINTER_MASK {
            0x00 => {}
            POINTER_MASK => {
                let message = message.ok_or_else(|| {
                    DomainError::MalformedName(format!(
                        "compression pointer at position {} in uncompressed name",
                        i
                    ))
                })?;
                let low = *data.get(i + 1).ok_or_else(|| {
                    DomainError::MalformedName(format!("truncated pointer at position {}", i))
                })?;
                let target = (usize::from(len & !POINTER_MASK) << 8) | usize::from(low);

                if target >= message.len() {
                    return Err(DomainError::PointerOutOfRange {
                        pointer: target,
                        len: message.len(),
                    });
                }
                if visited.contains(&target) || visited.len() >= MAX_POINTER_HOPS {
                    return Err(DomainError::CompressionLoop { offset: target });
                }
                visited.push(target);

                read_labels(&message[target..], Some(message), labels, visited, wire_len)?;
                return Ok(i + 2);
            }
            other => {
                return Err(DomainError::MalformedName(format!(
                    "unsupported label type {:#04x} at position {}",
                    other, i
                )));
            }
        }

        i += 1;
        if len == 0 {
            return Ok(i);
        }

        let len = usize::from(len);
        let label = data.get(i..i + len).ok_or_else(|| {
            DomainError::MalformedName(format!(
                "label of {} bytes at position {} runs past end of buffer ({} bytes)",
                len,
                i - 1,
                data.len()
            ))
        })?;

        wire_len += len + 1;
        if wire_len + 1 > MAX_NAME_LEN {
            return Err(DomainError::MalformedName(format!(
                "name exceeds {} bytes",
                MAX_NAME_LEN
            )));
        }

        labels.push(escape_label(label));
        i += len;
    }
}
