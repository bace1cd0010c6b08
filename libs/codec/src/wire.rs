//! Header wire codec.
//!
//! Byte layout, big-endian throughout:
//!
//! ```text
//! Basic:    | signature u8 | version u8 | type_code i16 |
//! Extended: | ... same 4 bytes ... | count u16 | entries |
//! entry:    | key_len u16 | key utf8 | value_len u16 | value utf8 |
//! ```
//!
//! Metadata keys are written in sorted order so encoding is deterministic;
//! map insertion order carries no meaning on the wire. Body payload bytes
//! are handled by the downstream codec, not here.

use std::collections::{BTreeMap, HashMap};

use types::{Header, HeaderVersion, HEADER_SIGNATURE};

use crate::error::{ProtocolError, ProtocolResult};

/// Fixed prefix shared by both layouts: signature, version, type code.
pub const FIXED_HEADER_LEN: usize = 4;

/// Serialize a header to wire bytes.
///
/// Fails with `MetadataTooLarge` when an entry (or the entry count)
/// cannot be represented in the u16 length prefixes; nothing is ever
/// silently truncated.
pub fn encode_header(header: &Header) -> ProtocolResult<Vec<u8>> {
    let mut out = Vec::with_capacity(FIXED_HEADER_LEN);
    out.push(header.signature());
    out.push(header.version());
    out.extend_from_slice(&header.type_code().to_be_bytes());

    if let Some(metadata) = header.metadata() {
        let sorted: BTreeMap<&str, &str> = metadata
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        let count = wire_len(sorted.len(), "metadata entry count")?;
        out.extend_from_slice(&count.to_be_bytes());
        for (key, value) in sorted {
            put_str(&mut out, key, "metadata key")?;
            put_str(&mut out, value, "metadata value")?;
        }
    }

    Ok(out)
}

/// Parse a header from the front of `buf`.
///
/// Returns the header and the number of bytes consumed; remaining bytes
/// belong to the body.
pub fn parse_header(buf: &[u8]) -> ProtocolResult<(Header, usize)> {
    if buf.len() < FIXED_HEADER_LEN {
        return Err(ProtocolError::message_too_small(
            FIXED_HEADER_LEN,
            buf.len(),
            "fixed header prefix",
        ));
    }

    let signature = buf[0];
    if signature != HEADER_SIGNATURE {
        return Err(ProtocolError::InvalidSignature {
            expected: HEADER_SIGNATURE,
            actual: signature,
        });
    }

    let version = HeaderVersion::try_from(buf[1])
        .map_err(|_| ProtocolError::unsupported_version(buf[1]))?;
    let type_code = i16::from_be_bytes([buf[2], buf[3]]);

    match version {
        HeaderVersion::Basic => Ok((Header::basic(type_code), FIXED_HEADER_LEN)),
        HeaderVersion::Extended => {
            let mut offset = FIXED_HEADER_LEN;
            let count = read_u16(buf, &mut offset, "metadata count")?;

            let mut metadata = HashMap::with_capacity(count as usize);
            for _ in 0..count {
                let key = read_string(buf, &mut offset)?;
                let value = read_string(buf, &mut offset)?;
                metadata.insert(key, value);
            }

            Ok((Header::extended(type_code, metadata), offset))
        }
    }
}

fn wire_len(len: usize, context: &str) -> ProtocolResult<u16> {
    u16::try_from(len).map_err(|_| ProtocolError::MetadataTooLarge {
        context: context.to_string(),
        len,
        limit: u16::MAX as usize,
    })
}

fn put_str(out: &mut Vec<u8>, s: &str, context: &str) -> ProtocolResult<()> {
    let len = wire_len(s.len(), context)?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

fn read_u16(buf: &[u8], offset: &mut usize, context: &str) -> ProtocolResult<u16> {
    let end = *offset + 2;
    if buf.len() < end {
        return Err(ProtocolError::message_too_small(end, buf.len(), context));
    }
    let value = u16::from_be_bytes([buf[*offset], buf[*offset + 1]]);
    *offset = end;
    Ok(value)
}

fn read_string(buf: &[u8], offset: &mut usize) -> ProtocolResult<String> {
    let len = read_u16(buf, offset, "metadata entry length")? as usize;
    let end = *offset + len;
    if buf.len() < end {
        return Err(ProtocolError::message_too_small(end, buf.len(), "metadata entry"));
    }

    let s = std::str::from_utf8(&buf[*offset..end]).map_err(|e| ProtocolError::InvalidMetadata {
        offset: *offset,
        reason: e.to_string(),
    })?;
    *offset = end;
    Ok(s.to_string())
}
