//! Framing shared by the wire and blob formats.
//!
//! Both formats are the same sequence of 32-bit fields and differ only in
//! byte order:
//!
//! ```text
//! [entry count][payload length][entry count x {tag, type, offset, count}][payload]
//! ```
//!
//! Fixed-width integer elements inside the payload follow the framing's
//! byte order; byte and string data is copied as is.

use std::io::Read;

use crate::error::{HeaderError, HeaderResult};
use crate::store::{Header, IndexEntry};
use crate::types::{Tag, TagType};

/// Size of one encoded index record in bytes.
pub const INDEX_ENTRY_SIZE: usize = 16;

/// Size of the entry count and payload length fields.
pub const COUNTS_SIZE: usize = 8;

/// Largest entry count accepted when loading.
pub const MAX_INDEX_ENTRIES: u32 = 0x0001_0000;

/// Largest payload length accepted when loading (256 MiB).
pub const MAX_PAYLOAD_LEN: u32 = 256 * 1024 * 1024;

/// Byte order of a framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ByteOrder {
    /// Big-endian, used by the wire format.
    Network,
    /// Host order, used by blobs.
    Native,
}

impl ByteOrder {
    fn u32_bytes(self, v: u32) -> [u8; 4] {
        match self {
            Self::Network => v.to_be_bytes(),
            Self::Native => v.to_ne_bytes(),
        }
    }

    fn i32_bytes(self, v: i32) -> [u8; 4] {
        match self {
            Self::Network => v.to_be_bytes(),
            Self::Native => v.to_ne_bytes(),
        }
    }

    fn read_u32(self, raw: [u8; 4]) -> u32 {
        match self {
            Self::Network => u32::from_be_bytes(raw),
            Self::Native => u32::from_ne_bytes(raw),
        }
    }

    fn read_i32(self, raw: [u8; 4]) -> i32 {
        match self {
            Self::Network => i32::from_be_bytes(raw),
            Self::Native => i32::from_ne_bytes(raw),
        }
    }

    /// Converts the integer elements of every entry in `payload` between
    /// host order and this order. Records pointing outside `payload` are
    /// skipped; loading rejects them afterwards.
    fn convert_payload(self, index: &[IndexEntry], payload: &mut [u8]) {
        if self == Self::Native {
            return;
        }
        for record in index {
            let tag_type = record.tag_type();
            if !tag_type.is_byte_order_sensitive() {
                continue;
            }
            let start = record.offset() as usize;
            let span = tag_type
                .fixed_len(record.count() as usize)
                .and_then(|len| start.checked_add(len))
                .and_then(|end| payload.get_mut(start..end));
            if let Some(span) = span {
                tag_type.convert_byte_order(span);
            }
        }
    }
}

/// Size of the framing of `header` without any preamble.
pub(crate) fn body_size(header: &Header) -> usize {
    COUNTS_SIZE + header.len() * INDEX_ENTRY_SIZE + header.payload_len()
}

/// Appends the framing of `header` to `out`. The header is written as is;
/// callers canonicalize first.
pub(crate) fn encode_body(header: &Header, order: ByteOrder, out: &mut Vec<u8>) -> HeaderResult<()> {
    let entries = u32::try_from(header.len())
        .map_err(|_| HeaderError::Encoding("too many entries to encode".to_owned()))?;
    let payload_len = u32::try_from(header.payload_len())
        .map_err(|_| HeaderError::Encoding("payload too large to encode".to_owned()))?;
    check_limits(entries, payload_len)?;

    out.reserve(body_size(header));
    out.extend_from_slice(&order.u32_bytes(entries));
    out.extend_from_slice(&order.u32_bytes(payload_len));
    for record in header.index() {
        out.extend_from_slice(&order.i32_bytes(record.tag().as_i32()));
        out.extend_from_slice(&order.u32_bytes(record.tag_type().as_u32()));
        out.extend_from_slice(&order.u32_bytes(record.offset()));
        out.extend_from_slice(&order.u32_bytes(record.count()));
    }

    let start = out.len();
    out.extend_from_slice(header.payload());
    order.convert_payload(header.index(), &mut out[start..]);
    Ok(())
}

/// Reads one framing from `reader` and validates it into a header.
///
/// Nothing is returned unless every record checks out.
pub(crate) fn read_body(reader: &mut impl Read, order: ByteOrder) -> HeaderResult<Header> {
    let entries = read_u32(reader, order, "entry count")?;
    let payload_len = read_u32(reader, order, "payload length")?;
    check_limits(entries, payload_len)?;

    let mut raw_index = vec![0u8; entries as usize * INDEX_ENTRY_SIZE];
    reader.read_exact(&mut raw_index).map_err(|e| HeaderError::from_read(e, "index"))?;
    let index = raw_index
        .chunks_exact(INDEX_ENTRY_SIZE)
        .map(|raw| decode_record(raw, order))
        .collect::<HeaderResult<Vec<_>>>()?;

    let mut payload = vec![0u8; payload_len as usize];
    reader.read_exact(&mut payload).map_err(|e| HeaderError::from_read(e, "payload"))?;
    order.convert_payload(&index, &mut payload);

    Header::from_parts(index, payload)
}

/// Reads a framing that must span all of `bytes`.
pub(crate) fn decode_exact(bytes: &[u8], order: ByteOrder) -> HeaderResult<Header> {
    let mut rest = bytes;
    let header = read_body(&mut rest, order)?;
    ensure_consumed(rest)?;
    Ok(header)
}

/// Fails if any input is left after a header.
pub(crate) fn ensure_consumed(rest: &[u8]) -> HeaderResult<()> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(HeaderError::Encoding(format!("{} trailing bytes after header", rest.len())))
    }
}

/// Rejects sizes over the loading limits. Applied when encoding as well, so
/// everything written can be read back.
fn check_limits(entries: u32, payload_len: u32) -> HeaderResult<()> {
    if entries > MAX_INDEX_ENTRIES {
        return Err(HeaderError::Encoding(format!(
            "entry count {entries} exceeds the limit of {MAX_INDEX_ENTRIES}"
        )));
    }
    if payload_len > MAX_PAYLOAD_LEN {
        return Err(HeaderError::Encoding(format!(
            "payload length {payload_len} exceeds the limit of {MAX_PAYLOAD_LEN}"
        )));
    }
    Ok(())
}

fn read_u32(reader: &mut impl Read, order: ByteOrder, section: &'static str) -> HeaderResult<u32> {
    let mut raw = [0u8; 4];
    reader.read_exact(&mut raw).map_err(|e| HeaderError::from_read(e, section))?;
    Ok(order.read_u32(raw))
}

fn decode_record(raw: &[u8], order: ByteOrder) -> HeaderResult<IndexEntry> {
    let field = |i: usize| {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&raw[i * 4..i * 4 + 4]);
        bytes
    };
    let tag = Tag::new(order.read_i32(field(0)));
    let tag_type = TagType::try_from(order.read_u32(field(1)))?;
    let offset = order.read_u32(field(2));
    let count = order.read_u32(field(3));
    if count == 0 {
        return Err(HeaderError::InvalidCount { tag_type, count: 0 });
    }
    Ok(IndexEntry { tag, tag_type, offset, count })
}
