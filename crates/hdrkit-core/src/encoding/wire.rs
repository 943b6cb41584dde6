//! The network-order wire format.
//!
//! A header is always written in canonical form. The optional preamble is
//! the four magic bytes `8E AD E8 01` followed by four reserved zero bytes;
//! the framing after it is big-endian throughout, including every `INT16`,
//! `INT32` and `INT64` element of the payload.
//!
//! # Example
//!
//! ```
//! use hdrkit_core::encoding::wire::{read_header, write_header, Preamble};
//! use hdrkit_core::Header;
//!
//! let mut header = Header::new();
//! header.add(1000, "bash").unwrap();
//! header.add(1003, 42i32).unwrap();
//!
//! let mut bytes = Vec::new();
//! write_header(&header, &mut bytes, Preamble::WithMagic).unwrap();
//! assert_eq!(bytes.len(), header.wire_size(Preamble::WithMagic).unwrap());
//!
//! let loaded = read_header(&mut bytes.as_slice(), Preamble::WithMagic).unwrap();
//! assert_eq!(loaded, header.canonicalize().unwrap());
//! ```

use std::io::{Read, Write};

use tracing::debug;

use super::layout::{self, ByteOrder};
use crate::error::{HeaderError, HeaderResult};
use crate::store::Header;

/// The four bytes that open a header written with a preamble.
pub const HEADER_MAGIC: [u8; 4] = [0x8e, 0xad, 0xe8, 0x01];

/// Whether a wire header carries the magic preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preamble {
    /// Magic bytes plus four reserved bytes precede the framing.
    #[default]
    WithMagic,
    /// The framing starts immediately.
    Bare,
}

impl Preamble {
    /// Number of bytes the preamble occupies.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::WithMagic => HEADER_MAGIC.len() + 4,
            Self::Bare => 0,
        }
    }
}

/// Write `header` to `writer` in canonical wire form.
///
/// # Errors
///
/// Returns [`HeaderError::Io`] if the writer fails, or
/// [`HeaderError::Encoding`] if the header cannot be canonicalized or is
/// larger than [`read_header`] accepts. Nothing is written on error.
pub fn write_header(header: &Header, writer: &mut impl Write, preamble: Preamble) -> HeaderResult<()> {
    let bytes = header.to_wire_bytes(preamble)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Read one wire header from `reader`.
///
/// Reading stops right after the payload, so several headers may be read
/// back to back from one stream. The reserved preamble bytes are not
/// checked.
///
/// # Errors
///
/// - [`HeaderError::BadMagic`] if the preamble does not match
/// - [`HeaderError::Truncated`] if the stream ends early
/// - [`HeaderError::UnsupportedType`] or [`HeaderError::InvalidCount`] for
///   a bad index record
/// - [`HeaderError::Encoding`] for out-of-range, misaligned, overlapping or
///   unterminated entries and for sizes over the loading limits
pub fn read_header(reader: &mut impl Read, preamble: Preamble) -> HeaderResult<Header> {
    if preamble == Preamble::WithMagic {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic).map_err(|e| HeaderError::from_read(e, "magic"))?;
        if magic != HEADER_MAGIC {
            return Err(HeaderError::BadMagic { found: magic });
        }
        let mut reserved = [0u8; 4];
        reader.read_exact(&mut reserved).map_err(|e| HeaderError::from_read(e, "magic"))?;
    }

    let header = layout::read_body(reader, ByteOrder::Network)?;
    debug!(entries = header.len(), payload = header.payload_len(), "read wire header");
    Ok(header)
}

impl Header {
    /// Encode the canonical form of this header in wire format.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::Encoding`] if the header cannot be canonicalized,
    /// or holds more than [`MAX_INDEX_ENTRIES`](super::MAX_INDEX_ENTRIES)
    /// entries or [`MAX_PAYLOAD_LEN`](super::MAX_PAYLOAD_LEN) payload bytes.
    pub fn to_wire_bytes(&self, preamble: Preamble) -> HeaderResult<Vec<u8>> {
        let canonical = self.canonicalize()?;
        let mut out = Vec::with_capacity(preamble.size() + layout::body_size(&canonical));
        if preamble == Preamble::WithMagic {
            out.extend_from_slice(&HEADER_MAGIC);
            out.extend_from_slice(&[0; 4]);
        }
        layout::encode_body(&canonical, ByteOrder::Network, &mut out)?;
        debug!(entries = canonical.len(), bytes = out.len(), "encoded wire header");
        Ok(out)
    }

    /// Decode a wire header that spans exactly `bytes`.
    ///
    /// # Errors
    ///
    /// As [`read_header`], plus [`HeaderError::Encoding`] if bytes remain
    /// after the payload.
    pub fn from_wire_bytes(bytes: &[u8], preamble: Preamble) -> HeaderResult<Self> {
        let mut rest = bytes;
        let header = read_header(&mut rest, preamble)?;
        layout::ensure_consumed(rest)?;
        Ok(header)
    }

    /// Number of bytes [`write_header`] would produce for this header.
    ///
    /// Computed on the canonical form, whose payload padding may differ
    /// from the current one.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::Encoding`] if the header cannot be canonicalized.
    pub fn wire_size(&self, preamble: Preamble) -> HeaderResult<usize> {
        let canonical = self.canonicalize()?;
        Ok(preamble.size() + layout::body_size(&canonical))
    }
}
