//! Host-order blobs for in-process or same-machine exchange.
//!
//! A blob has the wire framing without a preamble, with every field and
//! integer element kept in host byte order. Blobs are not portable between
//! machines of different endianness; use [`wire`](super::wire) for that.
//!
//! # Example
//!
//! ```
//! use hdrkit_core::encoding::blob;
//! use hdrkit_core::Header;
//!
//! let mut header = Header::new();
//! header.add(1004, vec!["summary", "of", "things"]).unwrap();
//!
//! let packed = blob::pack(&header).unwrap();
//! let unpacked = blob::unpack(&packed).unwrap();
//! assert_eq!(unpacked.get_entry(1004).unwrap().unwrap().count, 3);
//! ```

use tracing::debug;

use super::layout::{self, ByteOrder};
use crate::error::HeaderResult;
use crate::store::Header;

/// Pack the canonical form of `header` into a blob.
///
/// # Errors
///
/// Returns [`HeaderError::Encoding`](crate::HeaderError::Encoding) if the
/// header cannot be canonicalized or exceeds the loading limits
/// ([`MAX_INDEX_ENTRIES`](super::MAX_INDEX_ENTRIES),
/// [`MAX_PAYLOAD_LEN`](super::MAX_PAYLOAD_LEN)).
pub fn pack(header: &Header) -> HeaderResult<Vec<u8>> {
    let canonical = header.canonicalize()?;
    let mut out = Vec::new();
    layout::encode_body(&canonical, ByteOrder::Native, &mut out)?;
    debug!(entries = canonical.len(), bytes = out.len(), "packed header blob");
    Ok(out)
}

/// Unpack a blob produced by [`pack`].
///
/// The blob is validated exactly as a wire header is, and must not carry
/// trailing bytes. A blob from [`pack`] always loads as sorted.
///
/// # Errors
///
/// Returns [`HeaderError::Truncated`](crate::HeaderError::Truncated) for a
/// short blob and the other load errors of
/// [`read_header`](super::wire::read_header) for invalid content.
pub fn unpack(bytes: &[u8]) -> HeaderResult<Header> {
    let header = layout::decode_exact(bytes, ByteOrder::Native)?;
    debug!(entries = header.len(), payload = header.payload_len(), "unpacked header blob");
    Ok(header)
}
