//! Canonical form: index sorted by tag, payload laid out in the same order.

use tracing::debug;

use super::Header;
use crate::error::HeaderResult;

impl Header {
    /// Build a canonical copy of this header.
    ///
    /// The index is stably sorted by tag (entries sharing a tag keep their
    /// relative order) and every entry is re-appended to a fresh header
    /// through the same path as [`add_entry`](Self::add_entry), so the new
    /// payload follows tag order with no stale bytes. Stored types are kept
    /// as they are. The result is marked sorted; `self` is not modified.
    ///
    /// Canonicalizing twice yields the same header as canonicalizing once.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::Encoding`](crate::HeaderError::Encoding) if an
    /// entry's bytes cannot be located in the payload.
    pub fn canonicalize(&self) -> HeaderResult<Self> {
        let mut order: Vec<_> = self.index.iter().collect();
        order.sort_by_key(|record| record.tag);

        let mut sorted = Self::with_config(self.config);
        for record in order {
            let raw = record.raw_bytes(&self.payload)?;
            sorted.push_encoded(record.tag, record.tag_type, record.count, raw.len(), |out| {
                out.copy_from_slice(raw);
            })?;
        }
        sorted.fully_sorted = true;

        debug!(
            entries = sorted.len(),
            payload_before = self.payload_len(),
            payload_after = sorted.payload_len(),
            "canonicalized header"
        );
        Ok(sorted)
    }
}
