//! Index records and decoded entries.

use crate::error::{HeaderError, HeaderResult};
use crate::types::{encoded_len_in, Data, Tag, TagType};

/// One record of a header's index: where an entry's bytes live in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexEntry {
    pub(crate) tag: Tag,
    pub(crate) tag_type: TagType,
    pub(crate) offset: u32,
    pub(crate) count: u32,
}

impl IndexEntry {
    /// The entry's tag.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> Tag {
        self.tag
    }

    /// The type the entry was stored with.
    #[inline]
    #[must_use]
    pub const fn tag_type(&self) -> TagType {
        self.tag_type
    }

    /// Byte offset of the entry's first element within the payload.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// Number of elements.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// The entry's bytes within `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::Encoding`] if the record points outside
    /// `payload` or at an unterminated string.
    pub fn raw_bytes<'a>(&self, payload: &'a [u8]) -> HeaderResult<&'a [u8]> {
        let start = self.offset as usize;
        let tail = payload.get(start..).ok_or_else(|| {
            HeaderError::Encoding(format!(
                "tag {} offset {start} is past the end of the {}-byte payload",
                self.tag,
                payload.len()
            ))
        })?;
        let len = encoded_len_in(self.tag_type, self.count as usize, tail)?;
        Ok(&tail[..len])
    }
}

/// A decoded entry, borrowing from the header it came from.
///
/// String entries are reported with type [`TagType::StringArray`] and a
/// list value, even when they were stored as a single [`TagType::String`];
/// compare string types through this normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<'a> {
    /// The entry's tag.
    pub tag: Tag,
    /// The effective type of `data`.
    pub tag_type: TagType,
    /// The stored element count.
    pub count: usize,
    /// The decoded value.
    pub data: Data<'a>,
}

impl<'a> Entry<'a> {
    pub(crate) fn decode(record: &IndexEntry, payload: &'a [u8]) -> HeaderResult<Self> {
        let raw = record.raw_bytes(payload)?;
        let count = record.count as usize;
        let (tag_type, data) = match Data::decode(record.tag_type, count, raw)? {
            Data::String(s) => (TagType::StringArray, Data::StringArray(vec![s])),
            data => (data.natural_type(), data),
        };
        Ok(Self { tag: record.tag, tag_type, count, data })
    }
}
