//! The header store.
//!
//! A [`Header`] owns two buffers: an index of [`IndexEntry`] records and a
//! payload of encoded values the records point into. Entries are only ever
//! appended; the index is kept in insertion order until the header is
//! [canonicalized](Header::canonicalize), which produces a new header sorted
//! by tag with its payload laid out in the same order.
//!
//! # Lookups
//!
//! [`Header::find_entry`] binary-searches the index while the header is
//! known to be sorted and falls back to a linear scan otherwise. When
//! several entries share a tag, which of them is returned is unspecified:
//! the two strategies may pick different ones.
//!
//! # Example
//!
//! ```
//! use hdrkit_core::{Data, Header, TagType};
//!
//! let mut header = Header::new();
//! header.add_entry(1000, TagType::String, Data::String("bash"), 1).unwrap();
//! header.add_entry(1003, TagType::Int32, Data::Int32(vec![42]), 1).unwrap();
//! header.add(1001, vec!["a", "b"]).unwrap();
//!
//! let entry = header.get_entry(1003).unwrap().unwrap();
//! assert_eq!(entry.data, Data::Int32(vec![42]));
//!
//! header.modify_entry(1003, TagType::Int32, Data::Int32(vec![7])).unwrap();
//! assert_eq!(header.get_entry(1003).unwrap().unwrap().data, Data::Int32(vec![7]));
//!
//! let sorted = header.canonicalize().unwrap();
//! let tags: Vec<i32> = sorted.index().iter().map(|e| e.tag().as_i32()).collect();
//! assert_eq!(tags, [1000, 1001, 1003]);
//! ```

mod canonical;
mod config;
mod entry;
mod iter;

pub use config::{HeaderConfig, DEFAULT_DATA_BLOCK, DEFAULT_INDEX_BLOCK};
pub use entry::{Entry, IndexEntry};
pub use iter::HeaderIter;

use tracing::warn;

use crate::error::{HeaderError, HeaderResult};
use crate::types::{Data, Tag, TagType};

use config::reserve_blocks;

/// An in-memory store of tagged, typed, counted entries.
///
/// Values handed out by lookups borrow from the header, so the borrow
/// checker guarantees they are gone before the header is mutated or dropped.
#[derive(Debug, Clone)]
pub struct Header {
    index: Vec<IndexEntry>,
    payload: Vec<u8>,
    fully_sorted: bool,
    config: HeaderConfig,
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.payload == other.payload
            && self.fully_sorted == other.fully_sorted
    }
}

impl Eq for Header {}

impl Header {
    /// Create an empty header with the default growth configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HeaderConfig::default())
    }

    /// Create an empty header with the given growth configuration.
    #[must_use]
    pub fn with_config(config: HeaderConfig) -> Self {
        let mut header = Self { index: Vec::new(), payload: Vec::new(), fully_sorted: true, config };
        reserve_blocks(&mut header.index, 1, config.index_block);
        reserve_blocks(&mut header.payload, 1, config.data_block);
        header
    }

    /// Builds a header from an index and payload read from external bytes.
    ///
    /// Every record is checked against the payload: ranges must be in
    /// bounds, wide integers aligned, strings terminated and UTF-8, and no
    /// two entries may overlap. The header is marked sorted when its index
    /// is in tag order.
    pub(crate) fn from_parts(index: Vec<IndexEntry>, payload: Vec<u8>) -> HeaderResult<Self> {
        let mut spans = Vec::with_capacity(index.len());
        for record in &index {
            let offset = record.offset as usize;
            if offset % record.tag_type.alignment() != 0 {
                return Err(HeaderError::Encoding(format!(
                    "tag {} ({}) is misaligned at offset {offset}",
                    record.tag, record.tag_type
                )));
            }
            let raw = record.raw_bytes(&payload)?;
            if record.tag_type.is_string() {
                Data::decode(record.tag_type, record.count as usize, raw)?;
            }
            spans.push((offset, offset + raw.len()));
        }
        spans.sort_unstable();
        if spans.windows(2).any(|pair| pair[1].0 < pair[0].1) {
            return Err(HeaderError::Encoding("entries overlap in the payload".to_owned()));
        }

        let fully_sorted = index.windows(2).all(|pair| pair[0].tag <= pair[1].tag);
        if !fully_sorted {
            warn!(entries = index.len(), "loaded header is not sorted by tag; lookups will scan");
        }
        Ok(Self { index, payload, fully_sorted, config: HeaderConfig::default() })
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the header holds no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of payload bytes in use, padding included.
    #[inline]
    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Returns true while the index is sorted by tag and lookups may
    /// binary-search it.
    #[inline]
    #[must_use]
    pub const fn is_sorted(&self) -> bool {
        self.fully_sorted
    }

    /// The index records, in index order.
    #[inline]
    #[must_use]
    pub fn index(&self) -> &[IndexEntry] {
        &self.index
    }

    /// The raw payload, in host byte order.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The growth configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &HeaderConfig {
        &self.config
    }

    /// Append an entry.
    ///
    /// `data` must fit `tag_type` and hold exactly `count` elements (`Null`
    /// takes any count). `STRING` entries must have a count of 1; use
    /// `STRING_ARRAY` for lists. Wide integers are padded to their
    /// alignment. The header is no longer considered sorted afterwards.
    ///
    /// # Errors
    ///
    /// - [`HeaderError::InvalidCount`] for a zero count, a `STRING` count
    ///   other than 1, or a count that differs from the data's length
    /// - [`HeaderError::TypeMismatch`] if `data` cannot be stored as `tag_type`
    /// - [`HeaderError::Encoding`] for strings with interior NUL bytes or
    ///   a payload that would outgrow 32-bit offsets
    ///
    /// The header is unchanged when an error is returned.
    pub fn add_entry(
        &mut self,
        tag: impl Into<Tag>,
        tag_type: TagType,
        data: Data<'_>,
        count: usize,
    ) -> HeaderResult<()> {
        let tag = tag.into();
        let invalid_count = || HeaderError::InvalidCount { tag_type, count };

        if count < 1 {
            return Err(invalid_count());
        }
        if !data.fits(tag_type) {
            return Err(HeaderError::type_mismatch(tag, tag_type, data.natural_type()));
        }
        if tag_type == TagType::String && count != 1 {
            return Err(invalid_count());
        }
        if data.element_count().is_some_and(|n| n != count) {
            return Err(invalid_count());
        }
        data.check_strings()?;
        let count = u32::try_from(count).map_err(|_| invalid_count())?;

        self.push_encoded(tag, tag_type, count, data.encoded_len(), |out| data.encode_into(out))
    }

    /// Append `data` under its natural type and element count.
    ///
    /// # Errors
    ///
    /// As [`add_entry`](Self::add_entry); empty lists are rejected with
    /// [`HeaderError::InvalidCount`].
    pub fn add<'d>(&mut self, tag: impl Into<Tag>, data: impl Into<Data<'d>>) -> HeaderResult<()> {
        let data = data.into();
        let count = data.element_count().unwrap_or(1);
        self.add_entry(tag, data.natural_type(), data, count)
    }

    /// The append path shared by [`add_entry`](Self::add_entry) and
    /// canonicalization: pads, grows both buffers, writes `len` bytes
    /// through `write` and records the entry.
    pub(crate) fn push_encoded(
        &mut self,
        tag: Tag,
        tag_type: TagType,
        count: u32,
        len: usize,
        write: impl FnOnce(&mut [u8]),
    ) -> HeaderResult<()> {
        let offset = self.payload.len() + tag_type.padding_at(self.payload.len());
        let end = offset
            .checked_add(len)
            .filter(|end| u32::try_from(*end).is_ok())
            .ok_or_else(|| HeaderError::Encoding("payload exceeds 32-bit offsets".to_owned()))?;
        let offset32 = u32::try_from(offset)
            .map_err(|_| HeaderError::Encoding("payload exceeds 32-bit offsets".to_owned()))?;

        let records = self.index.len() + 1;
        reserve_blocks(&mut self.index, records, self.config.index_block);
        reserve_blocks(&mut self.payload, end, self.config.data_block);

        self.payload.resize(end, 0);
        write(&mut self.payload[offset..end]);
        self.index.push(IndexEntry { tag, tag_type, offset: offset32, count });
        self.fully_sorted = false;
        Ok(())
    }

    /// Overwrite a single-element entry in place.
    ///
    /// Only entries of a fixed-width type with a count of 1 can be
    /// modified, and only with one element of the same type. The entry's
    /// offset, length and count never change, so no buffer is resized.
    ///
    /// # Errors
    ///
    /// - [`HeaderError::NotFound`] if no entry has `tag`
    /// - [`HeaderError::TypeMismatch`] if the type differs, either count is
    ///   not 1, or the type is not a fixed-width one
    pub fn modify_entry(
        &mut self,
        tag: impl Into<Tag>,
        tag_type: TagType,
        data: Data<'_>,
    ) -> HeaderResult<()> {
        let tag = tag.into();
        let record = *self.find_entry(tag).ok_or(HeaderError::NotFound(tag))?;

        if record.tag_type != tag_type {
            return Err(HeaderError::type_mismatch(tag, record.tag_type, tag_type));
        }
        if !tag_type.is_scalar_updatable() {
            return Err(HeaderError::type_mismatch(tag, "a fixed-width type", tag_type));
        }
        if record.count != 1 {
            return Err(HeaderError::type_mismatch(
                tag,
                "a stored count of 1",
                format!("stored count {}", record.count),
            ));
        }
        if data.natural_type() != tag_type || data.element_count() != Some(1) {
            return Err(HeaderError::type_mismatch(
                tag,
                format!("one {tag_type} element"),
                format!("{} x{}", data.natural_type(), data.element_count().unwrap_or(0)),
            ));
        }

        let start = record.offset as usize;
        let slot = self.payload.get_mut(start..start + data.encoded_len()).ok_or_else(|| {
            HeaderError::Encoding(format!("tag {tag} points outside the payload"))
        })?;
        data.encode_into(slot);
        Ok(())
    }

    /// Locate the index record for `tag`.
    ///
    /// Binary search while sorted, otherwise the first match of a linear
    /// scan. With duplicated tags the returned record is unspecified.
    #[must_use]
    pub fn find_entry(&self, tag: impl Into<Tag>) -> Option<&IndexEntry> {
        let tag = tag.into();
        if self.fully_sorted {
            self.index
                .binary_search_by(|record| record.tag.cmp(&tag))
                .ok()
                .and_then(|i| self.index.get(i))
        } else {
            self.index.iter().find(|record| record.tag == tag)
        }
    }

    /// Returns true if an entry with `tag` exists.
    #[must_use]
    pub fn is_entry(&self, tag: impl Into<Tag>) -> bool {
        self.find_entry(tag).is_some()
    }

    /// Decode the entry for `tag`.
    ///
    /// Returns `Ok(None)` if the tag is absent. String entries come back
    /// normalized to `STRING_ARRAY` (see [`Entry`]).
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::Encoding`] if the stored bytes cannot be decoded.
    pub fn get_entry(&self, tag: impl Into<Tag>) -> HeaderResult<Option<Entry<'_>>> {
        self.find_entry(tag).map(|record| Entry::decode(record, &self.payload)).transpose()
    }

    /// The single string stored under `tag`, if the entry holds exactly one.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::Encoding`] if the stored bytes cannot be decoded.
    pub fn get_string(&self, tag: impl Into<Tag>) -> HeaderResult<Option<&str>> {
        Ok(self.get_entry(tag)?.and_then(|entry| entry.data.as_str()))
    }

    /// Iterate over the entries in index order.
    #[must_use]
    pub fn iter(&self) -> HeaderIter<'_> {
        HeaderIter::new(&self.index, &self.payload)
    }
}

impl<'a> IntoIterator for &'a Header {
    type Item = HeaderResult<Entry<'a>>;
    type IntoIter = HeaderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_header_is_empty_and_sorted() {
        let header = Header::new();
        assert!(header.is_empty());
        assert!(header.is_sorted());
        assert_eq!(header.payload_len(), 0);
        assert!(header.find_entry(1).is_none());
    }

    #[test]
    fn add_then_get() {
        let mut header = Header::new();
        header.add_entry(7, TagType::Int32, Data::Int32(vec![42]), 1).unwrap();
        let entry = header.get_entry(7).unwrap().unwrap();
        assert_eq!(entry.tag_type, TagType::Int32);
        assert_eq!(entry.count, 1);
        assert_eq!(entry.data, Data::Int32(vec![42]));
        assert!(!header.is_sorted());
    }

    #[test]
    fn zero_count_is_rejected() {
        let mut header = Header::new();
        let err = header.add_entry(1, TagType::Int32, Data::Int32(vec![]), 0).unwrap_err();
        assert!(matches!(err, HeaderError::InvalidCount { count: 0, .. }));
        assert!(header.is_empty());
        assert!(header.is_sorted());
    }

    #[test]
    fn count_must_match_data() {
        let mut header = Header::new();
        let err = header.add_entry(1, TagType::Int16, Data::Int16(vec![1, 2]), 3).unwrap_err();
        assert!(matches!(err, HeaderError::InvalidCount { count: 3, .. }));
        assert!(header.is_empty());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let mut header = Header::new();
        let err = header.add_entry(1, TagType::Int64, Data::Int32(vec![1]), 1).unwrap_err();
        assert!(matches!(err, HeaderError::TypeMismatch { .. }));
    }

    #[test]
    fn null_entries_take_any_count_and_no_bytes() {
        let mut header = Header::new();
        header.add_entry(3, TagType::Null, Data::Null, 5).unwrap();
        assert_eq!(header.payload_len(), 0);
        let entry = header.get_entry(3).unwrap().unwrap();
        assert_eq!(entry.data, Data::Null);
        assert_eq!(entry.count, 5);
    }

    #[test]
    fn wide_integers_are_padded() {
        let mut header = Header::new();
        header.add(1, Data::Char(b"x")).unwrap();
        header.add(2, 5i64).unwrap();
        header.add(3, Data::Bin(b"abc")).unwrap();
        header.add(4, 9i16).unwrap();
        header.add(5, 1i32).unwrap();

        let offsets: Vec<u32> = header.index().iter().map(IndexEntry::offset).collect();
        assert_eq!(offsets, [0, 8, 16, 20, 24]);
        assert_eq!(header.payload_len(), 28);
        assert_eq!(&header.payload()[1..8], &[0; 7]);
    }

    #[test]
    fn buffers_grow_and_keep_existing_bytes() {
        let config = HeaderConfig::default().with_index_block(1).with_data_block(2);
        let mut header = Header::with_config(config);
        for i in 0..50 {
            header.add(i, Data::Int32(vec![i; 3])).unwrap();
        }
        assert_eq!(header.len(), 50);
        for i in 0..50 {
            assert_eq!(header.get_entry(i).unwrap().unwrap().data, Data::Int32(vec![i; 3]));
        }
    }

    #[test]
    fn interior_nul_leaves_header_untouched() {
        let mut header = Header::new();
        header.add(1, "ok").unwrap();
        let before = header.clone();
        assert!(header.add(2, "bad\0string").is_err());
        assert_eq!(header, before);
    }

    #[test]
    fn modify_overwrites_in_place() {
        let mut header = Header::new();
        header.add(1, "name").unwrap();
        header.add(2, 10i32).unwrap();
        header.add(3, 20i16).unwrap();
        let offsets: Vec<u32> = header.index().iter().map(IndexEntry::offset).collect();

        header.modify_entry(2, TagType::Int32, Data::Int32(vec![-99])).unwrap();

        assert_eq!(header.get_entry(2).unwrap().unwrap().data, Data::Int32(vec![-99]));
        assert_eq!(header.get_entry(3).unwrap().unwrap().data, Data::Int16(vec![20]));
        let after: Vec<u32> = header.index().iter().map(IndexEntry::offset).collect();
        assert_eq!(offsets, after);
    }

    #[test]
    fn modify_failures() {
        let mut header = Header::new();
        header.add(1, "name").unwrap();
        header.add(2, vec![1i32, 2]).unwrap();
        header.add(3, 5i32).unwrap();

        assert!(matches!(
            header.modify_entry(9, TagType::Int32, Data::Int32(vec![1])),
            Err(HeaderError::NotFound(_))
        ));
        assert!(matches!(
            header.modify_entry(3, TagType::Int16, Data::Int16(vec![1])),
            Err(HeaderError::TypeMismatch { .. })
        ));
        assert!(matches!(
            header.modify_entry(2, TagType::Int32, Data::Int32(vec![1])),
            Err(HeaderError::TypeMismatch { .. })
        ));
        assert!(matches!(
            header.modify_entry(3, TagType::Int32, Data::Int32(vec![1, 2])),
            Err(HeaderError::TypeMismatch { .. })
        ));
        assert!(matches!(
            header.modify_entry(1, TagType::String, Data::String("next")),
            Err(HeaderError::TypeMismatch { .. })
        ));
        assert_eq!(header.get_entry(3).unwrap().unwrap().data, Data::Int32(vec![5]));
    }

    #[test]
    fn unsorted_lookup_returns_first_match() {
        let mut header = Header::new();
        header.add(5, 1i32).unwrap();
        header.add(5, 2i32).unwrap();
        header.add(1, 3i32).unwrap();
        assert_eq!(header.get_entry(5).unwrap().unwrap().data, Data::Int32(vec![1]));
        assert!(header.is_entry(1));
        assert!(!header.is_entry(2));
    }

    #[test]
    fn get_string_and_absent_tags() {
        let mut header = Header::new();
        header.add(1, "solo").unwrap();
        header.add(2, vec!["a", "b"]).unwrap();
        assert_eq!(header.get_string(1).unwrap(), Some("solo"));
        assert_eq!(header.get_string(2).unwrap(), None);
        assert!(header.get_entry(3).unwrap().is_none());
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut header = Header::new();
        header.add(3, 1i32).unwrap();
        header.add(1, "x").unwrap();
        let tags: Vec<i32> = header.iter().map(|e| e.unwrap().tag.as_i32()).collect();
        assert_eq!(tags, [3, 1]);
        let again: Vec<_> = (&header).into_iter().collect::<HeaderResult<_>>().unwrap();
        assert_eq!(again.len(), 2);
    }
}
