//! Error types for the header store and its codecs.

use std::io;

use thiserror::Error;

use crate::types::{Tag, TagType};

/// Result type alias for header operations.
pub type HeaderResult<T> = Result<T, HeaderError>;

/// Errors that can occur while building, querying or (de)serializing a header.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// An entry was added with a count the type cannot hold.
    ///
    /// Raised for `count < 1`, for `String` entries whose count is not 1, and
    /// when the supplied data holds a different number of elements than `count`.
    #[error("invalid count {count} for {tag_type} entry")]
    InvalidCount {
        /// The declared type of the entry.
        tag_type: TagType,
        /// The rejected count.
        count: usize,
    },

    /// A type number outside the supported table.
    ///
    /// This is a contract violation by the producer of the data; hosts may
    /// choose to treat it as fatal.
    #[error("unsupported data type {0}")]
    UnsupportedType(u32),

    /// No entry carries the requested tag.
    #[error("no entry with tag {0}")]
    NotFound(Tag),

    /// The supplied type or shape does not match the stored entry.
    #[error("type mismatch for tag {tag}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The tag being written.
        tag: Tag,
        /// What the store (or the declared type) requires.
        expected: String,
        /// What the caller supplied.
        actual: String,
    },

    /// The stream did not start with the header magic.
    #[error("bad header magic: {found:02x?}")]
    BadMagic {
        /// The four bytes actually read.
        found: [u8; 4],
    },

    /// The input ended before the named section was complete.
    #[error("header truncated while reading {section}")]
    Truncated {
        /// Which part of the layout was being read.
        section: &'static str,
    },

    /// Structurally invalid data: bad offsets, unterminated strings, limits.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// I/O error from the underlying transport.
    #[error("header I/O error: {0}")]
    Io(#[from] io::Error),
}

impl HeaderError {
    /// Creates a type mismatch error from anything displayable.
    #[must_use]
    pub fn type_mismatch(
        tag: Tag,
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        Self::TypeMismatch { tag, expected: expected.to_string(), actual: actual.to_string() }
    }

    /// Maps an I/O error from reading `section`, turning a short read into
    /// [`HeaderError::Truncated`].
    pub(crate) fn from_read(err: io::Error, section: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::Truncated { section }
        } else {
            Self::Io(err)
        }
    }

    /// Returns true if the error means the input bytes are corrupt.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(self, Self::BadMagic { .. } | Self::Truncated { .. } | Self::Encoding(_))
    }

    /// Returns true if the error indicates a caller or producer bug rather
    /// than a recoverable lookup failure.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::UnsupportedType(_) | Self::InvalidCount { .. })
    }
}
