//! Data types of header entries and their per-element layout rules.
//!
//! Every operation that needs to know how big an element is, how it must be
//! aligned, or whether it is byte-order sensitive consults [`TYPE_TABLE`]
//! through [`TagType::info`].
//!
//! | Type | Raw | Element size | Alignment |
//! |------|-----|--------------|-----------|
//! | `NULL` | 0 | 0 | 1 |
//! | `CHAR` | 1 | 1 | 1 |
//! | `INT8` | 2 | 1 | 1 |
//! | `INT16` | 3 | 2 | 2 |
//! | `INT32` | 4 | 4 | 4 |
//! | `INT64` | 5 | 8 | 8 |
//! | `STRING` | 6 | variable | 1 |
//! | `BIN` | 7 | 1 | 1 |
//! | `STRING_ARRAY` | 8 | variable | 1 |

use std::fmt;

use serde::Serialize;

use crate::error::HeaderError;

/// Layout description of one data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    /// Display name.
    pub name: &'static str,
    /// Size of one element in bytes, `None` for NUL-terminated string types.
    pub element_size: Option<usize>,
    /// Required alignment of the first element within the payload.
    pub alignment: usize,
}

/// Layout table indexed by the raw type number.
pub static TYPE_TABLE: [TypeInfo; 9] = [
    TypeInfo { name: "NULL", element_size: Some(0), alignment: 1 },
    TypeInfo { name: "CHAR", element_size: Some(1), alignment: 1 },
    TypeInfo { name: "INT8", element_size: Some(1), alignment: 1 },
    TypeInfo { name: "INT16", element_size: Some(2), alignment: 2 },
    TypeInfo { name: "INT32", element_size: Some(4), alignment: 4 },
    TypeInfo { name: "INT64", element_size: Some(8), alignment: 8 },
    TypeInfo { name: "STRING", element_size: None, alignment: 1 },
    TypeInfo { name: "BIN", element_size: Some(1), alignment: 1 },
    TypeInfo { name: "STRING_ARRAY", element_size: None, alignment: 1 },
];

/// The data type of a header entry.
///
/// The discriminants are the type numbers used by the wire and blob formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum TagType {
    /// No payload.
    Null = 0,
    /// Raw characters.
    Char = 1,
    /// Signed 8-bit integers.
    Int8 = 2,
    /// Signed 16-bit integers.
    Int16 = 3,
    /// Signed 32-bit integers.
    Int32 = 4,
    /// Signed 64-bit integers.
    Int64 = 5,
    /// A single NUL-terminated string. Count is always 1.
    String = 6,
    /// Opaque binary data.
    Bin = 7,
    /// `count` NUL-terminated strings stored back to back.
    StringArray = 8,
}

impl TagType {
    /// All supported types, in raw-number order.
    pub const ALL: [Self; 9] = [
        Self::Null,
        Self::Char,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::String,
        Self::Bin,
        Self::StringArray,
    ];

    /// The raw type number.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// The layout row for this type.
    #[inline]
    #[must_use]
    pub fn info(self) -> &'static TypeInfo {
        &TYPE_TABLE[self as usize]
    }

    /// Size of one element, or `None` for string types.
    #[inline]
    #[must_use]
    pub fn element_size(self) -> Option<usize> {
        self.info().element_size
    }

    /// Required alignment of the entry's first byte.
    #[inline]
    #[must_use]
    pub fn alignment(self) -> usize {
        self.info().alignment
    }

    /// Returns true for `STRING` and `STRING_ARRAY`.
    #[inline]
    #[must_use]
    pub fn is_string(self) -> bool {
        self.info().element_size.is_none()
    }

    /// Returns true for types whose elements change with byte order.
    #[inline]
    #[must_use]
    pub fn is_byte_order_sensitive(self) -> bool {
        matches!(self.info().element_size, Some(size) if size > 1)
    }

    /// Returns true for types whose single-element entries can be
    /// overwritten in place.
    #[inline]
    #[must_use]
    pub fn is_scalar_updatable(self) -> bool {
        matches!(self.info().element_size, Some(size) if size > 0)
    }

    /// Number of padding bytes needed before an entry that would otherwise
    /// start at `offset`.
    #[inline]
    #[must_use]
    pub fn padding_at(self, offset: usize) -> usize {
        let align = self.alignment();
        (align - offset % align) % align
    }

    /// Byte length of `count` fixed-width elements, `None` for string types
    /// or on overflow.
    #[must_use]
    pub fn fixed_len(self, count: usize) -> Option<usize> {
        self.element_size().and_then(|size| size.checked_mul(count))
    }

    /// Converts every element of `bytes` between host and network byte order.
    ///
    /// The conversion is its own inverse. Byte-sized and string data is left
    /// untouched. `bytes` must hold a whole number of elements.
    pub fn convert_byte_order(self, bytes: &mut [u8]) {
        if !self.is_byte_order_sensitive() || cfg!(target_endian = "big") {
            return;
        }
        if let Some(width) = self.element_size() {
            bytes.chunks_exact_mut(width).for_each(<[u8]>::reverse);
        }
    }
}

impl TryFrom<u32> for TagType {
    type Error = HeaderError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        usize::try_from(raw)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(HeaderError::UnsupportedType(raw))
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}
