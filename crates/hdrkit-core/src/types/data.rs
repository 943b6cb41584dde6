//! Typed entry values and their payload encoding.
//!
//! [`Data`] is both what callers hand to [`Header::add_entry`] and what
//! lookups hand back. On the way out, byte and string variants borrow from
//! the header's payload, so they stay valid exactly as long as the header is
//! not mutated or dropped.
//!
//! In memory, fixed-width integers are laid out in host byte order; strings
//! are NUL-terminated and concatenated.
//!
//! # Example
//!
//! ```
//! use hdrkit_core::{Data, TagType};
//!
//! let version: Data = 42i32.into();
//! assert_eq!(version.natural_type(), TagType::Int32);
//! assert_eq!(version.encoded_len(), 4);
//!
//! let files = Data::from(vec!["/bin/sh", "/bin/ls"]);
//! assert_eq!(files.encoded_len(), 16);
//! ```
//!
//! [`Header::add_entry`]: crate::Header::add_entry

use crate::error::{HeaderError, HeaderResult};
use crate::types::TagType;

/// The value of a header entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Data<'a> {
    /// No payload.
    Null,
    /// Raw characters.
    Char(&'a [u8]),
    /// Signed bytes.
    Int8(Vec<i8>),
    /// 16-bit integers.
    Int16(Vec<i16>),
    /// 32-bit integers.
    Int32(Vec<i32>),
    /// 64-bit integers.
    Int64(Vec<i64>),
    /// A single string.
    String(&'a str),
    /// Opaque binary data.
    Bin(&'a [u8]),
    /// A list of strings.
    StringArray(Vec<&'a str>),
}

impl<'a> Data<'a> {
    /// The type this value is stored as when no other type is requested.
    #[must_use]
    pub const fn natural_type(&self) -> TagType {
        match self {
            Self::Null => TagType::Null,
            Self::Char(_) => TagType::Char,
            Self::Int8(_) => TagType::Int8,
            Self::Int16(_) => TagType::Int16,
            Self::Int32(_) => TagType::Int32,
            Self::Int64(_) => TagType::Int64,
            Self::String(_) => TagType::String,
            Self::Bin(_) => TagType::Bin,
            Self::StringArray(_) => TagType::StringArray,
        }
    }

    /// Number of elements held, or `None` for `Null`, which carries no
    /// elements regardless of its declared count.
    #[must_use]
    pub fn element_count(&self) -> Option<usize> {
        match self {
            Self::Null => None,
            Self::Char(b) | Self::Bin(b) => Some(b.len()),
            Self::Int8(v) => Some(v.len()),
            Self::Int16(v) => Some(v.len()),
            Self::Int32(v) => Some(v.len()),
            Self::Int64(v) => Some(v.len()),
            Self::String(_) => Some(1),
            Self::StringArray(v) => Some(v.len()),
        }
    }

    /// Returns true if this value may be stored under `tag_type`.
    ///
    /// Besides the natural type, a single string may be declared as a
    /// string array and a string list may be declared as a single string
    /// (the count check then decides whether it fits).
    #[must_use]
    pub fn fits(&self, tag_type: TagType) -> bool {
        let natural = self.natural_type();
        natural == tag_type || (natural.is_string() && tag_type.is_string())
    }

    /// Exact number of payload bytes this value occupies, without padding.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Null => 0,
            Self::Char(b) | Self::Bin(b) => b.len(),
            Self::Int8(v) => v.len(),
            Self::Int16(v) => v.len() * 2,
            Self::Int32(v) => v.len() * 4,
            Self::Int64(v) => v.len() * 8,
            Self::String(s) => s.len() + 1,
            Self::StringArray(v) => v.iter().map(|s| s.len() + 1).sum(),
        }
    }

    /// Rejects strings that cannot be stored NUL-terminated.
    pub(crate) fn check_strings(&self) -> HeaderResult<()> {
        let interior_nul = match self {
            Self::String(s) => s.contains('\0'),
            Self::StringArray(v) => v.iter().any(|s| s.contains('\0')),
            _ => false,
        };
        if interior_nul {
            return Err(HeaderError::Encoding("string contains an interior NUL byte".to_owned()));
        }
        Ok(())
    }

    /// Writes the payload bytes into `out`, which must be exactly
    /// [`encoded_len`](Self::encoded_len) bytes long.
    pub(crate) fn encode_into(&self, out: &mut [u8]) {
        match self {
            Self::Null => {}
            Self::Char(b) | Self::Bin(b) => out.copy_from_slice(b),
            Self::Int8(v) => {
                for (dst, x) in out.iter_mut().zip(v) {
                    *dst = x.to_ne_bytes()[0];
                }
            }
            Self::Int16(v) => write_elements(out, v.iter().map(|x| x.to_ne_bytes())),
            Self::Int32(v) => write_elements(out, v.iter().map(|x| x.to_ne_bytes())),
            Self::Int64(v) => write_elements(out, v.iter().map(|x| x.to_ne_bytes())),
            Self::String(s) => write_strings(out, std::iter::once(*s)),
            Self::StringArray(v) => write_strings(out, v.iter().copied()),
        }
    }

    /// Decodes `count` elements of `tag_type` from the start of `bytes`.
    ///
    /// `bytes` begins at the entry's offset and may run past its end. A
    /// `STRING` entry with a count other than 1 decodes as a string list.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::Encoding`] if the bytes are too short, a string
    /// is unterminated, or a string is not valid UTF-8.
    pub fn decode(tag_type: TagType, count: usize, bytes: &'a [u8]) -> HeaderResult<Self> {
        let len = encoded_len_in(tag_type, count, bytes)?;
        let bytes = &bytes[..len];
        let data = match tag_type {
            TagType::Null => Self::Null,
            TagType::Char => Self::Char(bytes),
            TagType::Bin => Self::Bin(bytes),
            TagType::Int8 => Self::Int8(bytes.iter().map(|b| i8::from_ne_bytes([*b])).collect()),
            TagType::Int16 => Self::Int16(read_elements(bytes, i16::from_ne_bytes)),
            TagType::Int32 => Self::Int32(read_elements(bytes, i32::from_ne_bytes)),
            TagType::Int64 => Self::Int64(read_elements(bytes, i64::from_ne_bytes)),
            TagType::String if count == 1 => {
                let mut strings = split_strings(bytes);
                Self::String(strings.next().transpose()?.unwrap_or_default())
            }
            TagType::String | TagType::StringArray => {
                Self::StringArray(split_strings(bytes).collect::<HeaderResult<_>>()?)
            }
        };
        Ok(data)
    }

    /// Returns the value as a single string, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::String(s) => Some(*s),
            Self::StringArray(v) if v.len() == 1 => v.first().copied(),
            _ => None,
        }
    }

    /// Returns the value as a list of strings; a single string is a list of one.
    #[must_use]
    pub fn to_strings(&self) -> Option<Vec<&'a str>> {
        match self {
            Self::String(s) => Some(vec![*s]),
            Self::StringArray(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Returns the raw bytes of a `CHAR` or `BIN` value.
    #[must_use]
    pub const fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            Self::Char(b) | Self::Bin(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the elements of an `INT32` value.
    #[must_use]
    pub fn as_i32s(&self) -> Option<&[i32]> {
        match self {
            Self::Int32(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the elements of any integer value widened to i64.
    #[must_use]
    pub fn to_i64s(&self) -> Option<Vec<i64>> {
        match self {
            Self::Int8(v) => Some(v.iter().map(|x| i64::from(*x)).collect()),
            Self::Int16(v) => Some(v.iter().map(|x| i64::from(*x)).collect()),
            Self::Int32(v) => Some(v.iter().map(|x| i64::from(*x)).collect()),
            Self::Int64(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// Byte length of an entry of `tag_type` and `count` elements starting at
/// the beginning of `bytes`.
pub(crate) fn encoded_len_in(tag_type: TagType, count: usize, bytes: &[u8]) -> HeaderResult<usize> {
    let len = match tag_type.fixed_len(count) {
        Some(len) => len,
        None if tag_type.is_string() => {
            let mut end = 0;
            for _ in 0..count {
                let nul = bytes[end..]
                    .iter()
                    .position(|b| *b == 0)
                    .ok_or_else(|| HeaderError::Encoding("unterminated string".to_owned()))?;
                end += nul + 1;
            }
            end
        }
        None => return Err(HeaderError::Encoding("entry byte length overflow".to_owned())),
    };
    if len > bytes.len() {
        return Err(HeaderError::Encoding(format!(
            "{tag_type} entry needs {len} bytes, only {} available",
            bytes.len()
        )));
    }
    Ok(len)
}

fn write_elements<const N: usize>(out: &mut [u8], elements: impl Iterator<Item = [u8; N]>) {
    for (dst, src) in out.chunks_exact_mut(N).zip(elements) {
        dst.copy_from_slice(&src);
    }
}

fn read_elements<const N: usize, T>(bytes: &[u8], from_bytes: fn([u8; N]) -> T) -> Vec<T> {
    bytes
        .chunks_exact(N)
        .map(|chunk| {
            let mut raw = [0u8; N];
            raw.copy_from_slice(chunk);
            from_bytes(raw)
        })
        .collect()
}

fn write_strings<'s>(out: &mut [u8], strings: impl Iterator<Item = &'s str>) {
    let mut pos = 0;
    for s in strings {
        out[pos..pos + s.len()].copy_from_slice(s.as_bytes());
        out[pos + s.len()] = 0;
        pos += s.len() + 1;
    }
}

/// Splits NUL-terminated strings; `bytes` must end with a terminator.
fn split_strings(bytes: &[u8]) -> impl Iterator<Item = HeaderResult<&str>> {
    let body = bytes.strip_suffix(&[0u8]).unwrap_or(bytes);
    body.split(|b| *b == 0).map(|s| {
        std::str::from_utf8(s).map_err(|e| HeaderError::Encoding(format!("invalid UTF-8: {e}")))
    })
}

impl<'a> From<&'a str> for Data<'a> {
    fn from(s: &'a str) -> Self {
        Self::String(s)
    }
}

impl<'a> From<Vec<&'a str>> for Data<'a> {
    fn from(v: Vec<&'a str>) -> Self {
        Self::StringArray(v)
    }
}

impl From<i16> for Data<'_> {
    fn from(x: i16) -> Self {
        Self::Int16(vec![x])
    }
}

impl From<i32> for Data<'_> {
    fn from(x: i32) -> Self {
        Self::Int32(vec![x])
    }
}

impl From<i64> for Data<'_> {
    fn from(x: i64) -> Self {
        Self::Int64(vec![x])
    }
}

impl From<Vec<i16>> for Data<'_> {
    fn from(v: Vec<i16>) -> Self {
        Self::Int16(v)
    }
}

impl From<Vec<i32>> for Data<'_> {
    fn from(v: Vec<i32>) -> Self {
        Self::Int32(v)
    }
}

impl From<Vec<i64>> for Data<'_> {
    fn from(v: Vec<i64>) -> Self {
        Self::Int64(v)
    }
}
