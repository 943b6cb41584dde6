//! Entry tags.

use std::fmt;

use serde::Serialize;

/// Caller-defined key of a header entry.
///
/// The store never interprets a tag; it only orders tags by signed integer
/// comparison when canonicalizing and searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Tag(i32);

impl Tag {
    /// Create a new `Tag` from a raw i32 value.
    #[must_use]
    pub const fn new(tag: i32) -> Self {
        Self(tag)
    }

    /// Get the raw i32 value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl From<i32> for Tag {
    fn from(tag: i32) -> Self {
        Self::new(tag)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
