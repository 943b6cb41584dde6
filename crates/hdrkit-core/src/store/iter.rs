//! Iteration over header entries.

use std::iter::FusedIterator;
use std::slice;

use super::entry::{Entry, IndexEntry};
use crate::error::HeaderResult;

/// Iterator over the entries of a [`Header`](crate::Header), in index order.
///
/// Yields each entry decoded, with the same string normalization as
/// [`Header::get_entry`](crate::Header::get_entry). Iterating never mutates
/// the header.
#[derive(Debug, Clone)]
pub struct HeaderIter<'a> {
    records: slice::Iter<'a, IndexEntry>,
    payload: &'a [u8],
}

impl<'a> HeaderIter<'a> {
    pub(crate) fn new(index: &'a [IndexEntry], payload: &'a [u8]) -> Self {
        Self { records: index.iter(), payload }
    }
}

impl<'a> Iterator for HeaderIter<'a> {
    type Item = HeaderResult<Entry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(Entry::decode(record, self.payload))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for HeaderIter<'_> {}

impl FusedIterator for HeaderIter<'_> {}
