//! Buffer growth configuration.

/// Default number of index records reserved at a time.
pub const DEFAULT_INDEX_BLOCK: usize = 8;

/// Default number of payload bytes reserved at a time.
pub const DEFAULT_DATA_BLOCK: usize = 1024;

/// Configuration for a [`Header`](crate::Header).
///
/// Both buffers of a header grow in whole blocks: when an added entry does
/// not fit, capacity is raised to the next multiple of the block size that
/// holds it. Existing bytes are always preserved. A block size of zero is
/// treated as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderConfig {
    /// Index growth step, in records (default: 8).
    pub index_block: usize,

    /// Payload growth step, in bytes (default: 1024).
    pub data_block: usize,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self { index_block: DEFAULT_INDEX_BLOCK, data_block: DEFAULT_DATA_BLOCK }
    }
}

impl HeaderConfig {
    /// Set the index growth step.
    #[must_use]
    pub const fn with_index_block(mut self, records: usize) -> Self {
        self.index_block = records;
        self
    }

    /// Set the payload growth step.
    #[must_use]
    pub const fn with_data_block(mut self, bytes: usize) -> Self {
        self.data_block = bytes;
        self
    }
}

/// Raises the capacity of `buf` to the smallest multiple of `block` that
/// holds `needed` items. Never shrinks.
pub(crate) fn reserve_blocks<T>(buf: &mut Vec<T>, needed: usize, block: usize) {
    if needed <= buf.capacity() {
        return;
    }
    let block = block.max(1);
    let target = needed.div_ceil(block).saturating_mul(block);
    buf.reserve_exact(target - buf.len());
}
