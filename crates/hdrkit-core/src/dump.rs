//! Human-readable dump of a header's index and, optionally, its values.
//!
//! ```text
//! Entry count: 2
//! Data count : 12
//!
//!              CT  TAG                  TYPE               OFFSET     COUNT
//! Entry      : 000 (1000)NAME           STRING             0x00000000 00000001
//!        Data: 000 bash
//! Entry      : 001 (1003)EPOCH          INT32              0x00000008 00000001
//!        Data: 000 0x0000002a (42)
//! ```
//!
//! Records are listed in index order, so an unsorted header dumps in
//! insertion order.

use std::collections::HashMap;
use std::io::Write;

use crate::error::HeaderResult;
use crate::store::{Header, IndexEntry};
use crate::types::{Data, Tag};

/// Number of bytes shown per row of a `BIN` value.
const BIN_ROW: usize = 8;

/// Options for [`dump`].
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// Print each entry's decoded values under its index line.
    pub inline: bool,
    /// Display names for tags; unnamed tags show as `(unknown)`.
    pub tag_names: HashMap<Tag, String>,
}

impl DumpOptions {
    /// Enable or disable inline values.
    #[must_use]
    pub const fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Use `names` to label tags.
    #[must_use]
    pub fn with_tag_names(mut self, names: HashMap<Tag, String>) -> Self {
        self.tag_names = names;
        self
    }
}

/// Write a dump of `header` to `out`.
///
/// # Errors
///
/// Returns [`HeaderError::Io`](crate::HeaderError::Io) if writing fails,
/// or [`HeaderError::Encoding`](crate::HeaderError::Encoding) if an inline
/// value cannot be decoded.
pub fn dump(header: &Header, out: &mut impl Write, options: &DumpOptions) -> HeaderResult<()> {
    writeln!(out, "Entry count: {}", header.len())?;
    writeln!(out, "Data count : {}", header.payload_len())?;
    writeln!(out)?;
    writeln!(
        out,
        "             CT  TAG                  TYPE               OFFSET     COUNT"
    )?;

    for (i, record) in header.index().iter().enumerate() {
        let name = options.tag_names.get(&record.tag()).map_or("(unknown)", String::as_str);
        writeln!(
            out,
            "Entry      : {i:03} ({}){name:<14} {:<18} 0x{:08x} {:08}",
            record.tag(),
            record.tag_type().to_string(),
            record.offset(),
            record.count()
        )?;
        if options.inline {
            dump_values(header, record, out)?;
        }
    }
    Ok(())
}

fn dump_values(header: &Header, record: &IndexEntry, out: &mut impl Write) -> HeaderResult<()> {
    let raw = record.raw_bytes(header.payload())?;
    let data = Data::decode(record.tag_type(), record.count() as usize, raw)?;

    match &data {
        Data::Null => {}
        Data::Int8(v) => {
            for (ct, x) in v.iter().enumerate() {
                writeln!(out, "       Data: {ct:03} 0x{x:02x} ({x})")?;
            }
        }
        Data::Int16(v) => {
            for (ct, x) in v.iter().enumerate() {
                writeln!(out, "       Data: {ct:03} 0x{x:04x} ({x})")?;
            }
        }
        Data::Int32(v) => {
            for (ct, x) in v.iter().enumerate() {
                writeln!(out, "       Data: {ct:03} 0x{x:08x} ({x})")?;
            }
        }
        Data::Int64(v) => {
            for (ct, x) in v.iter().enumerate() {
                writeln!(out, "       Data: {ct:03} 0x{x:016x} ({x})")?;
            }
        }
        Data::Bin(bytes) => {
            for (row, chunk) in bytes.chunks(BIN_ROW).enumerate() {
                write!(out, "       Data: {:03} ", row * BIN_ROW)?;
                for b in chunk {
                    write!(out, "{b:02x} ")?;
                }
                writeln!(out)?;
            }
        }
        Data::Char(bytes) => {
            for (ct, b) in bytes.iter().enumerate() {
                let glyph = if b.is_ascii_graphic() { char::from(*b) } else { ' ' };
                writeln!(out, "       Data: {ct:03} 0x{b:02x} {glyph} ({})", i8::from_ne_bytes([*b]))?;
            }
        }
        Data::String(_) | Data::StringArray(_) => {
            for (ct, s) in data.to_strings().unwrap_or_default().iter().enumerate() {
                writeln!(out, "       Data: {ct:03} {s}")?;
            }
        }
    }
    Ok(())
}
