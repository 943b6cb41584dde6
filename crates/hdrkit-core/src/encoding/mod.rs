//! Byte encodings of a [`Header`](crate::Header).
//!
//! Two formats share one framing (see [`layout`]):
//!
//! - [`wire`] - big-endian, optionally preceded by the magic preamble; the
//!   portable on-disk and network form
//! - [`blob`] - the same framing in host byte order, for exchange within
//!   one machine
//!
//! Both always encode the canonical form of a header and validate every
//! record when loading, so a header that loads is safe to query.

pub mod blob;
pub mod layout;
pub mod wire;


pub use layout::{INDEX_ENTRY_SIZE, MAX_INDEX_ENTRIES, MAX_PAYLOAD_LEN};
pub use wire::{read_header, write_header, Preamble, HEADER_MAGIC};
