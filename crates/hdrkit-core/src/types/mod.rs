//! Core data types of the header store.
//!
//! This module defines the tag key, the data-type table, and the typed
//! values that entries hold.

mod data;
mod kind;
mod tag;

pub use data::Data;
pub(crate) use data::encoded_len_in;
pub use kind::{TagType, TypeInfo, TYPE_TABLE};
pub use tag::Tag;
