//! hdrkit Core
//!
//! An in-memory store of tagged, typed, counted values (a *header*) with a
//! canonical big-endian wire format and a host-order blob format.
//!
//! # Overview
//!
//! - **Types**: [`Tag`] keys, the [`TagType`] table and [`Data`] values
//! - **Store**: [`Header`] with append, lookup, in-place update and
//!   iteration; [`Header::canonicalize`] sorts it by tag
//! - **Encoding**: [`encoding::wire`] and [`encoding::blob`]
//! - **Dump**: [`dump::dump`] prints a header for inspection
//!
//! # Example
//!
//! ```
//! use hdrkit_core::encoding::Preamble;
//! use hdrkit_core::{Data, Header, TagType};
//!
//! let mut header = Header::new();
//! header.add(1000, "bash").unwrap();
//! header.add(1001, "5.2").unwrap();
//! header.add_entry(1009, TagType::Int32, Data::Int32(vec![1_048_576]), 1).unwrap();
//! header.add(1027, vec!["/bin/bash", "/bin/sh"]).unwrap();
//!
//! // Strings come back as lists, whatever they were stored as.
//! let name = header.get_entry(1000).unwrap().unwrap();
//! assert_eq!(name.tag_type, TagType::StringArray);
//! assert_eq!(header.get_string(1000).unwrap(), Some("bash"));
//!
//! let bytes = header.to_wire_bytes(Preamble::WithMagic).unwrap();
//! let loaded = Header::from_wire_bytes(&bytes, Preamble::WithMagic).unwrap();
//! assert_eq!(loaded.len(), 4);
//! assert!(loaded.is_sorted());
//! ```
//!
//! # Modules
//!
//! - [`types`] - Tags, data types and values
//! - [`store`] - The header store and canonicalization
//! - [`encoding`] - Wire and blob formats
//! - [`dump`] - Text dump
//! - [`error`] - Error types ([`HeaderError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod dump;
pub mod encoding;
pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use dump::DumpOptions;
pub use encoding::Preamble;
pub use error::{HeaderError, HeaderResult};
pub use store::{Entry, Header, HeaderConfig, HeaderIter, IndexEntry};
pub use types::{Data, Tag, TagType};
