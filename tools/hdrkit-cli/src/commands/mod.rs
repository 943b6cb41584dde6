//! Command implementations.

pub mod convert;
pub mod dump;
pub mod get;
pub mod info;

use std::path::Path;

use hdrkit_core::encoding::blob;
use hdrkit_core::{Header, Preamble};
use tracing::debug;

use crate::error::{CliError, Result};

/// How input files are encoded.
#[derive(Debug, Clone, Copy)]
pub struct InputOptions {
    /// Input is a host-order blob.
    pub blob: bool,
    /// Preamble of wire input.
    pub preamble: Preamble,
}

/// Load the header stored in `path`.
pub fn load_header(path: &Path, input: &InputOptions) -> Result<Header> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), blob = input.blob, "loading header");

    let header = if input.blob {
        blob::unpack(&bytes)?
    } else {
        Header::from_wire_bytes(&bytes, input.preamble)?
    };
    Ok(header)
}
