//! Convert command implementation.

use std::path::Path;

use hdrkit_core::encoding::blob;
use hdrkit_core::{Header, Preamble};
use tracing::info;

use crate::commands::{load_header, InputOptions};
use crate::error::Result;
use crate::TargetFormat;

/// Run the convert command - re-encodes `input` into `output`.
pub fn run(
    input: &Path,
    options: &InputOptions,
    output: &Path,
    to: TargetFormat,
    magic: bool,
) -> Result<()> {
    let header = load_header(input, options)?;
    let bytes = encode(&header, to, magic)?;
    std::fs::write(output, &bytes)?;

    info!(entries = header.len(), bytes = bytes.len(), "converted header");
    println!("Wrote {} bytes ({} entries) to {}", bytes.len(), header.len(), output.display());
    Ok(())
}

/// Encode `header` in the requested format.
fn encode(header: &Header, to: TargetFormat, magic: bool) -> Result<Vec<u8>> {
    let bytes = match to {
        TargetFormat::Wire => {
            header.to_wire_bytes(if magic { Preamble::WithMagic } else { Preamble::Bare })?
        }
        TargetFormat::Blob => blob::pack(header)?,
    };
    Ok(bytes)
}
