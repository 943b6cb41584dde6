//! Dump command implementation.

use std::io::Write;
use std::path::Path;

use hdrkit_core::dump::dump;
use hdrkit_core::DumpOptions;

use crate::commands::{load_header, InputOptions};
use crate::config::TagNames;
use crate::error::Result;
use crate::output::{entry_to_json, format_entry_compact};
use crate::OutputFormat;

/// Run the dump command.
///
/// The table format prints the classic index dump; JSON and compact formats
/// list every decoded entry instead.
pub fn run(
    path: &Path,
    input: &InputOptions,
    names: &TagNames,
    inline: bool,
    format: OutputFormat,
) -> Result<()> {
    let header = load_header(path, input)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Table => {
            let options = DumpOptions::default().with_inline(inline).with_tag_names(names.to_map());
            dump(&header, &mut out, &options)?;
        }
        OutputFormat::Json => {
            let entries = header
                .iter()
                .map(|entry| entry.map(|e| entry_to_json(&e, names)))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            serde_json::to_writer_pretty(&mut out, &entries)?;
            writeln!(out)?;
        }
        OutputFormat::Compact => {
            for entry in &header {
                writeln!(out, "{}", format_entry_compact(&entry?))?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
