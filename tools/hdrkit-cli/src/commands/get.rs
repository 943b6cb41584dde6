//! Get command implementation.

use std::path::Path;

use hdrkit_core::{HeaderError, Tag};

use crate::commands::{load_header, InputOptions};
use crate::config::TagNames;
use crate::error::Result;
use crate::output::{entry_to_json, format_data, format_entry_table, EntryRow};
use crate::OutputFormat;

/// Run the get command - prints the value stored under `tag`.
pub fn run(
    path: &Path,
    input: &InputOptions,
    names: &TagNames,
    tag: i32,
    format: OutputFormat,
) -> Result<()> {
    let header = load_header(path, input)?;
    let tag = Tag::new(tag);
    let entry = header.get_entry(tag)?.ok_or(HeaderError::NotFound(tag))?;

    match format {
        OutputFormat::Table => {
            println!("{}", format_entry_table(vec![EntryRow::new(&entry, names)]));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entry_to_json(&entry, names))?);
        }
        OutputFormat::Compact => {
            println!("{}", format_data(&entry.data, None));
        }
    }

    Ok(())
}
