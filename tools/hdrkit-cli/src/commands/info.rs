//! Info command implementation.

use std::path::Path;

use hdrkit_core::Preamble;

use crate::commands::{load_header, InputOptions};
use crate::error::Result;
use crate::output::{format_info_table, InfoRow};
use crate::OutputFormat;

/// Run the info command - displays header statistics.
pub fn run(path: &Path, input: &InputOptions, format: OutputFormat) -> Result<()> {
    let header = load_header(path, input)?;

    let encoding = if input.blob {
        "blob"
    } else if input.preamble == Preamble::WithMagic {
        "wire (magic)"
    } else {
        "wire (bare)"
    };

    let rows = vec![
        InfoRow { key: "Path".to_string(), value: path.display().to_string() },
        InfoRow { key: "Encoding".to_string(), value: encoding.to_string() },
        InfoRow { key: "Entries".to_string(), value: header.len().to_string() },
        InfoRow { key: "Payload Bytes".to_string(), value: header.payload_len().to_string() },
        InfoRow { key: "Sorted".to_string(), value: header.is_sorted().to_string() },
        InfoRow {
            key: "Wire Size".to_string(),
            value: header.wire_size(Preamble::WithMagic)?.to_string(),
        },
        InfoRow {
            key: "Wire Size (bare)".to_string(),
            value: header.wire_size(Preamble::Bare)?.to_string(),
        },
    ];

    match format {
        OutputFormat::Table => {
            println!("{}", format_info_table(rows));
        }
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> =
                rows.into_iter().map(|r| (r.key, serde_json::Value::String(r.value))).collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        OutputFormat::Compact => {
            for row in rows {
                println!("{}\t{}", row.key, row.value);
            }
        }
    }

    Ok(())
}
