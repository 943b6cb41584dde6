//! Output formatting utilities.

use hdrkit_core::{Data, Entry};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::TagNames;

/// Values longer than this many elements are elided in tables.
const MAX_TABLE_ELEMENTS: usize = 8;

/// A simple key-value row for displaying info.
#[derive(Tabled)]
pub struct InfoRow {
    #[tabled(rename = "Property")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Format an info table with key-value pairs.
pub fn format_info_table(rows: Vec<InfoRow>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// One header entry as a table row.
#[derive(Tabled)]
pub struct EntryRow {
    #[tabled(rename = "Tag")]
    pub tag: i32,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub tag_type: String,
    #[tabled(rename = "Count")]
    pub count: usize,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl EntryRow {
    /// Build a row for `entry`, naming its tag from `names`.
    pub fn new(entry: &Entry<'_>, names: &TagNames) -> Self {
        Self {
            tag: entry.tag.as_i32(),
            name: names.get(entry.tag).unwrap_or_default().to_string(),
            tag_type: entry.tag_type.to_string(),
            count: entry.count,
            value: format_data(&entry.data, Some(MAX_TABLE_ELEMENTS)),
        }
    }
}

/// Format entry rows as a table.
pub fn format_entry_table(rows: Vec<EntryRow>) -> String {
    let count = rows.len();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{table}\n({count} entries)")
}

/// Format a value for display, eliding lists longer than `limit`.
pub fn format_data(data: &Data<'_>, limit: Option<usize>) -> String {
    fn list<T: ToString>(items: impl ExactSizeIterator<Item = T>, limit: Option<usize>) -> String {
        let len = items.len();
        let shown = limit.unwrap_or(len).min(len);
        let mut parts: Vec<String> = items.take(shown).map(|x| x.to_string()).collect();
        if shown < len {
            parts.push(format!("... ({len} elements)"));
        }
        parts.join(", ")
    }

    match data {
        Data::Null => "NULL".to_string(),
        Data::Char(b) => String::from_utf8_lossy(b).into_owned(),
        Data::Bin(b) => format!("\\x{}", hex::encode(b)),
        Data::Int8(v) => list(v.iter(), limit),
        Data::Int16(v) => list(v.iter(), limit),
        Data::Int32(v) => list(v.iter(), limit),
        Data::Int64(v) => list(v.iter(), limit),
        Data::String(s) => (*s).to_string(),
        Data::StringArray(v) => list(v.iter(), limit),
    }
}

/// Convert a value to a JSON value.
pub fn data_to_json(data: &Data<'_>) -> serde_json::Value {
    use serde_json::Value;

    match data {
        Data::Null => Value::Null,
        Data::Char(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
        Data::Bin(b) => Value::String(hex::encode(b)),
        Data::Int8(v) => serde_json::json!(v),
        Data::Int16(v) => serde_json::json!(v),
        Data::Int32(v) => serde_json::json!(v),
        Data::Int64(v) => serde_json::json!(v),
        Data::String(s) => Value::String((*s).to_string()),
        Data::StringArray(v) => serde_json::json!(v),
    }
}

/// Convert an entry to a JSON object.
pub fn entry_to_json(entry: &Entry<'_>, names: &TagNames) -> serde_json::Value {
    serde_json::json!({
        "tag": entry.tag,
        "name": names.get(entry.tag),
        "type": entry.tag_type,
        "count": entry.count,
        "value": data_to_json(&entry.data),
    })
}

/// Format an entry on one tab-separated line.
pub fn format_entry_compact(entry: &Entry<'_>) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        entry.tag,
        entry.tag_type,
        entry.count,
        format_data(&entry.data, None)
    )
}
