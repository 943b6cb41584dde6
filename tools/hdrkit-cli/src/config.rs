//! Tag-name configuration.
//!
//! Tag names are read from a TOML file with a single `[tags]` table:
//!
//! ```toml
//! [tags]
//! 1000 = "NAME"
//! 1001 = "VERSION"
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use hdrkit_core::Tag;
use serde::Deserialize;

use crate::error::{CliError, Result};

/// On-disk layout of a tag-name file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TagFile {
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

/// Display names for tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagNames {
    names: HashMap<Tag, String>,
}

impl TagNames {
    /// Load tag names from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse tag names from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let file: TagFile = toml::from_str(content)?;
        let mut names = HashMap::with_capacity(file.tags.len());
        for (key, name) in file.tags {
            let tag: i32 = key
                .trim()
                .parse()
                .map_err(|_| CliError::Config(format!("'{key}' is not a tag number")))?;
            if name.trim().is_empty() {
                return Err(CliError::Config(format!("tag {tag} has an empty name")));
            }
            names.insert(Tag::new(tag), name);
        }
        Ok(Self { names })
    }

    /// Name of `tag`, if configured.
    pub fn get(&self, tag: Tag) -> Option<&str> {
        self.names.get(&tag).map(String::as_str)
    }

    /// The name table, as the dump expects it.
    pub fn to_map(&self) -> HashMap<Tag, String> {
        self.names.clone()
    }
}
