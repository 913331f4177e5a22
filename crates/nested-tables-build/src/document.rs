//! TOML data documents.
//!
//! ```toml
//! [table]                        # optional
//! title = "Prison population"
//! structure = ["row", "column"]  # absent: pick the least ugly layout
//! placeholder = "-"
//!
//! [data]
//! a = { x = 1, y = 2 }
//! b = { x = 3, z = 4 }
//! ```
//!
//! Keys keep document order.

use std::path::Path;

use nested_tables::{Data, RenderOptions, Structure, Table};
use serde::Deserialize;

use crate::{BuildError, Result};

/// A parsed data document.
#[derive(Debug, Clone)]
pub struct TableDocument {
    /// Page heading, if any.
    pub title: Option<String>,
    /// Explicit layout; `None` means search for the optimal one.
    pub structure: Option<Structure>,
    pub options: RenderOptions,
    pub data: Data,
}

/// Raw TOML structure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    #[serde(default)]
    table: RawTableSection,
    data: Data,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTableSection {
    title: Option<String>,
    structure: Option<Structure>,
    placeholder: Option<String>,
}

impl TableDocument {
    /// Parse from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parse from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let raw: RawDocument = toml::from_str(content)?;

        if raw.data.is_empty() {
            return Err(BuildError::Invalid("[data] has no entries".into()));
        }

        if let Some(structure) = &raw.table.structure {
            let depth = raw.data.depth();
            if structure.len() != depth {
                return Err(BuildError::Invalid(format!(
                    "structure {} has {} axes but [data] is {} levels deep",
                    structure,
                    structure.len(),
                    depth
                )));
            }
        }

        let options = match raw.table.placeholder {
            Some(placeholder) => RenderOptions { placeholder },
            None => RenderOptions::default(),
        };

        Ok(Self {
            title: raw.table.title,
            structure: raw.table.structure,
            options,
            data: raw.data,
        })
    }

    /// The table this document asks for: its explicit structure, or the
    /// least ugly one.
    pub fn build(&self) -> Result<Table> {
        let table = match &self.structure {
            Some(structure) => nested_tables::build_table(&self.data, structure.clone())?,
            None => nested_tables::build_optimal_table(&self.data)?,
        };
        Ok(table)
    }
}
