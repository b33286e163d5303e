//! Notebook cells.

use serde::{Deserialize, Deserializer, Serialize};

/// The kind of a notebook cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Code,
    Markdown,
    Raw,
}

/// A single notebook cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// Cell kind
    pub cell_type: CellType,

    /// Cell source, normalized to one string
    #[serde(deserialize_with = "source_to_string")]
    pub source: String,

    /// Cell metadata (opaque)
    #[serde(default)]
    pub metadata: serde_json::Value,

    /// Execution outputs for code cells (opaque)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<serde_json::Value>,
}

impl Cell {
    /// Create a markdown cell from a source string.
    pub fn markdown(source: impl Into<String>) -> Self {
        Self {
            cell_type: CellType::Markdown,
            source: source.into(),
            metadata: serde_json::Value::Null,
            outputs: Vec::new(),
        }
    }

    /// Create a code cell from a source string.
    pub fn code(source: impl Into<String>) -> Self {
        Self {
            cell_type: CellType::Code,
            source: source.into(),
            metadata: serde_json::Value::Null,
            outputs: Vec::new(),
        }
    }
}

/// nbformat stores cell sources either as a single string or as a list of
/// lines (each keeping its trailing newline). Accept both.
fn source_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Source {
        Joined(String),
        Lines(Vec<String>),
    }

    Ok(match Source::deserialize(deserializer)? {
        Source::Joined(s) => s,
        Source::Lines(lines) => lines.concat(),
    })
}
