//! Notebook documents.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::cell::Cell;

/// A structured notebook document (nbformat 4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    /// Notebook-level metadata (opaque)
    #[serde(default)]
    pub metadata: serde_json::Value,

    /// Major format version
    #[serde(default = "default_nbformat")]
    pub nbformat: u32,

    /// Minor format version
    #[serde(default)]
    pub nbformat_minor: u32,

    /// Ordered cells
    #[serde(default)]
    pub cells: Vec<Cell>,
}

fn default_nbformat() -> u32 {
    4
}

/// Errors that can occur when loading a notebook.
#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    #[error("Failed to read notebook: {path}: {message}")]
    Read { path: String, message: String },

    #[error("Malformed notebook: {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Unsupported notebook format version {version}: {path}")]
    UnsupportedFormat { path: String, version: u32 },
}

impl Notebook {
    /// The empty placeholder document: empty metadata, no cells.
    ///
    /// Used when page content comes from a pre-rendered fragment instead of
    /// notebook cells, and for stylesheet-only rendering.
    pub fn empty() -> Self {
        Self {
            metadata: json!({}),
            nbformat: 4,
            nbformat_minor: 5,
            cells: Vec::new(),
        }
    }

    /// Load a notebook from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, NotebookError> {
        let content = fs::read_to_string(path).map_err(|e| NotebookError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let notebook: Notebook =
            serde_json::from_str(&content).map_err(|e| NotebookError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        if notebook.nbformat != 4 {
            return Err(NotebookError::UnsupportedFormat {
                path: path.display().to_string(),
                version: notebook.nbformat,
            });
        }

        Ok(notebook)
    }
}
