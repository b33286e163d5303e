//! Site navigation manifest.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// The static navigation manifest (`navbar.json`).
///
/// Maps pin down which documents appear in the site navigation and where
/// their source files live. `BTreeMap` keeps iteration lexicographic, so
/// the build order is deterministic; Features and Tutorials display keys
/// carry a fixed-width ordering prefix for the same reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavManifest {
    #[serde(rename = "Installation")]
    pub installation: String,

    #[serde(rename = "Usage")]
    pub usage: String,

    /// Display name (with ordering prefix) to source file
    #[serde(rename = "Features", default)]
    pub features: BTreeMap<String, String>,

    /// Author to {display name to source file}
    #[serde(rename = "Tutorials", default)]
    pub tutorials: BTreeMap<String, BTreeMap<String, String>>,
}

/// Errors that can occur when loading the manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest: {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse manifest: {path}: {message}")]
    Parse { path: String, message: String },
}

impl NavManifest {
    /// Load the manifest from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|e| ManifestError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ManifestError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Expand the manifest into ordered (title, source file) pairs for the
    /// doc folder: Installation, Usage, then Features, then Tutorials with
    /// titles of the form "author: title".
    pub fn doc_pages(&self) -> Vec<(String, String)> {
        let mut pages = vec![
            ("Installation".to_string(), self.installation.clone()),
            ("Usage".to_string(), self.usage.clone()),
        ];

        for (title, file) in &self.features {
            pages.push((strip_order_prefix(title).to_string(), file.clone()));
        }

        for (author, tutorials) in &self.tutorials {
            for (title, file) in tutorials {
                pages.push((
                    format!("{}: {}", author, strip_order_prefix(title)),
                    file.clone(),
                ));
            }
        }

        pages
    }
}

/// Features and Tutorials display keys carry a 4-character ordering prefix
/// ("01: Graphics" sorts before "02: Plotting"); the rendered title drops it.
fn strip_order_prefix(title: &str) -> &str {
    title
        .char_indices()
        .nth(4)
        .map(|(i, _)| &title[i..])
        .unwrap_or("")
}
