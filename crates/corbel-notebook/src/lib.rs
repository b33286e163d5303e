//! Notebook document model for corbel.
//!
//! This crate provides a serde model for the nbformat-4 JSON interchange
//! format: a notebook is ordered cells (code/markdown/raw) plus metadata.
//! Cell sources are normalized to a single string regardless of whether the
//! file stores them as a string or an array of lines.

pub mod cell;
pub mod notebook;

pub use cell::{Cell, CellType};
pub use notebook::{Notebook, NotebookError};
