//! Static site builder for notebook documentation.
//!
//! Renders notebook and Markdown sources through filesystem templates,
//! emits the exporter stylesheet, invokes the external JS-documentation
//! generator, and downloads CDN assets into the output folder.

pub mod builder;
pub mod config;
pub mod downloads;
pub mod exporter;
pub mod manifest;
pub mod renderer;

pub use builder::{BuildError, BuildResult, SiteBuilder};
pub use config::{CommandSpec, SiteConfig, SitePaths};
pub use downloads::DownloadError;
pub use exporter::{Exporter, RenderResources, SiteExporters, TemplateVariant};
pub use manifest::{ManifestError, NavManifest};
pub use renderer::{RenderError, RenderJob};
