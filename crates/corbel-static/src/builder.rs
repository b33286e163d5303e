//! Site build orchestration.
//!
//! The build is fully sequential: prepare folders, copy images, emit CSS,
//! render root and doc pages, run the JS-documentation generator, download
//! CDN assets. Everything up to the downloads is fatal on error; a download
//! failure is caught, logged, and the build is still reported complete,
//! since the site is usable without the bundled assets.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;

use walkdir::WalkDir;

use crate::config::{SiteConfig, SitePaths};
use crate::downloads::{self, DownloadError};
use crate::exporter::{SiteExporters, TemplateVariant};
use crate::manifest::{ManifestError, NavManifest};
use crate::renderer::{self, RenderError, RenderJob};

/// Errors that abort a site build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to prepare output folders: {0}")]
    Folders(String),

    #[error("Failed to copy images: {0}")]
    Images(String),

    #[error("Failed to copy stylesheet: {0}")]
    Styles(String),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("JS documentation generator failed: {0}")]
    Jsdoc(String),
}

/// Result of a completed build.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of HTML pages rendered
    pub pages: usize,

    /// Whether the CDN assets were downloaded
    pub assets_downloaded: bool,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Builds a documentation site from an explicit configuration.
pub struct SiteBuilder {
    config: SiteConfig,
    paths: SitePaths,
}

impl SiteBuilder {
    pub fn new(config: SiteConfig) -> Self {
        let paths = SitePaths::new(&config);
        Self { config, paths }
    }

    /// Run the full build. `offline` skips the CDN downloads.
    pub async fn build(&self, offline: bool) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let navbar = NavManifest::from_path(&self.paths.manifest_file())?;
        let exporters = SiteExporters::new(&self.paths.in_templates);

        self.make_folders()?;
        self.copy_images()?;
        self.build_css(&exporters)?;

        let mut pages = 0;
        pages += self.build_root(&exporters, &navbar)?;
        pages += self.build_doc(&exporters, &navbar)?;

        self.build_jsdoc()?;

        let assets_downloaded = if offline {
            tracing::info!("Offline build, skipping CDN downloads");
            false
        } else {
            match self.download_libs().await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Download failed, site built without bundled assets: {}", e);
                    false
                }
            }
        };

        Ok(BuildResult {
            pages,
            assets_downloaded,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.paths.out.clone(),
        })
    }

    /// Delete any previous output and create the output folder tree.
    fn make_folders(&self) -> Result<(), BuildError> {
        if self.paths.out.exists() {
            fs::remove_dir_all(&self.paths.out).map_err(|e| BuildError::Folders(e.to_string()))?;
        }

        for dir in [
            &self.paths.out,
            &self.paths.out_doc,
            &self.paths.out_jsdoc,
            &self.paths.out_js,
            &self.paths.out_css,
        ] {
            fs::create_dir_all(dir).map_err(|e| BuildError::Folders(e.to_string()))?;
        }

        Ok(())
    }

    fn copy_images(&self) -> Result<(), BuildError> {
        let images_error = |message: String| BuildError::Images(message);

        for entry in WalkDir::new(&self.paths.in_images) {
            let entry = entry.map_err(|e| images_error(e.to_string()))?;
            let relative = entry
                .path()
                .strip_prefix(&self.paths.in_images)
                .map_err(|e| images_error(e.to_string()))?;
            let target = self.paths.out_images.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| images_error(e.to_string()))?;
            } else {
                fs::copy(entry.path(), &target).map_err(|e| {
                    images_error(format!("{}: {}", entry.path().display(), e))
                })?;
            }
        }

        Ok(())
    }

    /// Emit the exporter stylesheet and the hand-written custom stylesheet.
    fn build_css(&self, exporters: &SiteExporters) -> Result<(), BuildError> {
        renderer::render_css(exporters, &self.paths.out_css.join("nb.css"))?;

        let custom = "custom.css";
        fs::copy(
            self.paths.in_templates.join(custom),
            self.paths.out_css.join(custom),
        )
        .map_err(|e| BuildError::Styles(format!("{}: {}", custom, e)))?;

        Ok(())
    }

    fn build_root(
        &self,
        exporters: &SiteExporters,
        navbar: &NavManifest,
    ) -> Result<usize, BuildError> {
        let jobs = [
            RenderJob {
                title: "Overview".to_string(),
                input_path: self.paths.root.join("README.md"),
                output_path: self.paths.out.join("index.html"),
                variant: TemplateVariant::Root,
            },
            RenderJob {
                title: "Contribution guidelines".to_string(),
                input_path: self.paths.root.join("CONTRIBUTING.md"),
                output_path: self.paths.out.join("contributing.html"),
                variant: TemplateVariant::Root,
            },
        ];

        for job in &jobs {
            tracing::debug!("Rendering {}", job.output_path.display());
            renderer::render(exporters, job, navbar, &self.config.markdown_command)?;
        }

        Ok(jobs.len())
    }

    fn build_doc(
        &self,
        exporters: &SiteExporters,
        navbar: &NavManifest,
    ) -> Result<usize, BuildError> {
        let pages = navbar.doc_pages();

        for (title, file) in &pages {
            let job = RenderJob {
                title: title.clone(),
                input_path: self.paths.in_doc.join(file),
                output_path: self.paths.out_doc.join(format!("{}.html", file)),
                variant: TemplateVariant::Doc,
            };

            tracing::debug!("Rendering {}", job.output_path.display());
            renderer::render(exporters, &job, navbar, &self.config.markdown_command)?;
        }

        Ok(pages.len())
    }

    /// Invoke the external JS-documentation generator. Skipped with a
    /// warning when no generator config exists; a non-zero exit is fatal.
    fn build_jsdoc(&self) -> Result<(), BuildError> {
        let conf = self.paths.jsdoc_conf();
        if !conf.exists() {
            tracing::warn!(
                "No generator config at {}, skipping API documentation",
                conf.display()
            );
            return Ok(());
        }

        let command = &self.config.jsdoc_command;
        let status = Command::new(&command.program)
            .args(&command.args)
            .arg("-c")
            .arg(&conf)
            .status()
            .map_err(|e| BuildError::Jsdoc(format!("{}: {}", command.program, e)))?;

        if !status.success() {
            return Err(BuildError::Jsdoc(format!(
                "{} exited with {}",
                command.program, status
            )));
        }

        Ok(())
    }

    async fn download_libs(&self) -> Result<(), DownloadError> {
        let client = downloads::client()?;
        downloads::download_all(&client, &self.config.css_libs, &self.paths.out_css).await?;
        downloads::download_all(&client, &self.config.js_libs, &self.paths.out_js).await?;
        Ok(())
    }
}
