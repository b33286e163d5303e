//! Document rendering.
//!
//! One render job turns one input document into one HTML file. Markdown
//! inputs are pre-converted to a fragment by the external converter and
//! injected into the template; everything else is parsed as a notebook and
//! its cells are handed to the template directly. Exactly one of the two
//! supplies the content for a given job.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use corbel_notebook::{Notebook, NotebookError};

use crate::config::CommandSpec;
use crate::exporter::{Exporter, RenderResources, SiteExporters, TemplateVariant};
use crate::manifest::NavManifest;

/// One document to render.
#[derive(Debug, Clone)]
pub struct RenderJob {
    /// Display title passed to the template
    pub title: String,

    /// Source document (notebook or Markdown)
    pub input_path: PathBuf,

    /// HTML file to write
    pub output_path: PathBuf,

    /// Template variant, chosen by the orchestrator
    pub variant: TemplateVariant,
}

/// Errors that can occur while rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Notebook(#[from] NotebookError),

    #[error("Markdown converter failed for {path}: {message}")]
    Converter { path: String, message: String },

    #[error("Failed to render template: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}

/// Render one job to its output file.
///
/// Nothing is written when any stage fails, so a failed job never leaves a
/// partial output file behind.
pub fn render(
    exporters: &SiteExporters,
    job: &RenderJob,
    navbar: &NavManifest,
    converter: &CommandSpec,
) -> Result<(), RenderError> {
    let exporter = exporters.get(job.variant);

    let is_markdown = job
        .input_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md"));

    let html = if is_markdown {
        render_markdown(exporter, job, navbar, converter)?
    } else {
        render_notebook(exporter, job, navbar)?
    };

    write_output(&job.output_path, &html)
}

/// Render the exporter stylesheet to `output_path`.
///
/// Uses the empty placeholder document and no page resources, so the output
/// carries no job-specific text.
pub fn render_css(exporters: &SiteExporters, output_path: &Path) -> Result<(), RenderError> {
    let exporter = exporters.get(TemplateVariant::Css);
    let css = exporter.export(&Notebook::empty(), &RenderResources::default())?;
    write_output(output_path, &css)
}

fn render_notebook(
    exporter: &Exporter,
    job: &RenderJob,
    navbar: &NavManifest,
) -> Result<String, RenderError> {
    let notebook = Notebook::from_path(&job.input_path)?;

    let resources = RenderResources {
        title: Some(job.title.clone()),
        navbar: Some(navbar.clone()),
        md: None,
    };

    Ok(exporter.export(&notebook, &resources)?)
}

fn render_markdown(
    exporter: &Exporter,
    job: &RenderJob,
    navbar: &NavManifest,
    converter: &CommandSpec,
) -> Result<String, RenderError> {
    let fragment = convert_markdown(converter, &job.input_path)?;

    let resources = RenderResources {
        title: Some(job.title.clone()),
        navbar: Some(navbar.clone()),
        md: Some(fragment),
    };

    Ok(exporter.export(&Notebook::empty(), &resources)?)
}

/// Run the external converter on `input`, capturing the HTML fragment from
/// stdout. A non-zero exit aborts the job.
fn convert_markdown(converter: &CommandSpec, input: &Path) -> Result<String, RenderError> {
    let converter_error = |message: String| RenderError::Converter {
        path: input.display().to_string(),
        message,
    };

    let output = Command::new(&converter.program)
        .args(&converter.args)
        .arg(input)
        .output()
        .map_err(|e| converter_error(format!("{}: {}", converter.program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(converter_error(format!(
            "{} exited with {}: {}",
            converter.program,
            output.status,
            stderr.trim()
        )));
    }

    String::from_utf8(output.stdout).map_err(|e| converter_error(e.to_string()))
}

fn write_output(path: &Path, content: &str) -> Result<(), RenderError> {
    let write_error = |message: String| RenderError::Write {
        path: path.display().to_string(),
        message,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
    }

    fs::write(path, content).map_err(|e| write_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, SiteExporters, NavManifest) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("root.html"),
            "<h1>{{ title }}</h1>{% if md %}{{ md }}{% endif %}",
        )
        .unwrap();
        fs::write(
            dir.path().join("doc.html"),
            "{{ title }}|{% for cell in cells %}{{ cell.source }}{% endfor %}",
        )
        .unwrap();
        fs::write(dir.path().join("css.html"), ".nb { display: block; }").unwrap();

        let exporters = SiteExporters::new(dir.path());
        let navbar: NavManifest = serde_json::from_str(
            r#"{"Installation": "install.md", "Usage": "usage.ipynb"}"#,
        )
        .unwrap();

        (dir, exporters, navbar)
    }

    fn cat() -> CommandSpec {
        CommandSpec::new("cat", Vec::new())
    }

    #[test]
    fn renders_markdown_through_converter() {
        let (dir, exporters, navbar) = fixture();
        // The converter emits HTML; the fragment must land in the page
        // unescaped.
        fs::write(dir.path().join("README.md"), "<p>readme <em>body</em></p>").unwrap();

        let job = RenderJob {
            title: "Overview".to_string(),
            input_path: dir.path().join("README.md"),
            output_path: dir.path().join("out/index.html"),
            variant: TemplateVariant::Root,
        };

        render(&exporters, &job, &navbar, &cat()).unwrap();

        let html = fs::read_to_string(&job.output_path).unwrap();
        assert_eq!(html, "<h1>Overview</h1><p>readme <em>body</em></p>");
    }

    #[test]
    fn markdown_rendering_is_deterministic() {
        let (dir, exporters, navbar) = fixture();
        fs::write(dir.path().join("README.md"), "same content").unwrap();

        let job = RenderJob {
            title: "Overview".to_string(),
            input_path: dir.path().join("README.md"),
            output_path: dir.path().join("out/index.html"),
            variant: TemplateVariant::Root,
        };

        render(&exporters, &job, &navbar, &cat()).unwrap();
        let first = fs::read(&job.output_path).unwrap();

        render(&exporters, &job, &navbar, &cat()).unwrap();
        let second = fs::read(&job.output_path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn renders_notebook_cells() {
        let (dir, exporters, navbar) = fixture();
        fs::write(
            dir.path().join("usage.ipynb"),
            r##"{"nbformat": 4, "cells": [
                {"cell_type": "markdown", "source": "# Usage", "metadata": {}}
            ]}"##,
        )
        .unwrap();

        let job = RenderJob {
            title: "Usage".to_string(),
            input_path: dir.path().join("usage.ipynb"),
            output_path: dir.path().join("out/doc/usage.ipynb.html"),
            variant: TemplateVariant::Doc,
        };

        render(&exporters, &job, &navbar, &cat()).unwrap();

        let html = fs::read_to_string(&job.output_path).unwrap();
        assert_eq!(html, "Usage|# Usage");
    }

    #[test]
    fn failed_converter_writes_nothing() {
        let (dir, exporters, navbar) = fixture();
        fs::write(dir.path().join("README.md"), "content").unwrap();

        let job = RenderJob {
            title: "Overview".to_string(),
            input_path: dir.path().join("README.md"),
            output_path: dir.path().join("out/index.html"),
            variant: TemplateVariant::Root,
        };

        let failing = CommandSpec::new("false", Vec::new());
        let err = render(&exporters, &job, &navbar, &failing).unwrap_err();

        assert!(matches!(err, RenderError::Converter { .. }));
        assert!(!job.output_path.exists());
    }

    #[test]
    fn missing_notebook_is_fatal() {
        let (dir, exporters, navbar) = fixture();

        let job = RenderJob {
            title: "Usage".to_string(),
            input_path: dir.path().join("missing.ipynb"),
            output_path: dir.path().join("out/doc/missing.ipynb.html"),
            variant: TemplateVariant::Doc,
        };

        let err = render(&exporters, &job, &navbar, &cat()).unwrap_err();

        assert!(matches!(err, RenderError::Notebook(_)));
        assert!(!job.output_path.exists());
    }

    #[test]
    fn css_output_has_no_job_text() {
        let (dir, exporters, _) = fixture();
        let out = dir.path().join("out/css/nb.css");

        render_css(&exporters, &out).unwrap();

        let css = fs::read_to_string(&out).unwrap();
        assert_eq!(css, ".nb { display: block; }");
    }
}
