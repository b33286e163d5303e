//! Site build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use corbel_static::{config, CommandSpec, SiteBuilder, SiteConfig};

/// Configuration file structure (corbel.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    site: SiteSection,
    #[serde(default)]
    markdown: Option<CommandSection>,
    #[serde(default)]
    jsdoc: Option<CommandSection>,
    #[serde(default)]
    libs: LibsSection,
}

#[derive(Debug, Deserialize)]
struct SiteSection {
    #[serde(default = "default_root")]
    root: String,
    #[serde(default = "default_output")]
    output: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            output: default_output(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CommandSection {
    program: String,
    #[serde(default)]
    args: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct LibsSection {
    /// CDN stylesheets; defaults to the bundled list
    css: Option<Vec<String>>,
    /// CDN scripts; defaults to the bundled list
    js: Option<Vec<String>>,
}

fn default_root() -> String {
    ".".to_string()
}
fn default_output() -> String {
    "gh-pages".to_string()
}

/// Load configuration from corbel.toml if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

fn to_command_spec(section: Option<CommandSection>, default: CommandSpec) -> CommandSpec {
    match section {
        Some(section) => CommandSpec::new(section.program, section.args),
        None => default,
    }
}

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, offline: bool) -> Result<()> {
    tracing::info!("Building documentation site...");

    let file_config = load_config(config_path)?;

    let root = PathBuf::from(&file_config.site.root);
    let site_config = SiteConfig {
        output_dir: output.unwrap_or_else(|| root.join(&file_config.site.output)),
        root,
        markdown_command: to_command_spec(
            file_config.markdown,
            config::default_markdown_command(),
        ),
        jsdoc_command: to_command_spec(file_config.jsdoc, config::default_jsdoc_command()),
        css_libs: file_config
            .libs
            .css
            .unwrap_or_else(config::default_css_libs),
        js_libs: file_config.libs.js.unwrap_or_else(config::default_js_libs),
    };

    let result = SiteBuilder::new(site_config).build(offline).await?;

    tracing::info!(
        "Built {} pages in {}ms",
        result.pages,
        result.duration_ms
    );

    if !offline && !result.assets_downloaded {
        tracing::warn!("CDN assets are missing from the output");
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: ConfigFile = toml::from_str(
            r#"
            [site]
            root = "/project"
            output = "site"

            [markdown]
            program = "pandoc"
            args = ["--to=html"]

            [libs]
            css = ["https://cdn.example.com/a.css"]
            "#,
        )
        .unwrap();

        assert_eq!(config.site.root, "/project");
        assert_eq!(config.site.output, "site");
        assert_eq!(config.markdown.as_ref().unwrap().program, "pandoc");
        assert_eq!(config.libs.css.as_ref().unwrap().len(), 1);
        assert!(config.libs.js.is_none());
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: ConfigFile = toml::from_str("").unwrap();

        assert_eq!(config.site.root, ".");
        assert_eq!(config.site.output, "gh-pages");
        assert!(config.markdown.is_none());
        assert!(config.jsdoc.is_none());
    }
}
