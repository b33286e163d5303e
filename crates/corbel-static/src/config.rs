//! Build configuration.
//!
//! All configuration is an explicit value constructed once and passed by
//! reference through the build. There is no process-wide settings state.

use std::path::PathBuf;

/// An external command invocation: program plus fixed leading arguments.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Program name or path
    pub program: String,

    /// Arguments passed before any per-call arguments
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

/// Configuration for building a documentation site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Project root folder
    pub root: PathBuf,

    /// Output folder for the built site
    pub output_dir: PathBuf,

    /// Markdown-to-HTML converter; the input file is appended as the last
    /// argument and the fragment is read from stdout
    pub markdown_command: CommandSpec,

    /// JS documentation generator; its config file is appended via `-c`
    pub jsdoc_command: CommandSpec,

    /// CDN stylesheets downloaded into `css/`
    pub css_libs: Vec<String>,

    /// CDN scripts downloaded into `js/`
    pub js_libs: Vec<String>,
}

impl SiteConfig {
    /// Configuration rooted at `root` with all defaults.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let output_dir = root.join("gh-pages");
        Self {
            root,
            output_dir,
            markdown_command: default_markdown_command(),
            jsdoc_command: default_jsdoc_command(),
            css_libs: default_css_libs(),
            js_libs: default_js_libs(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::for_root(".")
    }
}

/// GitHub-flavored Markdown with hard line breaks disabled.
pub fn default_markdown_command() -> CommandSpec {
    CommandSpec::new(
        "pandoc",
        vec![
            "--from=gfm-hard_line_breaks".to_string(),
            "--to=html".to_string(),
        ],
    )
}

pub fn default_jsdoc_command() -> CommandSpec {
    CommandSpec::new("jsdoc", Vec::new())
}

pub fn default_css_libs() -> Vec<String> {
    vec!["https://maxcdn.bootstrapcdn.com/bootstrap/3.3.4/css/bootstrap.min.css".to_string()]
}

pub fn default_js_libs() -> Vec<String> {
    vec![
        "https://maxcdn.bootstrapcdn.com/bootstrap/3.3.4/js/bootstrap.min.js".to_string(),
        "https://cdnjs.cloudflare.com/ajax/libs/html5shiv/3.7.2/html5shiv.min.js".to_string(),
        "https://cdnjs.cloudflare.com/ajax/libs/respond.js/1.4.2/respond.min.js".to_string(),
        "https://cdnjs.cloudflare.com/ajax/libs/require.js/2.1.10/require.min.js".to_string(),
        "https://cdnjs.cloudflare.com/ajax/libs/jquery/2.0.3/jquery.min.js".to_string(),
    ]
}

/// Input and output folders derived from a [`SiteConfig`].
#[derive(Debug, Clone)]
pub struct SitePaths {
    pub root: PathBuf,
    pub in_images: PathBuf,
    pub in_doc: PathBuf,
    pub in_templates: PathBuf,
    pub in_jsdoc: PathBuf,
    pub out: PathBuf,
    pub out_doc: PathBuf,
    pub out_jsdoc: PathBuf,
    pub out_images: PathBuf,
    pub out_js: PathBuf,
    pub out_css: PathBuf,
}

impl SitePaths {
    pub fn new(config: &SiteConfig) -> Self {
        let root = config.root.clone();
        let in_doc = root.join("doc");
        let out = config.output_dir.clone();
        Self {
            in_images: root.join("images"),
            in_templates: in_doc.join("nbconvert"),
            in_jsdoc: root.join("jsdoc"),
            in_doc,
            out_doc: out.join("doc"),
            out_jsdoc: out.join("jsdoc"),
            out_images: out.join("images"),
            out_js: out.join("js"),
            out_css: out.join("css"),
            out,
            root,
        }
    }

    /// The navigation manifest consumed by the build.
    pub fn manifest_file(&self) -> PathBuf {
        self.in_doc.join("navbar.json")
    }

    /// The JS-documentation generator config file.
    pub fn jsdoc_conf(&self) -> PathBuf {
        self.in_jsdoc.join("conf.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn derives_folders_from_root() {
        let config = SiteConfig::for_root("/project");
        let paths = SitePaths::new(&config);

        assert_eq!(paths.in_doc, Path::new("/project/doc"));
        assert_eq!(paths.in_templates, Path::new("/project/doc/nbconvert"));
        assert_eq!(paths.out, Path::new("/project/gh-pages"));
        assert_eq!(paths.out_doc, Path::new("/project/gh-pages/doc"));
        assert_eq!(paths.manifest_file(), Path::new("/project/doc/navbar.json"));
    }

    #[test]
    fn output_dir_override_is_respected() {
        let mut config = SiteConfig::for_root("/project");
        config.output_dir = PathBuf::from("/tmp/site");
        let paths = SitePaths::new(&config);

        assert_eq!(paths.out_css, Path::new("/tmp/site/css"));
        assert_eq!(paths.in_doc, Path::new("/project/doc"));
    }
}
