//! Template-driven HTML exporter.
//!
//! Each page is produced by one of three templates loaded from the site's
//! template folder. The exporter turns a notebook plus per-call resources
//! into the final text; which template applies is an explicit tag set by
//! the orchestrator, never derived from output paths.

use std::path::Path;

use minijinja::{context, path_loader, AutoEscape, Environment};
use serde::Serialize;

use corbel_notebook::Notebook;

use crate::manifest::NavManifest;

/// Which page template a render job uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateVariant {
    /// Pages at the site root (index, contributing)
    Root,
    /// Pages under `doc/`
    Doc,
    /// Stylesheet-only rendering
    Css,
}

impl TemplateVariant {
    /// The template file requested from the template folder.
    pub fn template_name(self) -> &'static str {
        match self {
            TemplateVariant::Root => "root.html",
            TemplateVariant::Doc => "doc.html",
            TemplateVariant::Css => "css.html",
        }
    }
}

/// Per-call template resources: title, navigation, and an optional
/// pre-rendered Markdown fragment under the `md` key.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderResources {
    pub title: Option<String>,
    pub navbar: Option<NavManifest>,
    pub md: Option<String>,
}

/// A parameterized HTML-from-template exporter.
pub struct Exporter {
    env: Environment<'static>,
    variant: TemplateVariant,
}

impl Exporter {
    /// Create an exporter loading templates from `template_dir`.
    ///
    /// Auto-escaping is off: the `md` fragment and cell sources are injected
    /// as already-rendered HTML, never re-escaped.
    pub fn new(template_dir: &Path, variant: TemplateVariant) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(template_dir));
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env, variant }
    }

    pub fn variant(&self) -> TemplateVariant {
        self.variant
    }

    /// Render the notebook and resources through this exporter's template.
    pub fn export(
        &self,
        notebook: &Notebook,
        resources: &RenderResources,
    ) -> Result<String, minijinja::Error> {
        let template = self.env.get_template(self.variant.template_name())?;

        template.render(context! {
            title => &resources.title,
            navbar => &resources.navbar,
            md => &resources.md,
            cells => &notebook.cells,
            metadata => &notebook.metadata,
        })
    }
}

/// The three exporters a site build uses, sharing one template folder.
pub struct SiteExporters {
    root: Exporter,
    doc: Exporter,
    css: Exporter,
}

impl SiteExporters {
    pub fn new(template_dir: &Path) -> Self {
        Self {
            root: Exporter::new(template_dir, TemplateVariant::Root),
            doc: Exporter::new(template_dir, TemplateVariant::Doc),
            css: Exporter::new(template_dir, TemplateVariant::Css),
        }
    }

    pub fn get(&self, variant: TemplateVariant) -> &Exporter {
        match variant {
            TemplateVariant::Root => &self.root,
            TemplateVariant::Doc => &self.doc,
            TemplateVariant::Css => &self.css,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use corbel_notebook::Cell;

    fn template_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("root.html"),
            "<title>{{ title }}</title>{% if md %}{{ md }}{% else %}\
             {% for cell in cells %}[{{ cell.source }}]{% endfor %}{% endif %}",
        )
        .unwrap();
        fs::write(
            dir.path().join("doc.html"),
            "doc:{{ title }}:{% for cell in cells %}{{ cell.source }}{% endfor %}",
        )
        .unwrap();
        fs::write(dir.path().join("css.html"), "body { margin: 0; }").unwrap();
        dir
    }

    #[test]
    fn variant_selects_template_name() {
        assert_eq!(TemplateVariant::Root.template_name(), "root.html");
        assert_eq!(TemplateVariant::Doc.template_name(), "doc.html");
        assert_eq!(TemplateVariant::Css.template_name(), "css.html");
    }

    #[test]
    fn site_exporters_map_variants() {
        let dir = template_dir();
        let exporters = SiteExporters::new(dir.path());

        assert_eq!(
            exporters.get(TemplateVariant::Doc).variant(),
            TemplateVariant::Doc
        );
        assert_eq!(
            exporters.get(TemplateVariant::Css).variant(),
            TemplateVariant::Css
        );
    }

    #[test]
    fn exports_notebook_cells() {
        let dir = template_dir();
        let exporter = Exporter::new(dir.path(), TemplateVariant::Doc);

        let mut notebook = Notebook::empty();
        notebook.cells.push(Cell::markdown("# Hello"));

        let resources = RenderResources {
            title: Some("Usage".to_string()),
            ..Default::default()
        };

        let html = exporter.export(&notebook, &resources).unwrap();

        assert_eq!(html, "doc:Usage:# Hello");
    }

    #[test]
    fn exports_markdown_fragment_over_cells() {
        let dir = template_dir();
        let exporter = Exporter::new(dir.path(), TemplateVariant::Root);

        let resources = RenderResources {
            title: Some("Overview".to_string()),
            md: Some("<p>readme</p>".to_string()),
            ..Default::default()
        };

        let html = exporter.export(&Notebook::empty(), &resources).unwrap();

        assert!(html.contains("<p>readme</p>"));
        assert!(!html.contains('['));
    }

    #[test]
    fn css_export_carries_no_page_text() {
        let dir = template_dir();
        let exporter = Exporter::new(dir.path(), TemplateVariant::Css);

        let css = exporter
            .export(&Notebook::empty(), &RenderResources::default())
            .unwrap();

        assert_eq!(css, "body { margin: 0; }");
    }

    #[test]
    fn missing_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path(), TemplateVariant::Root);

        let result = exporter.export(&Notebook::empty(), &RenderResources::default());

        assert!(result.is_err());
    }
}
