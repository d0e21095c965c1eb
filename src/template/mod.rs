//! Template rendering - fills the user's LaTeX template with catalog data
//!
//! Templates use TeX-safe Jinja delimiters so template syntax cannot collide
//! with LaTeX macros: `\VAR{..}` for expressions, `\BLOCK{..}` for statements
//! and `\#{..}` for comments.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use minijinja::syntax::SyntaxConfig;
use minijinja::{context, Environment};

use crate::scanner::{Catalog, ModelEntry};

/// Render the template at `tex_path` with the scanned catalog.
///
/// The template sees `logo` and `bg_image` as path strings and `models` as a
/// list of `(name, entry)` pairs sorted by name.
pub fn render_catalog(
    tex_path: &Path,
    logo: &str,
    bg_image: &str,
    catalog: &Catalog,
) -> Result<String> {
    let source = fs::read_to_string(tex_path)
        .with_context(|| format!("failed to read template {}", tex_path.display()))?;

    render_source(&source, logo, bg_image, catalog)
        .with_context(|| format!("failed to render template {}", tex_path.display()))
}

fn render_source(source: &str, logo: &str, bg_image: &str, catalog: &Catalog) -> Result<String> {
    let mut env = Environment::new();
    env.set_syntax(latex_syntax()?);
    env.add_template("catalog", source)?;

    let models: Vec<(&String, &ModelEntry)> = catalog.models.iter().collect();

    let rendered = env
        .get_template("catalog")?
        .render(context! { logo, bg_image, models })?;

    Ok(rendered)
}

fn latex_syntax() -> Result<SyntaxConfig> {
    let syntax = SyntaxConfig::builder()
        .block_delimiters(r"\BLOCK{", "}")
        .variable_delimiters(r"\VAR{", "}")
        .comment_delimiters(r"\#{", "}")
        .build()
        .context("invalid template syntax configuration")?;
    Ok(syntax)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_catalog() -> Catalog {
        let mut models = BTreeMap::new();
        models.insert(
            "roman-4x4".to_string(),
            ModelEntry {
                montage: Some("assets/roman_4x4/rM.png".to_string()),
                model: Some("assets/roman_4x4/r.png".to_string()),
                other: None,
                size: 0.20,
            },
        );
        models.insert(
            "gothic-4x6".to_string(),
            ModelEntry {
                montage: None,
                model: Some("assets/gothic_4x6/g.png".to_string()),
                other: None,
                size: 0.30,
            },
        );
        Catalog {
            root_name: "assets".to_string(),
            models,
        }
    }

    #[test]
    fn renders_variables_with_latex_delimiters() {
        let rendered = render_source(
            r"\includegraphics{\VAR{logo}} on \VAR{bg_image}",
            "title.png",
            "bg.png",
            &sample_catalog(),
        )
        .unwrap();

        assert_eq!(rendered, r"\includegraphics{title.png} on bg.png");
    }

    #[test]
    fn models_iterate_sorted_by_name() {
        let rendered = render_source(
            r"\BLOCK{for item in models}\VAR{item[0]};\BLOCK{endfor}",
            "",
            "",
            &sample_catalog(),
        )
        .unwrap();

        assert_eq!(rendered, "gothic-4x6;roman-4x4;");
    }

    #[test]
    fn entry_fields_are_reachable() {
        let rendered = render_source(
            r"\BLOCK{for item in models}\VAR{item[1].size} \BLOCK{endfor}",
            "",
            "",
            &sample_catalog(),
        )
        .unwrap();

        assert_eq!(rendered, "0.3 0.2 ");
    }

    #[test]
    fn plain_latex_passes_through() {
        let source = r"\documentclass{article} % 100% tex";
        let rendered = render_source(source, "", "", &sample_catalog()).unwrap();
        assert_eq!(rendered, source);
    }

    #[test]
    fn missing_template_file_reports_path() {
        let err = render_catalog(
            Path::new("/no/such/template.tex"),
            "",
            "",
            &sample_catalog(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("template.tex"));
    }
}
