//! Template environment construction.
//!
//! [`TemplateEnvironment`] wraps a MiniJinja [`Environment`] configured for
//! file-based rendering:
//!
//! - templates load from a single root directory (the directory holding the
//!   main template), so `{% include %}` and `{% extends %}` resolve next to it
//! - names ending in `.html` or `.xml` are HTML-escaped; everything else
//!   renders verbatim
//! - `l2gal` and `arabic2roman` are registered, with the gallon unit fixed at
//!   construction
//!
//! The `{% do %}` statement is part of MiniJinja's stock syntax and needs no
//! extra setup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, Error, ErrorKind};
use serde::Serialize;

use crate::error::RenderError;
use crate::filters::{register_filters, GallonUnit};
use crate::util::normalize_newlines;

/// File extensions that turn on HTML autoescaping.
pub const AUTOESCAPE_EXTENSIONS: &[&str] = &["html", "xml"];

/// Where a template file lives: the loader root and the name under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLocation {
    /// Directory templates are loaded from.
    pub root: PathBuf,
    /// Template name relative to `root`.
    pub name: String,
}

impl TemplateLocation {
    /// Splits a template path into its containing directory and file name.
    ///
    /// A bare file name uses the current directory as root.
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| RenderError::TemplateNotFound(path.display().to_string()))?
            .to_string();
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self { root, name })
    }
}

/// A MiniJinja environment rooted at a template directory.
pub struct TemplateEnvironment {
    env: Environment<'static>,
    root: PathBuf,
}

impl TemplateEnvironment {
    /// Builds an environment loading templates from `root`.
    pub fn new(root: impl Into<PathBuf>, unit: GallonUnit) -> Self {
        let root = root.into();
        let mut env = Environment::new();

        let loader_root = root.clone();
        env.set_loader(move |name| load_template(&loader_root, name));
        env.set_auto_escape_callback(auto_escape_for);
        register_filters(&mut env, unit);

        tracing::debug!(root = %root.display(), ?unit, "template environment ready");
        Self { env, root }
    }

    /// Directory templates are loaded from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads the named template and renders it with `context`.
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, RenderError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(context)?)
    }
}

/// Renders the template file at `path` with `context`.
///
/// The file's directory becomes the template root.
pub fn render_file<S: Serialize>(
    path: &Path,
    unit: GallonUnit,
    context: S,
) -> Result<String, RenderError> {
    let location = TemplateLocation::from_path(path)?;
    let env = TemplateEnvironment::new(location.root, unit);
    env.render(&location.name, context)
}

/// Escaping policy for a template name.
pub fn auto_escape_for(name: &str) -> AutoEscape {
    let lower = name.to_ascii_lowercase();
    let escaped = AUTOESCAPE_EXTENSIONS.iter().any(|ext| {
        lower
            .strip_suffix(ext)
            .is_some_and(|stem| stem.ends_with('.'))
    });
    if escaped {
        AutoEscape::Html
    } else {
        AutoEscape::None
    }
}

/// Resolves a template name under `root`, refusing names that escape it.
fn join_template_path(root: &Path, name: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in name.split('/') {
        if segment == ".." || segment.contains('\\') || Path::new(segment).has_root() {
            return None;
        }
        if segment.is_empty() || segment == "." {
            continue;
        }
        path.push(segment);
    }
    Some(path)
}

fn load_template(root: &Path, name: &str) -> Result<Option<String>, Error> {
    let Some(path) = join_template_path(root, name) else {
        return Ok(None);
    };
    match fs::read_to_string(&path) {
        Ok(source) => Ok(Some(normalize_newlines(&source))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("could not read template {}", path.display()),
        )
        .with_source(err)),
    }
}
