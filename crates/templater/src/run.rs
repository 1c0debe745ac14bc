//! The single-pass render driver.
//!
//! A run reads the input file, parses its header, merges the variable
//! sources, renders the template, and writes the result followed by one `\n`.
//! Output is produced only after rendering succeeds.

use std::fs;
use std::io::Write;
use std::path::Path;

use templater_render::util::normalize_newlines;
use templater_render::{TemplateEnvironment, TemplateLocation};

use crate::cli::RunConfig;
use crate::error::TemplaterError;
use crate::header::parse_header_str;
use crate::vars::{merge_variables, Variables};

/// Reads the input file and builds the merged variable mapping.
pub fn collect_variables(config: &RunConfig) -> Result<Variables, TemplaterError> {
    let content = read_input(&config.input)?;

    let header = parse_header_str(&content).map_err(|source| TemplaterError::Header {
        path: config.input.clone(),
        source,
    })?;
    tracing::debug!(
        input = %config.input.display(),
        variables = header.variables().len(),
        markers = header.marker_count(),
        "parsed input header"
    );

    let builtins = Variables::builtins(
        &content,
        &config.template.to_string_lossy(),
        &config.input.to_string_lossy(),
    );
    Ok(merge_variables(
        builtins,
        header.into_variables(),
        &config.overrides,
    ))
}

/// Renders the configured template and returns the text.
pub fn render(config: &RunConfig) -> Result<String, TemplaterError> {
    let location = TemplateLocation::from_path(&config.template)?;
    let env = TemplateEnvironment::new(location.root, config.gallons);
    tracing::debug!(root = %env.root().display(), name = %location.name, "loading template");

    let variables = collect_variables(config)?;
    Ok(env.render(&location.name, &variables)?)
}

/// Renders the configured template into `out`.
pub fn run<W: Write>(config: &RunConfig, out: &mut W) -> Result<(), TemplaterError> {
    let mut rendered = render(config)?;
    rendered.push('\n');
    out.write_all(rendered.as_bytes())
        .and_then(|()| out.flush())
        .map_err(TemplaterError::Output)
}

fn read_input(path: &Path) -> Result<String, TemplaterError> {
    let raw = fs::read_to_string(path).map_err(|source| TemplaterError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize_newlines(&raw))
}
