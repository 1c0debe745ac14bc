//! Command-line surface.
//!
//! ```text
//! templater --template FILENAME.j2 --input INPUT [--use-us-gallons] [-V KEY=VALUE]...
//! ```
//!
//! `-V` values are validated while arguments are parsed, so a malformed
//! override fails before any file is opened.

use std::path::PathBuf;

use clap::Parser;
use templater_render::GallonUnit;

use crate::vars::Override;

/// Render a Jinja template against variables from an input file header.
#[derive(Debug, Parser)]
#[command(name = "templater", version, disable_version_flag = true)]
pub struct Cli {
    /// Jinja2 template file; its directory is the template root
    #[arg(long, value_name = "FILENAME.j2")]
    pub template: PathBuf,

    /// Input file supplying `content` and header variables
    #[arg(long, value_name = "INPUT")]
    pub input: PathBuf,

    /// Convert `l2gal` to US gallons instead of imperial
    #[arg(long = "use-us-gallons")]
    pub use_us_gallons: bool,

    /// Add or override a variable (repeatable, applied last)
    #[arg(short = 'V', value_name = "KEY=VALUE")]
    pub variables: Vec<Override>,

    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    pub version: Option<bool>,
}

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub template: PathBuf,
    pub input: PathBuf,
    pub gallons: GallonUnit,
    pub overrides: Vec<Override>,
}

impl RunConfig {
    pub fn new(template: impl Into<PathBuf>, input: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            input: input.into(),
            gallons: GallonUnit::default(),
            overrides: Vec::new(),
        }
    }

    pub fn gallons(mut self, unit: GallonUnit) -> Self {
        self.gallons = unit;
        self
    }

    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push(Override::new(key, value));
        self
    }
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        let gallons = if cli.use_us_gallons {
            GallonUnit::Us
        } else {
            GallonUnit::Imperial
        };
        Self {
            template: cli.template,
            input: cli.input,
            gallons,
            overrides: cli.variables,
        }
    }
}
