//! # Templater - render Jinja templates from annotated text files
//!
//! `templater` renders one template against variables taken from an input
//! file and the command line, then prints the result.
//!
//! ## Variable sources
//!
//! | Order | Source | Example |
//! |-------|--------|---------|
//! | 1 | built-ins | `content`, `TEMPLATE`, `INPUT` |
//! | 2 | input header | `title: Hello` |
//! | 3 | `-V` overrides | `-V title=Override` |
//!
//! Later sources replace earlier ones key by key. See [`header`] for the
//! header format and its quirks.
//!
//! ## Library use
//!
//! ```rust,ignore
//! use templater::{run, RunConfig};
//! use templater_render::GallonUnit;
//!
//! let config = RunConfig::new("templates/report.j2", "notes.md")
//!     .gallons(GallonUnit::Us)
//!     .with_override("title", "Override");
//! run(&config, &mut std::io::stdout().lock())?;
//! ```
//!
//! Rendering itself (filters, escaping, template loading) lives in
//! [`templater_render`].

pub mod cli;
pub mod error;
pub mod header;
pub mod run;
pub mod vars;

pub use cli::{Cli, RunConfig};
pub use error::TemplaterError;
pub use header::{parse_header, parse_header_str, HeaderError, HeaderParser, HeaderVariables};
pub use run::{collect_variables, render, run};
pub use vars::{merge_variables, Override, OverrideError, VarValue, Variables};
