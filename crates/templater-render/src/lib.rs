//! # Templater Render - MiniJinja environment for header-driven documents
//!
//! This crate holds the rendering half of `templater`: a MiniJinja
//! environment rooted at a template directory, with autoescaping chosen by
//! file extension and two unit filters registered.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use minijinja::context;
//! use templater_render::{render_file, GallonUnit};
//!
//! let out = render_file(
//!     Path::new("templates/tank.j2"),
//!     GallonUnit::Us,
//!     context! { volume => "120" },
//! )?;
//! ```
//!
//! ## Filters
//!
//! | Filter | Input | Output | On bad input |
//! |--------|-------|--------|--------------|
//! | `l2gal` | liters (text or number) | gallons (float) | render fails |
//! | `arabic2roman` | integer (text or number) | Roman numeral | warns, yields `NaN` |
//!
//! `l2gal` converts to imperial gallons unless the environment was built with
//! [`GallonUnit::Us`].
//!
//! ## Escaping
//!
//! Templates whose name ends in `.html` or `.xml` are HTML-escaped. Other
//! templates, including `page.html.j2`, render verbatim.

pub mod engine;
pub mod error;
pub mod filters;
pub mod roman;
pub mod util;

pub use engine::{auto_escape_for, render_file, TemplateEnvironment, TemplateLocation};
pub use error::RenderError;
pub use filters::{
    arabic_to_roman, liters_to_imperial_gallons, liters_to_us_gallons, register_filters,
    GallonUnit, NOT_A_NUMBER,
};
pub use roman::{to_roman, OutOfRange};
