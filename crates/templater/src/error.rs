//! Error types for a templater run.

use std::io;
use std::path::PathBuf;

use templater_render::RenderError;

use crate::header::HeaderError;

/// Errors that abort a run. Nothing is written to stdout when one occurs.
#[derive(Debug, thiserror::Error)]
pub enum TemplaterError {
    /// The input file could not be read.
    #[error("Failed to read input file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input file's header is inconsistent.
    #[error("Invalid header in {}: {source}", .path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: HeaderError,
    },

    /// Template loading or rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Writing the rendered output failed.
    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),
}
