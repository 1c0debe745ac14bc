//! Error types for template rendering.
//!
//! This module provides [`RenderError`], the error type for every rendering
//! operation. It hides the template engine's own error type behind a small,
//! stable set of variants.

use std::fmt;

/// Error type for template rendering operations.
#[derive(Debug)]
pub enum RenderError {
    /// Template syntax error, undefined reference, or unknown filter.
    TemplateError(String),

    /// Template not found under the template root.
    TemplateNotFound(String),

    /// A filter rejected its input (non-numeric volume, out-of-range numeral).
    FilterError(String),

    /// I/O error (e.g., reading a template from disk).
    IoError(std::io::Error),

    /// Other operational error.
    OperationError(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::TemplateError(msg) => write!(f, "template error: {}", msg),
            RenderError::TemplateNotFound(name) => write!(f, "template not found: {}", name),
            RenderError::FilterError(msg) => write!(f, "filter error: {}", msg),
            RenderError::IoError(err) => write!(f, "I/O error: {}", err),
            RenderError::OperationError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::IoError(err)
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        // `{:#}` includes the template name, line, and any source error.
        let detail = format!("{:#}", err);
        if let Some(io_err) = std::error::Error::source(&err)
            .and_then(|source| source.downcast_ref::<std::io::Error>())
        {
            return RenderError::IoError(std::io::Error::new(io_err.kind(), detail));
        }
        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(detail),
            ErrorKind::SyntaxError
            | ErrorKind::BadEscape
            | ErrorKind::UndefinedError
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod => RenderError::TemplateError(detail),
            ErrorKind::InvalidOperation => RenderError::FilterError(detail),
            _ => RenderError::OperationError(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::TemplateNotFound("page.j2".to_string());
        assert!(err.to_string().contains("template not found"));
        assert!(err.to_string().contains("page.j2"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let render_err: RenderError = io_err.into();
        assert!(matches!(render_err, RenderError::IoError(_)));
    }

    #[test]
    fn test_from_minijinja_template_not_found() {
        let mj_err = minijinja::Error::new(
            minijinja::ErrorKind::TemplateNotFound,
            "template 'foo' not found",
        );
        let render_err: RenderError = mj_err.into();
        assert!(matches!(render_err, RenderError::TemplateNotFound(_)));
    }

    #[test]
    fn test_from_minijinja_invalid_operation_is_filter_error() {
        let mj_err = minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, "bad volume");
        let render_err: RenderError = mj_err.into();
        assert!(matches!(render_err, RenderError::FilterError(_)));
        assert!(render_err.to_string().contains("bad volume"));
    }

    #[test]
    fn test_from_minijinja_with_io_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let mj_err =
            minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, "could not read template")
                .with_source(io_err);
        let render_err: RenderError = mj_err.into();
        match render_err {
            RenderError::IoError(err) => {
                assert_eq!(err.kind(), std::io::ErrorKind::PermissionDenied)
            }
            other => panic!("expected IoError, got {:?}", other),
        }
    }
}
