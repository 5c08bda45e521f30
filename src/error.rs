//! Error types for the switchback framework.
//!
//! Every failure the framework can produce is a variant of [`Error`] and
//! carries an HTTP status code. The dispatcher performs the single
//! error-to-response translation at the top of the pipeline; nothing below
//! it catches or retries.

use thiserror::Error;

/// Structured failure raised anywhere in the routing/dispatch/render
/// pipeline.
///
/// Each variant maps to a fixed HTTP status via [`Error::status`]. The
/// `Status` variant is the escape hatch for application code that needs to
/// fail with an arbitrary status and extra headers.
#[derive(Error, Debug)]
pub enum Error {
    /// No path segment matched a registered controller resource (400).
    #[error("No route matches '{0}'")]
    Routing(String),

    /// The controller resource exists but yielded no controller type (404).
    #[error("Controller missing: '{0}'")]
    UnknownController(String),

    /// No action method corresponds to the extracted action name (404).
    #[error("No action responded to '{0}'")]
    UnknownAction(String),

    /// The configured default controller is absent from the namespace (500).
    #[error("Default controller '{0}' not found")]
    MissingResource(String),

    /// A second terminal render/redirect was attempted in one request (500).
    #[error(
        "Render and/or redirect were called multiple times in this action. \
         Please note that you may only call render OR redirect, and at most \
         once per action."
    )]
    DoubleRender,

    /// No template candidate resolved for a logical template name (500).
    #[error("No such template: \"{0}\"")]
    TemplateNotFound(String),

    /// Application-raised failure with an explicit status and headers.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        headers: Vec<(String, String)>,
    },

    /// Any other failure surfacing through dispatch (500).
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// The HTTP status code this failure translates to.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Error::Routing(_) => 400,
            Error::UnknownController(_) | Error::UnknownAction(_) => 404,
            Error::MissingResource(_)
            | Error::DoubleRender
            | Error::TemplateNotFound(_)
            | Error::Internal(_) => 500,
            Error::Status { status, .. } => *status,
        }
    }

    /// Extra headers to attach to the translated response.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        match self {
            Error::Status { headers, .. } => headers,
            _ => &[],
        }
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Internal(err.to_string())
    }
}
