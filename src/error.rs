//! Error types for troffdown library.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for troffdown operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when writing output or talking to an external tool.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The renderer has no defined behavior for this node kind.
    #[error("Unsupported node kind: {0}")]
    UnsupportedNode(String),

    /// The front matter payload could not be deserialized.
    #[error("Invalid front matter: {0}")]
    FrontMatter(String),

    /// The buffered table text cannot be split into header and body.
    #[error("Malformed table: {0}")]
    MalformedTable(String),

    /// The tree violates the nesting the renderer relies on.
    #[error("Invalid document structure: {0}")]
    Structure(String),

    /// The markdown front end met something it cannot represent.
    #[error("Markdown parsing error: {0}")]
    Parse(String),

    /// An external render pass exited unsuccessfully.
    #[error("{tool} failed ({status}):\n{stderr}")]
    Tool {
        /// Program name
        tool: String,
        /// Exit status of the process
        status: ExitStatus,
        /// Captured diagnostic output
        stderr: String,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::FrontMatter(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedNode("horizontal rule".into());
        assert_eq!(err.to_string(), "Unsupported node kind: horizontal rule");

        let err = Error::MalformedTable("no header row".into());
        assert_eq!(err.to_string(), "Malformed table: no header row");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{ not: a list").unwrap_err();
        let err: Error = yaml_err.into();
        assert!(matches!(err, Error::FrontMatter(_)));
    }
}
