//! Error types for parsing service responses

use thiserror::Error;

/// Errors that can occur while reading instance data
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed JSON or a JSON value of the wrong shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A boolean element held something other than `true` or `false`
    #[error("Invalid boolean '{value}' in element {element}")]
    InvalidBoolean { element: String, value: String },

    /// Lifecycle label outside the known set
    #[error("Unknown lifecycle state '{0}'")]
    UnknownLifecycleState(String),

    /// Document ended before the named element was closed
    #[error("Unexpected end of document inside {0}")]
    UnexpectedEof(String),

    /// The response was a service error document
    #[error("Service error {code}: {message}")]
    Service { code: String, message: String },
}

impl Error {
    /// Create an invalid boolean error
    pub fn invalid_boolean(element: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidBoolean {
            element: element.into(),
            value: value.into(),
        }
    }
}

/// Result type for model parsing
pub type Result<T> = std::result::Result<T, Error>;
