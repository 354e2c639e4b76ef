//! Error kinds for REGEN operations

use std::fmt;

/// The kind of error that occurred.
///
/// The four session-facing kinds (`Validation`, `Timeout`,
/// `NetworkUnreachable`, `ServerError`) are the taxonomy a front end shows to
/// the user. The remaining kinds cover local concerns such as configuration
/// and file loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// Invalid configuration or parameters
    ConfigInvalid,

    // =========================================================================
    // Session errors (surfaced as error records)
    // =========================================================================
    /// Caller-fixable input problem detected before any network call
    Validation,

    /// The request exceeded its bounded wait
    Timeout,

    /// The request never reached the server (refused, DNS, proxy)
    NetworkUnreachable,

    /// The server answered with a failure or a reply we cannot interpret
    ServerError,

    // =========================================================================
    // Serialization errors
    // =========================================================================
    /// Serialization/deserialization failed
    SerializationFailed,

    // =========================================================================
    // IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            // General
            ErrorKind::Unexpected => "Unexpected",
            ErrorKind::ConfigInvalid => "ConfigInvalid",

            // Session
            ErrorKind::Validation => "Validation",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::NetworkUnreachable => "NetworkUnreachable",
            ErrorKind::ServerError => "ServerError",

            // Serialization
            ErrorKind::SerializationFailed => "SerializationFailed",

            // IO
            ErrorKind::FileNotFound => "FileNotFound",
            ErrorKind::PermissionDenied => "PermissionDenied",
            ErrorKind::IoFailed => "IoFailed",
        }
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Timeout | ErrorKind::NetworkUnreachable)
    }

    /// Suggested next step shown next to a failure of this kind
    pub fn remediation(&self) -> &'static str {
        match self {
            ErrorKind::NetworkUnreachable => {
                "Could not reach the service. Check the connection and retry now."
            }
            ErrorKind::Timeout => {
                "The service took too long to answer. It may be starting up; wait a moment and retry."
            }
            ErrorKind::ServerError => {
                "The service failed to handle the request. If this keeps happening, please report a bug."
            }
            ErrorKind::Validation => "Fix the highlighted input and try again.",
            ErrorKind::ConfigInvalid => "Check the workbench configuration.",
            ErrorKind::FileNotFound | ErrorKind::PermissionDenied | ErrorKind::IoFailed => {
                "Check the file path and permissions."
            }
            ErrorKind::Unexpected | ErrorKind::SerializationFailed => {
                "Something unexpected happened. Please report a bug."
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
