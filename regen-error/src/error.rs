//! The main Error type for REGEN

use crate::ErrorKind;
use std::fmt;

/// The unified error type for all REGEN operations.
///
/// This error type provides:
/// - `kind`: What type of error occurred
/// - `message`: Human-readable description
/// - `operation`: What operation caused the error
/// - `context`: Key-value pairs for debugging
/// - `source`: The underlying error (if any)
///
/// # Example
///
/// ```rust
/// use regen_error::{Error, ErrorKind};
///
/// let err = Error::new(ErrorKind::Timeout, "no reply within 60s")
///     .with_operation("service::generate")
///     .with_context("endpoint", "/api/generate")
///     .with_context("timeout_secs", "60");
///
/// assert_eq!(err.kind(), ErrorKind::Timeout);
/// assert!(err.is_retryable());
/// ```
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<anyhow::Error>,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the operation that caused this error
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Get the context key-value pairs
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Get the source error (if any)
    pub fn source_ref(&self) -> Option<&anyhow::Error> {
        self.source.as_ref()
    }

    // =========================================================================
    // Builders (chainable)
    // =========================================================================

    /// Set the operation that caused this error.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(source.into());
        self
    }

    /// Whether issuing the same request again may succeed
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

// =============================================================================
// Display - compact, single-line format for logs
// =============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.operation)?;

        if !self.context.is_empty() {
            write!(f, ", context {{ ")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at {}", self.kind, self.operation)?;

        if !self.message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.message)?;
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "    Source: {:?}", source)?;
        }

        Ok(())
    }
}

// =============================================================================
// std::error::Error implementation
// =============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

// =============================================================================
// Convenient From implementations (be careful not to leak raw errors!)
// =============================================================================

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

// =============================================================================
// Convenience constructors
// =============================================================================

impl Error {
    /// Create an Unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a Timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Create a NetworkUnreachable error
    pub fn network_unreachable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NetworkUnreachable, message)
    }

    /// Create a ServerError error
    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServerError, message)
    }

    /// Create a ConfigInvalid error
    pub fn config_invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(ErrorKind::ConfigInvalid, reason).with_context("key", key)
    }

    /// Create a SerializationFailed error
    pub fn serialization_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationFailed, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::ServerError, "unexpected reply shape");
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(err.message(), "unexpected reply shape");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::new(ErrorKind::Timeout, "no reply")
            .with_operation("service::execute")
            .with_context("endpoint", "/api/execute")
            .with_context("timeout_secs", "30");

        assert_eq!(err.operation(), "service::execute");
        assert_eq!(err.context().len(), 2);
        assert_eq!(err.context()[0], ("endpoint", "/api/execute".to_string()));
    }

    #[test]
    fn test_operation_chaining() {
        let err = Error::new(ErrorKind::ServerError, "bad reply")
            .with_operation("normalize::generation")
            .with_operation("session::complete_generation");

        assert_eq!(err.operation(), "session::complete_generation");
        assert_eq!(err.context().len(), 1);
        assert_eq!(err.context()[0], ("called", "normalize::generation".to_string()));
    }

    #[test]
    fn test_retryable_follows_kind() {
        let err = Error::new(ErrorKind::NetworkUnreachable, "connection refused");
        assert!(err.is_retryable());

        let err = Error::new(ErrorKind::Validation, "empty prompt");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_display() {
        let err = Error::new(ErrorKind::Timeout, "service cold start")
            .with_operation("service::generate")
            .with_context("endpoint", "/api/generate")
            .with_context("attempt", "3");

        let display = format!("{}", err);
        assert!(display.contains("Timeout"));
        assert!(display.starts_with("Timeout at service::generate"));
        assert!(display.contains("service::generate"));
        assert!(display.contains("endpoint: /api/generate"));
        assert!(display.ends_with("=> service cold start"));
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(Error::validation("empty").kind(), ErrorKind::Validation);
        assert_eq!(Error::timeout("slow").kind(), ErrorKind::Timeout);
        assert_eq!(
            Error::network_unreachable("refused").kind(),
            ErrorKind::NetworkUnreachable
        );

        let err = Error::config_invalid("base_url", "must start with http");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context()[0], ("key", "base_url".to_string()));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::from(io_err);

        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err.source_ref().is_some());
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = Error::serialization_failed(json_err.to_string()).set_source(json_err);

        assert_eq!(err.kind(), ErrorKind::SerializationFailed);
        assert!(err.source_ref().is_some());
    }
}
