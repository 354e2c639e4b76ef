//! Client error types
//!
//! Re-exports regen-error and provides client-specific conveniences.

// Re-export the core error types
pub use regen_error::{Error, ErrorKind, Result};

// =============================================================================
// Client-specific error constructors
// =============================================================================

/// Create a Validation error for an empty or whitespace-only field
pub fn empty_input(field: &'static str) -> Error {
    Error::validation(format!("{} must not be empty", field)).with_context("field", field)
}

/// Create a Validation error for an unsupported language name
pub fn unknown_language(name: impl Into<String>) -> Error {
    let name = name.into();
    Error::validation(format!("unknown language '{}'", name)).with_context("language", name)
}

/// Create a ServerError for a reply whose shape we cannot interpret
pub fn unexpected_reply(operation: &'static str, dump: impl Into<String>) -> Error {
    let dump = dump.into();
    Error::server_error(format!("unexpected reply shape: {}", dump))
        .with_operation(operation)
        .with_context("reply", dump)
}

/// Create a Timeout error for a request that exceeded its wait ceiling
pub fn request_timeout(endpoint: &str, secs: u64) -> Error {
    Error::timeout(format!("no reply from {} within {}s", endpoint, secs))
        .with_context("endpoint", endpoint.to_string())
        .with_context("timeout_secs", secs.to_string())
}

/// Create a Validation error for an action that is not allowed right now
pub fn invalid_phase(action: &'static str, phase: impl Into<String>) -> Error {
    let phase = phase.into();
    Error::validation(format!("cannot {} while {}", action, phase))
        .with_context("action", action)
        .with_context("phase", phase)
}
