//! # regen-error
//!
//! Unified error handling for the REGEN workbench crates.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., Timeout, ServerError)
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use regen_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::ServerError, "generation service returned 500")
//!         .with_operation("service::generate")
//!         .with_context("status", "500")
//!         .with_context("language", "python"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All library functions return `Result<T, regen_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context
//! - Don't abuse `From<OtherError>` to prevent raw error leakage

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using the REGEN Error
pub type Result<T> = std::result::Result<T, Error>;
