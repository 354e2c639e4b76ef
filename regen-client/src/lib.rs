//! # REGEN Client
//!
//! Client-side building blocks of the REGEN code workbench.
//!
//! ## Core Concepts
//! - **Service**: Trait-based access to the remote generation and execution backends
//! - **Normalizer**: Turns loosely shaped replies into text, and transport failures into error kinds
//! - **Sanitizer**: Extracts runnable code from model output
//! - **Geometry**: Drag-to-resize state for the output and terminal panels
//! - **Language**: The target languages the backends understand

pub mod error;
pub mod geometry;
pub mod language;
pub mod normalize;
pub mod sanitize;
pub mod service;

pub use error::{Error, ErrorKind, Result};
pub use geometry::{Bounds, Divider, DragState, LayoutConfig, PanelGeometry, PanelResizer};
pub use language::Language;
pub use normalize::{classify, execution_outcome, generation_text, language_list, ExecutionOutcome};
pub use sanitize::{sanitize, Sanitizer};
pub use service::{
    CodeService, ExecuteRequest, GenerateRequest, HttpCodeService, ServiceConfig, ServiceError,
};
