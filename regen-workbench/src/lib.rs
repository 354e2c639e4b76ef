//! # REGEN Workbench
//!
//! The workbench orchestrates one generate → transfer → execute loop:
//! 1. User describes the code they want
//! 2. The generation service answers with model output
//! 3. The output is sanitized and transferred into the editor
//! 4. The execution service runs the editor buffer with the user's stdin
//! 5. The result (or the failure) lands in the terminal panel
//!
//! `Session` owns the state and its transitions; `Workbench` pairs a session
//! with a `CodeService` and the panel geometry.

pub mod session;
mod workbench;

pub use session::{is_placeholder, Completion, ErrorRecord, Operation, Phase, Session, Ticket};
pub use workbench::{Workbench, WorkbenchConfig};
