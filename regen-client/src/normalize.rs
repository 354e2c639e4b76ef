//! # Response Normalizer
//!
//! Decouples the workbench from the exact shape of the services' JSON replies
//! and turns transport failures into the four-kind error taxonomy.
//!
//! Generation replies are decoded by trying a fixed list of fields in
//! priority order. Execution replies distinguish a program that ran (the
//! `output` field is present, even if empty) from a program that failed
//! (only `error` is present) and from a malformed reply (neither).

use crate::error::{self, Error, Result};
use crate::language::Language;
use crate::service::ServiceError;
use serde_json::Value;
use tracing::warn;

/// Fields that may carry generated code, highest priority first
pub const GENERATION_FIELDS: [&str; 5] = ["code", "content", "generated_code", "result", "text"];

/// Rendered in place of output when a program printed nothing
pub const NO_OUTPUT: &str = "(ran, no output)";

/// Marks the program's own error stream in rendered output
pub const PROGRAM_ERROR_PREFIX: &str = "Program error:";

/// Marks a workbench-level failure mirrored into the output panel
pub const FAILURE_PREFIX: &str = "Error:";

const MAX_DUMP_CHARS: usize = 200;

// ============================================================================
// Generation
// ============================================================================

/// Extract generated source text from a generation reply
pub fn generation_text(payload: &Value) -> Result<String> {
    if let Value::String(text) = payload {
        if !text.trim().is_empty() {
            return Ok(text.clone());
        }
    }

    if let Value::Object(map) = payload {
        let found = GENERATION_FIELDS.iter().find_map(|field| match map.get(*field) {
            Some(Value::String(text)) if !text.trim().is_empty() => Some(text.clone()),
            _ => None,
        });
        if let Some(text) = found {
            return Ok(text);
        }
    }

    let dump = dump(payload);
    warn!(reply = %dump, "generation reply carried no usable text");
    Err(error::unexpected_reply("normalize::generation", dump))
}

// ============================================================================
// Execution
// ============================================================================

/// What the execution service reported about the submitted program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The program ran; `stderr` holds anything it wrote to its error stream
    Completed { stdout: String, stderr: Option<String> },
    /// The program failed to run or crashed, and printed nothing usable
    ProgramFailed { error: String },
}

impl ExecutionOutcome {
    /// True when the program's own error stream has content
    pub fn has_program_error(&self) -> bool {
        match self {
            ExecutionOutcome::Completed { stderr, .. } => stderr.is_some(),
            ExecutionOutcome::ProgramFailed { .. } => true,
        }
    }

    /// Text for the terminal panel
    pub fn render(&self) -> String {
        match self {
            ExecutionOutcome::Completed { stdout, stderr: None } if stdout.is_empty() => {
                NO_OUTPUT.to_string()
            }
            ExecutionOutcome::Completed { stdout, stderr: None } => stdout.clone(),
            ExecutionOutcome::Completed { stdout, stderr: Some(stderr) } if stdout.is_empty() => {
                format!("{}\n{}", PROGRAM_ERROR_PREFIX, stderr)
            }
            ExecutionOutcome::Completed { stdout, stderr: Some(stderr) } => {
                format!("{}\n{}\n{}", stdout.trim_end_matches('\n'), PROGRAM_ERROR_PREFIX, stderr)
            }
            ExecutionOutcome::ProgramFailed { error } => {
                format!("{}\n{}", PROGRAM_ERROR_PREFIX, error)
            }
        }
    }
}

/// Interpret an execution reply
pub fn execution_outcome(payload: &Value) -> Result<ExecutionOutcome> {
    let map = match payload {
        Value::Object(map) => map,
        other => {
            let dump = dump(other);
            warn!(reply = %dump, "execution reply is not an object");
            return Err(error::unexpected_reply("normalize::execution", dump));
        }
    };

    let stderr = match map.get("error") {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        Some(Value::Null) | None => None,
        Some(Value::String(_)) => None,
        Some(other) => Some(other.to_string()),
    };

    match map.get("output") {
        Some(Value::String(stdout)) => Ok(ExecutionOutcome::Completed {
            stdout: stdout.clone(),
            stderr,
        }),
        Some(Value::Null) | None => match stderr {
            Some(error) => Ok(ExecutionOutcome::ProgramFailed { error }),
            None => {
                let dump = dump(payload);
                warn!(reply = %dump, "execution reply has neither output nor error");
                Err(error::unexpected_reply("normalize::execution", dump))
            }
        },
        Some(other) => {
            let dump = dump(other);
            Err(error::unexpected_reply("normalize::execution", dump)
                .with_context("field", "output"))
        }
    }
}

// ============================================================================
// Languages
// ============================================================================

/// Decode a language listing: a bare array or `{ "languages": [...] }`.
///
/// Unknown ids are skipped; an empty result is a reply we cannot use.
pub fn language_list(payload: &Value) -> Result<Vec<Language>> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("languages") {
            Some(Value::Array(items)) => items,
            _ => return Err(error::unexpected_reply("normalize::languages", dump(payload))),
        },
        _ => return Err(error::unexpected_reply("normalize::languages", dump(payload))),
    };

    let mut languages = Vec::new();
    for item in items {
        let Some(id) = item.as_str() else { continue };
        match id.parse::<Language>() {
            Ok(lang) if !languages.contains(&lang) => languages.push(lang),
            Ok(_) => {}
            Err(_) => warn!(language = id, "skipping language the client does not know"),
        }
    }

    if languages.is_empty() {
        return Err(error::unexpected_reply("normalize::languages", dump(payload)));
    }
    Ok(languages)
}

// ============================================================================
// Failure classification
// ============================================================================

/// Map a transport failure onto the error taxonomy.
///
/// - never reached the server → `NetworkUnreachable`
/// - wait ceiling exceeded → `Timeout`
/// - non-2xx → `ServerError`, preferring the server's own detail message
pub fn classify(err: ServiceError) -> Error {
    match err {
        ServiceError::Timeout { endpoint, secs } => {
            error::request_timeout(&endpoint, secs).with_operation("normalize::classify")
        }
        ServiceError::Unreachable(reason) => Error::network_unreachable(reason)
            .with_operation("normalize::classify"),
        ServiceError::Api { status, reason, body } => {
            let message = server_detail(&body)
                .or_else(|| (!reason.is_empty()).then(|| reason.clone()))
                .unwrap_or_else(|| format!("HTTP {}", status));
            Error::server_error(message)
                .with_operation("normalize::classify")
                .with_context("status", status.to_string())
        }
    }
}

/// The human-readable failure text a server put in its error body
fn server_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let map = value.as_object()?;
    ["detail", "message", "error"].iter().find_map(|key| match map.get(*key) {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text.clone()),
        Some(Value::Null) | None => None,
        Some(Value::String(_)) => None,
        Some(other) => Some(other.to_string()),
    })
}

/// Compact, length-bounded rendering of a payload for diagnostics
fn dump(payload: &Value) -> String {
    let text = match payload {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]: {}", keys.join(", "), payload)
        }
        Value::Null => "null".to_string(),
        other => other.to_string(),
    };

    if text.chars().count() <= MAX_DUMP_CHARS {
        text
    } else {
        let cut: String = text.chars().take(MAX_DUMP_CHARS).collect();
        format!("{}…", cut)
    }
}
