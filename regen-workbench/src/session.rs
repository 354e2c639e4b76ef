//! # Session State Machine
//!
//! One `Session` exists per open workbench. It is only mutated through the
//! transition methods below, which keep the UI-observable state consistent:
//!
//! ```text
//! Idle → Generating → Generated → (Transferred ⇄ Generated) → Executing → Executed
//!             │                                                   │
//!             └──────────────────────→ Error ←────────────────────┘
//! ```
//!
//! Network calls are split into `begin_*` (phase guard, request built) and
//! `complete_*` (reply applied). A second request of the same kind cannot
//! begin while one is in flight, and every request carries a [`Ticket`] so a
//! completion that is not the latest issued is discarded.

use regen_client::normalize::{self, ExecutionOutcome, FAILURE_PREFIX};
use regen_client::{
    error, Error, ErrorKind, ExecuteRequest, GenerateRequest, Language, Result, Sanitizer,
    ServiceError,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Generated text starting with one of these is a relayed failure, not code
pub const PLACEHOLDER_PREFIXES: [&str; 3] = ["Error:", "API Error", "Failed to generate"];

/// Position of the session in its generate/transfer/execute lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Generating,
    Generated,
    Transferred,
    Executing,
    Executed,
    Error,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Generating => "generating",
            Phase::Generated => "generated",
            Phase::Transferred => "transferred",
            Phase::Executing => "executing",
            Phase::Executed => "executed",
            Phase::Error => "error",
        }
    }

    /// A network call is outstanding
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Phase::Generating | Phase::Executing)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which network operation an error or ticket belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Generate,
    Execute,
}

/// A failed request, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub message: String,
    pub raised_during: Operation,
}

impl ErrorRecord {
    pub fn from_error(err: &Error, raised_during: Operation) -> Self {
        Self {
            kind: err.kind(),
            message: err.message().to_string(),
            raised_during,
        }
    }

    /// Kind-specific advice (retry now, wait and retry, report a bug)
    pub fn remediation(&self) -> &'static str {
        self.kind.remediation()
    }
}

/// Identifies one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    operation: Operation,
    seq: u64,
}

impl Ticket {
    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Whether a completion changed the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The ticket was not the latest issued; nothing changed
    Discarded,
}

/// All state of one workbench
#[derive(Debug, Clone)]
pub struct Session {
    prompt: String,
    target_language: Language,
    generated_text: String,
    editor_buffer: String,
    stdin_text: String,
    output_text: String,
    phase: Phase,
    last_error: Option<ErrorRecord>,
    last_outcome: Option<ExecutionOutcome>,
    show_generated: bool,
    show_terminal: bool,
    /// Where `dismiss_error` returns to
    stable_phase: Phase,
    next_seq: u64,
    in_flight: Option<Ticket>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl Session {
    pub fn new(target_language: Language) -> Self {
        Self {
            prompt: String::new(),
            target_language,
            generated_text: String::new(),
            editor_buffer: String::new(),
            stdin_text: String::new(),
            output_text: String::new(),
            phase: Phase::Idle,
            last_error: None,
            last_outcome: None,
            show_generated: false,
            show_terminal: false,
            stable_phase: Phase::Idle,
            next_seq: 0,
            in_flight: None,
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn target_language(&self) -> Language {
        self.target_language
    }

    pub fn generated_text(&self) -> &str {
        &self.generated_text
    }

    pub fn editor_buffer(&self) -> &str {
        &self.editor_buffer
    }

    pub fn stdin_text(&self) -> &str {
        &self.stdin_text
    }

    pub fn output_text(&self) -> &str {
        &self.output_text
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_error(&self) -> Option<&ErrorRecord> {
        self.last_error.as_ref()
    }

    /// Structured result of the latest resolved execution
    pub fn last_outcome(&self) -> Option<&ExecutionOutcome> {
        self.last_outcome.as_ref()
    }

    /// The generated-code panel is open
    pub fn show_generated(&self) -> bool {
        self.show_generated
    }

    /// The terminal panel is open
    pub fn show_terminal(&self) -> bool {
        self.show_terminal
    }

    /// A request is in flight; buttons that start another one are disabled
    pub fn is_loading(&self) -> bool {
        self.phase.is_in_flight()
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Validate and enter `Generating`.
    ///
    /// The editor buffer is sent along as context but is never replaced by
    /// the reply.
    pub fn begin_generation(&mut self, prompt: &str, language: Language) -> Result<(Ticket, GenerateRequest)> {
        self.guard_idle("submit a generation")?;
        if prompt.trim().is_empty() {
            return Err(error::empty_input("prompt").with_operation("session::begin_generation"));
        }

        self.prompt = prompt.to_string();
        self.target_language = language;
        self.generated_text.clear();
        self.show_generated = false;
        self.clear_error_from(Operation::Generate);

        let ticket = self.issue(Operation::Generate);
        self.enter(Phase::Generating);

        let request = GenerateRequest::new(prompt, language).with_existing_code(&self.editor_buffer);
        Ok((ticket, request))
    }

    /// Apply the generation service's reply
    pub fn complete_generation(
        &mut self,
        ticket: Ticket,
        reply: std::result::Result<serde_json::Value, ServiceError>,
    ) -> Result<Completion> {
        if !self.accept(ticket) {
            return Ok(Completion::Discarded);
        }

        let text = reply
            .map_err(normalize::classify)
            .and_then(|payload| normalize::generation_text(&payload));

        match text {
            Ok(text) => {
                if is_placeholder(&text) {
                    warn!(text = %text, "generation service relayed a failure as content");
                }
                self.generated_text = text;
                self.show_generated = true;
                self.enter(Phase::Generated);
                Ok(Completion::Applied)
            }
            Err(err) => Err(self.fail(Operation::Generate, err.with_operation("session::complete_generation"))),
        }
    }

    // =========================================================================
    // Transfer
    // =========================================================================

    /// Copy the sanitized generated text into the editor buffer
    pub fn transfer_to_editor(&mut self) -> Result<&str> {
        if !matches!(self.phase, Phase::Generated | Phase::Transferred) {
            return Err(error::invalid_phase("transfer to the editor", self.phase.as_str()));
        }
        if is_placeholder(&self.generated_text) {
            warn!("refusing to transfer empty or placeholder text");
            return Err(Error::validation("there is no generated code to transfer")
                .with_operation("session::transfer_to_editor"));
        }

        let code = Sanitizer::for_language(self.target_language).sanitize(&self.generated_text);
        if code.is_empty() {
            return Err(Error::validation("generated text contains no code")
                .with_operation("session::transfer_to_editor"));
        }

        self.editor_buffer = code;
        self.output_text.clear();
        self.last_outcome = None;
        self.show_generated = false;
        self.enter(Phase::Transferred);
        Ok(&self.editor_buffer)
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Validate and enter `Executing`
    pub fn begin_execution(&mut self, stdin: &str) -> Result<(Ticket, ExecuteRequest)> {
        self.guard_idle("submit an execution")?;
        if self.editor_buffer.trim().is_empty() {
            return Err(error::empty_input("editor buffer").with_operation("session::begin_execution"));
        }

        self.stdin_text = stdin.to_string();
        self.output_text.clear();
        self.last_outcome = None;
        self.clear_error_from(Operation::Execute);

        let ticket = self.issue(Operation::Execute);
        self.enter(Phase::Executing);

        let request = ExecuteRequest::new(self.editor_buffer.clone(), self.target_language)
            .with_input(stdin);
        Ok((ticket, request))
    }

    /// Apply the execution service's reply.
    ///
    /// A program that reported an error is still a successful call; only
    /// transport failures and malformed replies produce an error record.
    pub fn complete_execution(
        &mut self,
        ticket: Ticket,
        reply: std::result::Result<serde_json::Value, ServiceError>,
    ) -> Result<Completion> {
        if !self.accept(ticket) {
            return Ok(Completion::Discarded);
        }

        let outcome = reply
            .map_err(normalize::classify)
            .and_then(|payload| normalize::execution_outcome(&payload));

        match outcome {
            Ok(outcome) => {
                self.output_text = outcome.render();
                self.last_outcome = Some(outcome);
                self.show_terminal = true;
                self.enter(Phase::Executed);
                Ok(Completion::Applied)
            }
            Err(err) => Err(self.fail(Operation::Execute, err.with_operation("session::complete_execution"))),
        }
    }

    // =========================================================================
    // Other user actions
    // =========================================================================

    /// Reset buffers and output; not allowed while a request is in flight
    pub fn clear(&mut self) -> Result<()> {
        self.guard_idle("clear the workbench")?;

        self.editor_buffer.clear();
        self.stdin_text.clear();
        self.output_text.clear();
        self.last_outcome = None;
        self.last_error = None;
        self.show_terminal = false;
        self.stable_phase = Phase::Idle;
        self.enter(Phase::Idle);
        Ok(())
    }

    /// Acknowledge the last error and return to the last stable phase
    pub fn dismiss_error(&mut self) -> Phase {
        self.last_error = None;
        if self.phase == Phase::Error {
            self.enter(self.stable_phase);
        }
        self.phase
    }

    /// Close the generated-code panel; the text stays available
    pub fn hide_generated(&mut self) {
        self.show_generated = false;
    }

    /// Clear and close the terminal panel
    pub fn close_terminal(&mut self) -> Result<()> {
        if self.phase == Phase::Executing {
            return Err(error::invalid_phase("close the terminal", self.phase.as_str()));
        }
        self.output_text.clear();
        self.last_outcome = None;
        self.show_terminal = false;
        Ok(())
    }

    /// Replace the editor contents with user-typed text
    pub fn set_editor_buffer(&mut self, code: impl Into<String>) -> Result<()> {
        self.guard_idle("edit the buffer")?;
        self.editor_buffer = code.into();
        Ok(())
    }

    pub fn set_stdin(&mut self, stdin: impl Into<String>) {
        self.stdin_text = stdin.into();
    }

    pub fn set_language(&mut self, language: Language) -> Result<()> {
        self.guard_idle("change the language")?;
        self.target_language = language;
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn guard_idle(&self, action: &'static str) -> Result<()> {
        if self.phase.is_in_flight() {
            warn!(action, phase = %self.phase, "rejected while a request is in flight");
            return Err(error::invalid_phase(action, self.phase.as_str()));
        }
        Ok(())
    }

    fn issue(&mut self, operation: Operation) -> Ticket {
        self.next_seq += 1;
        let ticket = Ticket {
            operation,
            seq: self.next_seq,
        };
        self.in_flight = Some(ticket);
        ticket
    }

    /// Consume the in-flight ticket if `ticket` is it
    fn accept(&mut self, ticket: Ticket) -> bool {
        if self.in_flight != Some(ticket) {
            warn!(?ticket, latest = ?self.in_flight, "discarding stale completion");
            return false;
        }
        self.in_flight = None;
        true
    }

    fn enter(&mut self, phase: Phase) {
        if phase != self.phase {
            info!(from = %self.phase, to = %phase, "phase transition");
        }
        self.phase = phase;
        if matches!(
            phase,
            Phase::Idle | Phase::Generated | Phase::Transferred | Phase::Executed
        ) {
            self.stable_phase = phase;
        }
    }

    fn clear_error_from(&mut self, operation: Operation) {
        if self.last_error.as_ref().is_some_and(|e| e.raised_during == operation) {
            self.last_error = None;
        }
    }

    /// Record a failed request and hand the error back to the caller
    fn fail(&mut self, operation: Operation, err: Error) -> Error {
        warn!(?operation, error = %err, "request failed");
        let record = ErrorRecord::from_error(&err, operation);

        if operation == Operation::Execute {
            self.output_text = format!("{} {}", FAILURE_PREFIX, record.message);
            self.show_terminal = true;
        }
        self.last_error = Some(record);
        self.enter(Phase::Error);
        err
    }
}

/// Empty text, or a failure message relayed in place of code
pub fn is_placeholder(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty()
        || PLACEHOLDER_PREFIXES
            .iter()
            .any(|prefix| {
                trimmed
                    .get(..prefix.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
            })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn generated(text: &str) -> Session {
        let mut session = Session::default();
        let (ticket, _) = session.begin_generation("hello world", Language::Python).unwrap();
        session.complete_generation(ticket, Ok(json!({ "code": text }))).unwrap();
        session
    }

    fn transferred(code: &str) -> Session {
        let mut session = generated(code);
        session.transfer_to_editor().unwrap();
        session
    }

    #[test]
    fn test_empty_prompt_is_rejected_without_state_change() {
        let mut session = Session::default();
        for prompt in ["", "   ", "\n\t"] {
            let err = session.begin_generation(prompt, Language::Python).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_generation_request_carries_editor_buffer() {
        let mut session = Session::default();
        let (_, request) = session.begin_generation("sum a list", Language::Go).unwrap();
        assert_eq!(request.code, None);
        assert_eq!(request.language, Language::Go);
        assert_eq!(session.phase(), Phase::Generating);
        assert!(session.is_loading());

        let mut session = transferred("print(1)");
        let (_, request) = session.begin_generation("make it print 2", Language::Python).unwrap();
        assert_eq!(request.code.as_deref(), Some("print(1)"));
    }

    #[test]
    fn test_generation_success_does_not_touch_editor() {
        let mut session = transferred("print(1)");
        let (ticket, _) = session.begin_generation("again", Language::Python).unwrap();
        assert_eq!(session.generated_text(), "");

        session.complete_generation(ticket, Ok(json!({"content": "print(2)"}))).unwrap();
        assert_eq!(session.phase(), Phase::Generated);
        assert_eq!(session.generated_text(), "print(2)");
        assert_eq!(session.editor_buffer(), "print(1)");
        assert!(session.show_generated());
    }

    #[test]
    fn test_unrecognized_generation_reply_is_server_error() {
        let mut session = Session::default();
        let (ticket, _) = session.begin_generation("x", Language::Python).unwrap();
        let err = session.complete_generation(ticket, Ok(json!({"choices": []}))).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(session.phase(), Phase::Error);
        let record = session.last_error().unwrap();
        assert_eq!(record.raised_during, Operation::Generate);
        assert!(record.message.contains("unexpected reply shape"));
    }

    #[test]
    fn test_failed_generation_leaves_editor_untouched() {
        let mut session = transferred("print(1)");
        let (ticket, _) = session.begin_generation("again", Language::Python).unwrap();
        session
            .complete_generation(ticket, Err(ServiceError::Unreachable("refused".into())))
            .unwrap_err();

        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(session.last_error().unwrap().kind, ErrorKind::NetworkUnreachable);
        assert_eq!(session.editor_buffer(), "print(1)");
        assert_eq!(session.output_text(), "");
    }

    #[test]
    fn test_transfer_sanitizes_and_is_idempotent() {
        let mut session = generated("Here it is:\n```python\n# greet\nprint('hi')\n```\nEnjoy!");
        let first = session.transfer_to_editor().unwrap().to_string();
        let second = session.transfer_to_editor().unwrap().to_string();

        assert_eq!(first, "print('hi')");
        assert_eq!(first, second);
        assert_eq!(session.phase(), Phase::Transferred);
        assert!(!session.show_generated());
    }

    #[test]
    fn test_transfer_clears_output() {
        let mut session = transferred("print(1)");
        let (ticket, _) = session.begin_execution("").unwrap();
        session.complete_execution(ticket, Ok(json!({"output": "1\n"}))).unwrap();
        assert_eq!(session.output_text(), "1\n");

        let (ticket, _) = session.begin_generation("print 2", Language::Python).unwrap();
        session.complete_generation(ticket, Ok(json!("print(2)"))).unwrap();
        session.transfer_to_editor().unwrap();
        assert_eq!(session.output_text(), "");
        assert!(session.last_outcome().is_none());
    }

    #[test]
    fn test_transfer_rejects_placeholder_text() {
        for text in ["Error: model unavailable", "API Error 503", "  error: quota  "] {
            let mut session = generated(text);
            let err = session.transfer_to_editor().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(session.phase(), Phase::Generated);
            assert_eq!(session.editor_buffer(), "");
        }
    }

    #[test]
    fn test_transfer_rejected_outside_generated_phases() {
        let mut session = Session::default();
        let err = session.transfer_to_editor().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_execution_requires_code() {
        let mut session = Session::default();
        let err = session.begin_execution("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        session.set_editor_buffer("   \n").unwrap();
        assert!(session.begin_execution("").is_err());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_execution_request_shape() {
        let mut session = transferred("print(input())");
        let (ticket, request) = session.begin_execution("42").unwrap();
        assert_eq!(ticket.operation(), Operation::Execute);
        assert_eq!(request.code, "print(input())");
        assert_eq!(request.input, "42");
        assert_eq!(session.stdin_text(), "42");
        assert_eq!(session.phase(), Phase::Executing);
    }

    #[test]
    fn test_execution_outcomes() {
        let mut session = transferred("pass");
        let (ticket, _) = session.begin_execution("").unwrap();
        session.complete_execution(ticket, Ok(json!({"output": ""}))).unwrap();
        assert_eq!(session.output_text(), "(ran, no output)");
        assert_eq!(session.phase(), Phase::Executed);

        let (ticket, _) = session.begin_execution("").unwrap();
        session.complete_execution(ticket, Ok(json!({"error": "SyntaxError"}))).unwrap();
        assert_eq!(session.output_text(), "Program error:\nSyntaxError");
        assert_eq!(session.phase(), Phase::Executed);
        assert!(session.last_error().is_none());

        let (ticket, _) = session.begin_execution("").unwrap();
        let err = session.complete_execution(ticket, Ok(json!({}))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(session.phase(), Phase::Error);
    }

    #[test]
    fn test_failed_execution_mirrors_message_into_output() {
        let mut session = transferred("print(1)");
        let (ticket, _) = session.begin_execution("").unwrap();
        session
            .complete_execution(ticket, Err(ServiceError::Timeout { endpoint: "/api/execute".into(), secs: 30 }))
            .unwrap_err();

        assert_eq!(session.phase(), Phase::Error);
        assert!(session.output_text().starts_with("Error: no reply from /api/execute"));
        assert!(session.show_terminal());
        assert_eq!(session.editor_buffer(), "print(1)");
        let record = session.last_error().unwrap();
        assert_eq!(record.kind, ErrorKind::Timeout);
        assert!(record.remediation().contains("wait"));
    }

    #[test]
    fn test_overlapping_submissions_are_rejected() {
        let mut session = transferred("print(1)");
        let (first, _) = session.begin_execution("").unwrap();

        let err = session.begin_execution("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(session.begin_generation("other", Language::Python).is_err());
        assert!(session.clear().is_err());
        assert_eq!(session.phase(), Phase::Executing);

        session.complete_execution(first, Ok(json!({"output": "1"}))).unwrap();
        assert_eq!(session.output_text(), "1");
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut session = transferred("print(1)");
        let (first, _) = session.begin_execution("").unwrap();
        session.complete_execution(first, Ok(json!({"output": "1"}))).unwrap();

        let (second, _) = session.begin_execution("").unwrap();
        // a late duplicate of the first reply
        let completion = session.complete_execution(first, Ok(json!({"output": "stale"}))).unwrap();
        assert_eq!(completion, Completion::Discarded);
        assert_eq!(session.phase(), Phase::Executing);
        assert_eq!(session.output_text(), "");

        session.complete_execution(second, Ok(json!({"output": "2"}))).unwrap();
        assert_eq!(session.output_text(), "2");
        assert!(second.seq() > first.seq());
    }

    #[test]
    fn test_dismiss_returns_to_last_stable_phase() {
        let mut session = Session::default();
        let (ticket, _) = session.begin_generation("x", Language::Python).unwrap();
        session.complete_generation(ticket, Err(ServiceError::Unreachable("dns".into()))).unwrap_err();
        assert_eq!(session.dismiss_error(), Phase::Idle);
        assert!(session.last_error().is_none());

        let mut session = transferred("print(1)");
        let (ticket, _) = session.begin_execution("").unwrap();
        session.complete_execution(ticket, Err(ServiceError::Unreachable("dns".into()))).unwrap_err();
        assert_eq!(session.dismiss_error(), Phase::Transferred);
    }

    #[test]
    fn test_new_request_clears_error_of_same_kind_only() {
        let mut session = transferred("print(1)");
        let (ticket, _) = session.begin_execution("").unwrap();
        session.complete_execution(ticket, Err(ServiceError::Unreachable("down".into()))).unwrap_err();

        let (ticket, _) = session.begin_generation("retry later", Language::Python).unwrap();
        assert_eq!(session.last_error().unwrap().raised_during, Operation::Execute);
        session.complete_generation(ticket, Ok(json!("print(3)"))).unwrap();

        session.begin_execution("").unwrap();
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_clear_resets_buffers() {
        let mut session = transferred("print(input())");
        let (ticket, _) = session.begin_execution("7").unwrap();
        session.complete_execution(ticket, Ok(json!({"output": "7"}))).unwrap();

        session.clear().unwrap();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.editor_buffer(), "");
        assert_eq!(session.stdin_text(), "");
        assert_eq!(session.output_text(), "");
        assert!(!session.show_terminal());
    }

    #[test]
    fn test_panel_visibility_actions() {
        let mut session = generated("print(1)");
        assert!(session.show_generated());
        session.hide_generated();
        assert!(!session.show_generated());
        assert_eq!(session.generated_text(), "print(1)");

        session.transfer_to_editor().unwrap();
        let (ticket, _) = session.begin_execution("").unwrap();
        assert!(session.close_terminal().is_err());
        session.complete_execution(ticket, Ok(json!({"output": "1"}))).unwrap();
        session.close_terminal().unwrap();
        assert_eq!(session.output_text(), "");
        assert!(!session.show_terminal());
    }

    #[test]
    fn test_is_placeholder() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("Failed to generate code: timeout"));
        assert!(!is_placeholder("print('Error: not a placeholder')"));
        assert!(!is_placeholder("err = 1"));
    }
}
